//! POST /notifications/test

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use trener_core::messages::TEST_MESSAGE;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TestResult {
    pub sent: bool,
    pub configured: bool,
}

/// Send a fixed message to the configured room.
pub async fn send_test(State(state): State<AppState>) -> impl IntoResponse {
    let sent = state.notifier.send(TEST_MESSAGE).await;
    Json(DataResponse {
        data: TestResult {
            sent,
            configured: state.notifier.is_configured(),
        },
    })
}
