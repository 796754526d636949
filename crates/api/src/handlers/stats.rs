//! GET /stats

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use trener_core::stats::general_stats;

use crate::coach::history::chronological;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    Ok(Json(DataResponse {
        data: general_stats(&workouts),
    }))
}
