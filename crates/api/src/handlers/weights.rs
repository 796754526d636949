//! GET /weights/suggest -- the weight lookup with everything it considered.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use trener_core::error::CoreError;
use trener_core::weights::explain_suggestion;

use crate::coach::history::suggestion_history;
use crate::error::AppResult;
use crate::query::SuggestParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn suggest_weight(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> AppResult<impl IntoResponse> {
    if params.exercise.trim().is_empty() {
        return Err(CoreError::Validation("exercise: must not be empty".into()).into());
    }
    let history = suggestion_history(&state.pool).await?;
    let report = explain_suggestion(&params.exercise, &params.muscle_groups(), &history);
    tracing::debug!(
        exercise = %report.exercise,
        matches = report.matches.len(),
        suggestion = %report.suggestion,
        "Weight suggestion explained"
    );
    Ok(Json(DataResponse { data: report }))
}
