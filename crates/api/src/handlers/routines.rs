//! POST /routines/generate

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use trener_core::routine::GenerateRoutineRequest;
use validator::Validate;

use crate::coach::{routines, today};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Generate a routine. The routine is returned for review and is not stored;
/// starting it goes through the active workout.
pub async fn generate_routine(
    State(state): State<AppState>,
    Json(input): Json<GenerateRoutineRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let routine = routines::generate(&state.pool, state.llm.as_ref(), &input, today()).await?;
    Ok(Json(DataResponse { data: routine }))
}
