//! Handlers for XP, levels and achievements.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use trener_core::gamification::{achievement_catalogue, AchievementStatus, DEFAULT_USER_ID};
use trener_db::models::profile::AchievementUnlock;
use trener_db::repositories::ProfileRepo;

use crate::coach::history::evaluate_profile;
use crate::coach::today;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementStatus>,
    /// Unlock log, oldest first.
    pub unlocks: Vec<AchievementUnlock>,
}

/// GET /gamification/profile
///
/// Evaluates achievements against the current history before reporting, so
/// `new_achievements` lists whatever this call unlocked.
pub async fn get_profile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = evaluate_profile(&state.pool, today()).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /gamification/achievements
pub async fn list_achievements(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    evaluate_profile(&state.pool, today()).await?;
    let profile = ProfileRepo::get_or_create(&state.pool, DEFAULT_USER_ID).await?;
    let unlocks = ProfileRepo::list_unlocks(&state.pool, DEFAULT_USER_ID).await?;
    Ok(Json(DataResponse {
        data: AchievementsResponse {
            achievements: achievement_catalogue(&profile),
            unlocks,
        },
    }))
}
