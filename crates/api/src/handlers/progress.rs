//! Handlers for progress charts over the whole history.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use trener_core::stats::{
    exercise_progress, frequent_exercises, muscle_group_distribution, progress_trend,
    weekly_volume, GroupLoad, ProgressPoint, ProgressTrend, TOP_FREQUENT,
};

use crate::coach::history::chronological;
use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExerciseProgress {
    pub exercise: String,
    pub progress: Vec<ProgressPoint>,
    /// `None` when nothing matched.
    pub trend: Option<ProgressTrend>,
}

/// GET /progress/exercises/{name}
pub async fn get_exercise_progress(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    let progress = exercise_progress(&workouts, &name);
    let trend = progress_trend(&progress);
    Ok(Json(DataResponse {
        data: ExerciseProgress {
            exercise: name,
            progress,
            trend,
        },
    }))
}

/// GET /progress/volume
pub async fn get_weekly_volume(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    Ok(Json(DataResponse {
        data: weekly_volume(&workouts),
    }))
}

/// GET /progress/muscle-groups
pub async fn get_muscle_groups(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    let groups: BTreeMap<String, GroupLoad> = muscle_group_distribution(&workouts);
    Ok(Json(DataResponse { data: groups }))
}

/// GET /progress/frequent-exercises?limit=
pub async fn get_frequent_exercises(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    let limit = params.limit.unwrap_or(TOP_FREQUENT);
    Ok(Json(DataResponse {
        data: frequent_exercises(&workouts, limit),
    }))
}
