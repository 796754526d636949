//! Handlers for the in-progress workout.
//!
//! At most one open active workout exists. `start` enforces it with a
//! check-then-act; every other handler works on the open one and answers
//! 404 when there is none.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use trener_core::active::{ActiveExercise, LoggedSet, StartWorkoutRequest};
use trener_core::error::CoreError;
use trener_core::gamification::AchievementSummary;
use trener_core::messages;
use trener_db::models::active_workout::StoredActiveWorkout;
use trener_db::models::workout::StoredWorkout;
use trener_db::repositories::{ActiveWorkoutRepo, WorkoutRepo};
use trener_db::DbPool;
use validator::Validate;

use crate::coach::history::{evaluate_profile, suggester, suggestion_history};
use crate::coach::today;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

async fn open_workout(pool: &DbPool) -> AppResult<StoredActiveWorkout> {
    ActiveWorkoutRepo::find_open(pool)
        .await?
        .ok_or_else(|| CoreError::Missing("No active workout".into()).into())
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct StartedWorkout {
    pub workout: StoredActiveWorkout,
    pub notified: bool,
}

#[derive(Debug, Serialize)]
pub struct CurrentWorkout {
    pub active: bool,
    pub workout: Option<StoredActiveWorkout>,
}

#[derive(Debug, Serialize)]
pub struct RecalculatedWeights {
    pub updated: usize,
    pub workout: StoredActiveWorkout,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogSetRequest {
    pub exercise_index: usize,
    #[validate(nested)]
    pub set: LoggedSet,
}

#[derive(Debug, Serialize)]
pub struct LoggedSetResult {
    pub exercise_index: usize,
    pub exercise: ActiveExercise,
}

#[derive(Debug, Deserialize)]
pub struct FinishRequest {
    /// Post the summary to the chat room.
    #[serde(default = "default_notify")]
    pub notify: bool,
}

fn default_notify() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct FinishedResult {
    pub workout: StoredWorkout,
    pub duration_min: u32,
    pub completed_exercises: usize,
    pub total_exercises: usize,
    pub summary: String,
    /// `None` when notification was not requested.
    pub notified: Option<bool>,
    pub new_achievements: Vec<AchievementSummary>,
}

#[derive(Debug, Serialize)]
pub struct CancelResult {
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// POST /active-workout/start
// ---------------------------------------------------------------------------

pub async fn start_workout(
    State(state): State<AppState>,
    Json(input): Json<StartWorkoutRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if ActiveWorkoutRepo::find_open(&state.pool).await?.is_some() {
        return Err(CoreError::Conflict(
            "A workout is already in progress. Finish or cancel it first.".into(),
        )
        .into());
    }

    let history = suggestion_history(&state.pool).await?;
    let active = input.into_active(Utc::now(), suggester(&history));
    let stored = ActiveWorkoutRepo::create(&state.pool, &active).await?;
    tracing::info!(
        id = stored.id,
        name = %active.name,
        exercises = active.exercises.len(),
        "Active workout started"
    );

    let notified = state.notifier.send(&messages::workout_started(&active)).await;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StartedWorkout {
                workout: stored,
                notified,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /active-workout
// ---------------------------------------------------------------------------

pub async fn get_current(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workout = ActiveWorkoutRepo::find_open(&state.pool).await?;
    Ok(Json(DataResponse {
        data: CurrentWorkout {
            active: workout.is_some(),
            workout,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /active-workout/recalculate-weights
// ---------------------------------------------------------------------------

pub async fn recalculate_weights(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut open = open_workout(&state.pool).await?;
    let history = suggestion_history(&state.pool).await?;

    let updated = open.workout.recalculate_weights(suggester(&history));
    let saved = ActiveWorkoutRepo::save(&state.pool, open.id, &open.workout).await?;
    tracing::info!(id = saved.id, updated, "Suggested weights recalculated");
    Ok(Json(DataResponse {
        data: RecalculatedWeights {
            updated,
            workout: saved,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /active-workout/sets
// ---------------------------------------------------------------------------

pub async fn log_set(
    State(state): State<AppState>,
    Json(input): Json<LogSetRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let mut open = open_workout(&state.pool).await?;

    let exercise = open
        .workout
        .log_set(input.exercise_index, input.set)?
        .clone();
    ActiveWorkoutRepo::save(&state.pool, open.id, &open.workout).await?;
    tracing::info!(
        id = open.id,
        exercise = %exercise.name,
        logged = exercise.logged_sets.len(),
        completed = exercise.completed,
        "Set logged"
    );
    Ok(Json(DataResponse {
        data: LoggedSetResult {
            exercise_index: input.exercise_index,
            exercise,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /active-workout/exercises/{index}/complete
// ---------------------------------------------------------------------------

pub async fn complete_exercise(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<impl IntoResponse> {
    let mut open = open_workout(&state.pool).await?;
    open.workout.complete_exercise(index)?;
    let saved = ActiveWorkoutRepo::save(&state.pool, open.id, &open.workout).await?;
    tracing::info!(id = saved.id, index, "Exercise completed");
    Ok(Json(DataResponse { data: saved }))
}

// ---------------------------------------------------------------------------
// POST /active-workout/finish
// ---------------------------------------------------------------------------

pub async fn finish_workout(
    State(state): State<AppState>,
    input: Option<Json<FinishRequest>>,
) -> AppResult<impl IntoResponse> {
    let notify = input.map_or(true, |Json(req)| req.notify);
    let mut open = open_workout(&state.pool).await?;

    let finished = open.workout.finish(Utc::now());
    ActiveWorkoutRepo::save(&state.pool, open.id, &open.workout).await?;
    let record = WorkoutRepo::create(&state.pool, &finished.workout).await?;
    tracing::info!(
        active_id = open.id,
        workout_id = record.id,
        duration_min = finished.duration_min,
        exercises = record.workout.exercises.len(),
        "Active workout finished"
    );

    let notified = if notify {
        Some(state.notifier.send(&finished.summary).await)
    } else {
        None
    };
    let profile = evaluate_profile(&state.pool, today()).await?;

    Ok(Json(DataResponse {
        data: FinishedResult {
            workout: record,
            duration_min: finished.duration_min,
            completed_exercises: finished.completed_exercises,
            total_exercises: finished.total_exercises,
            summary: finished.summary,
            notified,
            new_achievements: profile.new_achievements,
        },
    }))
}

// ---------------------------------------------------------------------------
// DELETE /active-workout
// ---------------------------------------------------------------------------

pub async fn cancel_workout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let deleted = ActiveWorkoutRepo::delete_open(&state.pool).await?;
    tracing::info!(deleted, "Active workout cancelled");
    Ok(Json(DataResponse {
        data: CancelResult { deleted },
    }))
}
