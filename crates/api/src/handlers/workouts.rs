//! Handlers for the workout history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use trener_core::error::CoreError;
use trener_core::workout::Workout;
use trener_db::models::workout::{StoredWorkout, WorkoutFilter};
use trener_db::repositories::WorkoutRepo;
use trener_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::WorkoutListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Look a workout up by numeric database id, falling back to its ad-hoc key.
async fn resolve(pool: &DbPool, id: &str) -> AppResult<StoredWorkout> {
    if let Ok(numeric) = id.parse::<i64>() {
        if let Some(found) = WorkoutRepo::find_by_id(pool, numeric).await? {
            return Ok(found);
        }
    }
    WorkoutRepo::find_by_key(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Workout",
            id: id.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// GET /workouts
// ---------------------------------------------------------------------------

pub async fn list_workouts(
    State(state): State<AppState>,
    Query(params): Query<WorkoutListParams>,
) -> AppResult<impl IntoResponse> {
    let items = if params.is_empty() {
        WorkoutRepo::list(&state.pool).await?
    } else {
        let filter = WorkoutFilter {
            kind: params.kind,
            from: params.from,
            to: params.to,
            limit: params.limit,
        };
        WorkoutRepo::list_filtered(&state.pool, &filter).await?
    };
    tracing::debug!(count = items.len(), "Listed workouts");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// POST /workouts
// ---------------------------------------------------------------------------

pub async fn create_workout(
    State(state): State<AppState>,
    Json(mut input): Json<Workout>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    input.ensure_key();

    let created = WorkoutRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, kind = %created.workout.kind, "Workout created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /workouts/{id}
// ---------------------------------------------------------------------------

pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let workout = resolve(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: workout }))
}

// ---------------------------------------------------------------------------
// PUT /workouts/{id}
// ---------------------------------------------------------------------------

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<Workout>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let existing = resolve(&state.pool, &id).await?;

    let updated = WorkoutRepo::replace(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Workout",
                id: id.clone(),
            })
        })?;
    tracing::info!(id = updated.id, "Workout replaced");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /workouts/{id}
// ---------------------------------------------------------------------------

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let existing = resolve(&state.pool, &id).await?;
    WorkoutRepo::delete(&state.pool, existing.id).await?;
    tracing::info!(id = existing.id, "Workout deleted");
    Ok(StatusCode::NO_CONTENT)
}
