//! Route definitions for the `/active-workout` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::active_workout;
use crate::state::AppState;

/// Routes mounted at `/active-workout`.
///
/// ```text
/// GET    /                           -> get_current
/// DELETE /                           -> cancel_workout
/// POST   /start                      -> start_workout
/// PUT    /recalculate-weights        -> recalculate_weights
/// PUT    /sets                       -> log_set
/// PUT    /exercises/{index}/complete -> complete_exercise
/// POST   /finish                     -> finish_workout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(active_workout::get_current).delete(active_workout::cancel_workout),
        )
        .route("/start", post(active_workout::start_workout))
        .route(
            "/recalculate-weights",
            put(active_workout::recalculate_weights),
        )
        .route("/sets", put(active_workout::log_set))
        .route(
            "/exercises/{index}/complete",
            put(active_workout::complete_exercise),
        )
        .route("/finish", post(active_workout::finish_workout))
}
