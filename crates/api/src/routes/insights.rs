//! Route definitions for gamification, progress charts and metrics.

use axum::routing::get;
use axum::Router;

use crate::handlers::{gamification, metrics, progress};
use crate::state::AppState;

/// Routes mounted at `/gamification`.
///
/// ```text
/// GET /profile       -> get_profile
/// GET /achievements  -> list_achievements
/// ```
pub fn gamification_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(gamification::get_profile))
        .route("/achievements", get(gamification::list_achievements))
}

/// Routes mounted at `/progress`.
///
/// ```text
/// GET /exercises/{name}     -> get_exercise_progress
/// GET /volume               -> get_weekly_volume
/// GET /muscle-groups        -> get_muscle_groups
/// GET /frequent-exercises   -> get_frequent_exercises (?limit=)
/// ```
pub fn progress_router() -> Router<AppState> {
    Router::new()
        .route("/exercises/{name}", get(progress::get_exercise_progress))
        .route("/volume", get(progress::get_weekly_volume))
        .route("/muscle-groups", get(progress::get_muscle_groups))
        .route(
            "/frequent-exercises",
            get(progress::get_frequent_exercises),
        )
}

/// Routes mounted at `/metrics`.
///
/// ```text
/// GET /one-rep-max        -> get_one_rep_max
/// GET /weekly-comparison  -> get_weekly_comparison
/// GET /insights           -> get_insights
/// ```
pub fn metrics_router() -> Router<AppState> {
    Router::new()
        .route("/one-rep-max", get(metrics::get_one_rep_max))
        .route("/weekly-comparison", get(metrics::get_weekly_comparison))
        .route("/insights", get(metrics::get_insights))
}
