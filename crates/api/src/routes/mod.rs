pub mod active_workout;
pub mod chat;
pub mod equipment;
pub mod health;
pub mod insights;
pub mod workouts;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workouts                                   list, create
/// /workouts/{id}                              get, replace, delete
///
/// /stats                                      general stats (GET)
/// /weights/suggest                            weight suggestion (GET)
/// /routines/generate                          AI routine (POST)
///
/// /active-workout                             current, cancel (GET, DELETE)
/// /active-workout/start                       start (POST)
/// /active-workout/recalculate-weights         recalculate (PUT)
/// /active-workout/sets                        log set (PUT)
/// /active-workout/exercises/{index}/complete  complete exercise (PUT)
/// /active-workout/finish                      finish (POST)
///
/// /equipment                                  list, create
/// /equipment/seed                             replace catalogue (POST)
///
/// /gamification/profile                       level, xp, new unlocks
/// /gamification/achievements                  catalogue and unlock log
///
/// /progress/exercises/{name}                  progression and trend
/// /progress/volume                            weekly volume
/// /progress/muscle-groups                     load per group
/// /progress/frequent-exercises                most performed
///
/// /metrics/one-rep-max                        estimated 1RM
/// /metrics/weekly-comparison                  this week vs last
/// /metrics/insights                           AI summary
///
/// /bot/query                                  keyword bot (POST)
/// /chat                                       LLM chat (POST)
/// /chat/log                                   set log: log, current, discard
/// /chat/log/finish                            persist set log (POST)
///
/// /notifications/test                         test message (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Workout history.
        .nest("/workouts", workouts::router())
        .route("/stats", get(handlers::stats::get_stats))
        .route("/weights/suggest", get(handlers::weights::suggest_weight))
        .route(
            "/routines/generate",
            post(handlers::routines::generate_routine),
        )
        // In-progress workout.
        .nest("/active-workout", active_workout::router())
        .nest("/equipment", equipment::router())
        // Derived views.
        .nest("/gamification", insights::gamification_router())
        .nest("/progress", insights::progress_router())
        .nest("/metrics", insights::metrics_router())
        // Conversational endpoints.
        .route("/bot/query", post(handlers::bot::query_bot))
        .nest("/chat", chat::router())
        .route(
            "/notifications/test",
            post(handlers::notifications::send_test),
        )
}
