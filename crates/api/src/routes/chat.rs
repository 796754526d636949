//! Route definitions for the conversational endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST   /            -> chat
/// POST   /log         -> log_sets
/// GET    /log         -> get_chat_workout
/// DELETE /log         -> discard_chat_workout
/// POST   /log/finish  -> finish_chat_workout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat::chat))
        .route(
            "/log",
            post(chat::log_sets)
                .get(chat::get_chat_workout)
                .delete(chat::discard_chat_workout),
        )
        .route("/log/finish", post(chat::finish_chat_workout))
}
