//! Route definitions for the `/equipment` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::equipment;
use crate::state::AppState;

/// Routes mounted at `/equipment`.
///
/// ```text
/// GET  /      -> list_equipment
/// POST /      -> create_equipment
/// POST /seed  -> seed_equipment (replaces the catalogue)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/seed", post(equipment::seed_equipment))
}
