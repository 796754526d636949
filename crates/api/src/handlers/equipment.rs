//! Handlers for the gym equipment catalogue.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use trener_core::equipment::{default_catalogue, Equipment};
use trener_db::repositories::EquipmentRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub inserted: usize,
}

/// GET /equipment
pub async fn list_equipment(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /equipment
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(input): Json<Equipment>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let created = EquipmentRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, name = %input.name, "Equipment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /equipment/seed -- replace the catalogue with the default gym.
pub async fn seed_equipment(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let inserted = EquipmentRepo::replace_all(&state.pool, &default_catalogue()).await?;
    tracing::info!(inserted, "Equipment catalogue seeded");
    Ok(Json(DataResponse {
        data: SeedResult { inserted },
    }))
}
