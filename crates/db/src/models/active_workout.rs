//! Rows of the `active_workouts` table.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use trener_core::active::ActiveWorkout;
use trener_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct ActiveWorkoutRow {
    pub id: DbId,
    pub doc: Json<ActiveWorkout>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredActiveWorkout {
    pub id: DbId,
    #[serde(flatten)]
    pub workout: ActiveWorkout,
    pub updated_at: Timestamp,
}

impl From<ActiveWorkoutRow> for StoredActiveWorkout {
    fn from(row: ActiveWorkoutRow) -> Self {
        Self {
            id: row.id,
            workout: row.doc.0,
            updated_at: row.updated_at,
        }
    }
}
