//! Rows of the `workouts` table.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use trener_core::types::{DbId, Timestamp};
use trener_core::workout::Workout;

/// A row from the `workouts` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: DbId,
    pub key: String,
    pub doc: Json<Workout>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A persisted workout: the document plus its database id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredWorkout {
    pub id: DbId,
    #[serde(flatten)]
    pub workout: Workout,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WorkoutRow> for StoredWorkout {
    fn from(row: WorkoutRow) -> Self {
        let mut workout = row.doc.0;
        workout.key = Some(row.key);
        Self {
            id: row.id,
            workout,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Filters for listing workouts. All bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    pub kind: Option<String>,
    pub from: Option<chrono::NaiveDate>,
    pub to: Option<chrono::NaiveDate>,
    pub limit: Option<i64>,
}
