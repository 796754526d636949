//! Rows of the `chat_workouts` table.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use trener_core::set_parser::ChatWorkout;
use trener_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct ChatWorkoutRow {
    pub id: DbId,
    pub doc: Json<ChatWorkout>,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredChatWorkout {
    pub id: DbId,
    #[serde(flatten)]
    pub workout: ChatWorkout,
    pub updated_at: Timestamp,
}

impl From<ChatWorkoutRow> for StoredChatWorkout {
    fn from(row: ChatWorkoutRow) -> Self {
        Self {
            id: row.id,
            workout: row.doc.0,
            updated_at: row.updated_at,
        }
    }
}
