//! Repository for the `chat_workouts` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use trener_core::set_parser::ChatWorkout;
use trener_core::types::DbId;

use crate::models::chat_workout::{ChatWorkoutRow, StoredChatWorkout};

const COLUMNS: &str = "id, doc, updated_at";

pub struct ChatWorkoutRepo;

impl ChatWorkoutRepo {
    pub async fn find_open(pool: &SqlitePool) -> Result<Option<StoredChatWorkout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_workouts WHERE completed = 0 ORDER BY id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, ChatWorkoutRow>(&query)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create(pool: &SqlitePool, workout: &ChatWorkout) -> Result<StoredChatWorkout, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO chat_workouts (completed, doc, created_at, updated_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatWorkoutRow>(&query)
            .bind(workout.completed)
            .bind(Json(workout))
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    pub async fn save(
        pool: &SqlitePool,
        id: DbId,
        workout: &ChatWorkout,
    ) -> Result<StoredChatWorkout, sqlx::Error> {
        let query = format!(
            "UPDATE chat_workouts SET completed = ?, doc = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatWorkoutRow>(&query)
            .bind(workout.completed)
            .bind(Json(workout))
            .bind(Utc::now())
            .bind(id)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    pub async fn delete_open(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chat_workouts WHERE completed = 0")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
