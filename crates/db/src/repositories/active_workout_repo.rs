//! Repository for the `active_workouts` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use trener_core::active::ActiveWorkout;
use trener_core::types::DbId;

use crate::models::active_workout::{ActiveWorkoutRow, StoredActiveWorkout};

const COLUMNS: &str = "id, doc, created_at, updated_at";

pub struct ActiveWorkoutRepo;

impl ActiveWorkoutRepo {
    /// The open (not completed) active workout, if any.
    pub async fn find_open(pool: &SqlitePool) -> Result<Option<StoredActiveWorkout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM active_workouts WHERE completed = 0 ORDER BY id DESC LIMIT 1"
        );
        let row = sqlx::query_as::<_, ActiveWorkoutRow>(&query)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn create(
        pool: &SqlitePool,
        workout: &ActiveWorkout,
    ) -> Result<StoredActiveWorkout, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO active_workouts (completed, doc, created_at, updated_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveWorkoutRow>(&query)
            .bind(workout.completed)
            .bind(Json(workout))
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    /// Overwrite the document (and its completed flag).
    pub async fn save(
        pool: &SqlitePool,
        id: DbId,
        workout: &ActiveWorkout,
    ) -> Result<StoredActiveWorkout, sqlx::Error> {
        let query = format!(
            "UPDATE active_workouts SET completed = ?, doc = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveWorkoutRow>(&query)
            .bind(workout.completed)
            .bind(Json(workout))
            .bind(Utc::now())
            .bind(id)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    /// Delete every open active workout. Returns the number removed.
    pub async fn delete_open(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM active_workouts WHERE completed = 0")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
