//! Repository for the `workouts` table.

use chrono::{NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::SqlitePool;
use trener_core::types::DbId;
use trener_core::workout::Workout;

use crate::models::workout::{StoredWorkout, WorkoutFilter, WorkoutRow};

/// Column list for `workouts` queries.
const COLUMNS: &str = "id, key, doc, created_at, updated_at";

/// Newest first; among equal dates the most recently inserted first.
const NEWEST_FIRST: &str = "ORDER BY date DESC, id DESC";

/// Default page size for filtered listing.
const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size for filtered listing.
const MAX_LIMIT: i64 = 100;

pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Insert a workout. The caller assigns the key (see `Workout::ensure_key`).
    pub async fn create(pool: &SqlitePool, workout: &Workout) -> Result<StoredWorkout, sqlx::Error> {
        let key = workout.key.clone().unwrap_or_default();
        let now = Utc::now();
        let query = format!(
            "INSERT INTO workouts (key, kind, date, doc, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(&key)
            .bind(&workout.kind)
            .bind(workout.date)
            .bind(Json(workout))
            .bind(now)
            .bind(now)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE id = ?");
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    pub async fn find_by_key(pool: &SqlitePool, key: &str) -> Result<Option<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE key = ?");
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Every workout, newest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts {NEWEST_FIRST}");
        let rows = sqlx::query_as::<_, WorkoutRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The `limit` most recent workouts, newest first.
    pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts {NEWEST_FIRST} LIMIT ?");
        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Every workout, oldest first.
    pub async fn list_chronological(pool: &SqlitePool) -> Result<Vec<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts ORDER BY date ASC, id ASC");
        let rows = sqlx::query_as::<_, WorkoutRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Filtered listing, newest first. The type filter is case-insensitive.
    pub async fn list_filtered(
        pool: &SqlitePool,
        filter: &WorkoutFilter,
    ) -> Result<Vec<StoredWorkout>, sqlx::Error> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM workouts \
             WHERE (?1 IS NULL OR lower(kind) = lower(?1)) \
               AND (?2 IS NULL OR date >= ?2) \
               AND (?3 IS NULL OR date <= ?3) \
             {NEWEST_FIRST} LIMIT ?4"
        );
        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(filter.kind.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Workouts dated on or after `from`, oldest first.
    pub async fn list_since(pool: &SqlitePool, from: NaiveDate) -> Result<Vec<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts WHERE date >= ? ORDER BY date ASC, id ASC");
        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(from)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The most recent workout.
    pub async fn latest(pool: &SqlitePool) -> Result<Option<StoredWorkout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workouts {NEWEST_FIRST} LIMIT 1");
        let row = sqlx::query_as::<_, WorkoutRow>(&query).fetch_optional(pool).await?;
        Ok(row.map(Into::into))
    }

    /// Replace the document of workout `id`. The stored key is kept unless
    /// the new document carries one.
    pub async fn replace(
        pool: &SqlitePool,
        id: DbId,
        workout: &Workout,
    ) -> Result<Option<StoredWorkout>, sqlx::Error> {
        let query = format!(
            "UPDATE workouts SET \
                key = COALESCE(?, key), \
                kind = ?, \
                date = ?, \
                doc = ?, \
                updated_at = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(workout.key.as_deref().filter(|k| !k.is_empty()))
            .bind(&workout.kind)
            .bind(workout.date)
            .bind(Json(workout))
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Into::into))
    }

    /// Delete a workout. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
