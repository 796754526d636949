//! Repository for the `equipment` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use trener_core::equipment::Equipment;

use crate::models::equipment::{EquipmentRow, StoredEquipment};

const COLUMNS: &str = "id, doc, created_at";

pub struct EquipmentRepo;

impl EquipmentRepo {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<StoredEquipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY id");
        let rows = sqlx::query_as::<_, EquipmentRow>(&query).fetch_all(pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(pool: &SqlitePool, item: &Equipment) -> Result<StoredEquipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (name, doc, created_at) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentRow>(&query)
            .bind(&item.name)
            .bind(Json(item))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    /// Delete everything and insert `items` in one transaction. Returns the
    /// number inserted.
    pub async fn replace_all(pool: &SqlitePool, items: &[Equipment]) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM equipment").execute(&mut *tx).await?;

        let now = Utc::now();
        for item in items {
            sqlx::query("INSERT INTO equipment (name, doc, created_at) VALUES (?, ?, ?)")
                .bind(&item.name)
                .bind(Json(item))
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::debug!(count = items.len(), "Equipment catalogue replaced");
        Ok(items.len())
    }
}
