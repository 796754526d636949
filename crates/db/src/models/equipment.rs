//! Rows of the `equipment` table.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use trener_core::equipment::Equipment;
use trener_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: DbId,
    pub doc: Json<Equipment>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEquipment {
    pub id: DbId,
    #[serde(flatten)]
    pub equipment: Equipment,
}

impl From<EquipmentRow> for StoredEquipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id,
            equipment: row.doc.0,
        }
    }
}
