//! Rows of the `user_profiles` and `achievement_unlocks` tables.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use trener_core::gamification::UserProfile;
use trener_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: String,
    pub xp: i64,
    pub unlocked_achievements: Json<Vec<String>>,
    pub created_at: Timestamp,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            xp: u32::try_from(row.xp).unwrap_or(0),
            unlocked_achievements: row.unlocked_achievements.0,
            created_at: row.created_at,
        }
    }
}

/// A row from the `achievement_unlocks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AchievementUnlock {
    pub id: DbId,
    pub user_id: String,
    pub achievement_id: String,
    pub xp: i64,
    pub unlocked_at: Timestamp,
}
