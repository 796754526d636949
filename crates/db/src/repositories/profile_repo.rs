//! Repository for `user_profiles` and `achievement_unlocks`.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use trener_core::gamification::{Achievement, UserProfile};

use crate::models::profile::{AchievementUnlock, ProfileRow};

const PROFILE_COLUMNS: &str = "user_id, xp, unlocked_achievements, created_at";

const UNLOCK_COLUMNS: &str = "id, user_id, achievement_id, xp, unlocked_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Load the profile, creating an empty one on first access.
    pub async fn get_or_create(pool: &SqlitePool, user_id: &str) -> Result<UserProfile, sqlx::Error> {
        let now = Utc::now();
        sqlx::query(
            "INSERT OR IGNORE INTO user_profiles \
                (user_id, xp, unlocked_achievements, created_at, updated_at) \
             VALUES (?, 0, '[]', ?, ?)",
        )
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = ?");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map(Into::into)
    }

    /// Persist XP and unlocks, and log the new unlocks, in one transaction.
    pub async fn save_unlocks(
        pool: &SqlitePool,
        profile: &UserProfile,
        unlocked: &[&Achievement],
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE user_profiles SET xp = ?, unlocked_achievements = ?, updated_at = ? \
             WHERE user_id = ?",
        )
        .bind(i64::from(profile.xp))
        .bind(Json(&profile.unlocked_achievements))
        .bind(now)
        .bind(&profile.user_id)
        .execute(&mut *tx)
        .await?;

        for achievement in unlocked {
            sqlx::query(
                "INSERT OR IGNORE INTO achievement_unlocks \
                    (user_id, achievement_id, xp, unlocked_at) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(&profile.user_id)
            .bind(achievement.id)
            .bind(i64::from(achievement.xp))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Unlock log, oldest first.
    pub async fn list_unlocks(
        pool: &SqlitePool,
        user_id: &str,
    ) -> Result<Vec<AchievementUnlock>, sqlx::Error> {
        let query = format!(
            "SELECT {UNLOCK_COLUMNS} FROM achievement_unlocks WHERE user_id = ? ORDER BY id"
        );
        sqlx::query_as::<_, AchievementUnlock>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
