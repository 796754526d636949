//! Loading training history and deriving what several endpoints share:
//! weight suggestions, the streak, the gamification profile and the user
//! context handed to the model.

use chrono::Duration;
use sqlx::SqlitePool;
use trener_core::coach::UserContext;
use trener_core::gamification::{AchievementStats, ProfileReport, DEFAULT_USER_ID};
use trener_core::stats::{general_stats, personal_records, week_start, week_summary, TOP_RECORDS};
use trener_core::streak::{compute_streak, Streak, STREAK_WINDOW};
use trener_core::types::TrainingDate;
use trener_core::weights::{suggest_weight, HISTORY_WINDOW};
use trener_core::workout::{Weight, Workout};
use trener_db::models::workout::StoredWorkout;
use trener_db::repositories::{ProfileRepo, WorkoutRepo};

fn documents(stored: Vec<StoredWorkout>) -> Vec<Workout> {
    stored.into_iter().map(|s| s.workout).collect()
}

/// The window scanned by weight suggestions, newest first.
pub async fn suggestion_history(pool: &SqlitePool) -> Result<Vec<Workout>, sqlx::Error> {
    Ok(documents(WorkoutRepo::list_recent(pool, HISTORY_WINDOW).await?))
}

/// Every workout, oldest first.
pub async fn chronological(pool: &SqlitePool) -> Result<Vec<Workout>, sqlx::Error> {
    Ok(documents(WorkoutRepo::list_chronological(pool).await?))
}

/// Workouts of the current and the previous calendar week, oldest first.
pub async fn last_two_weeks(pool: &SqlitePool, today: TrainingDate) -> Result<Vec<Workout>, sqlx::Error> {
    let from = week_start(today) - Duration::days(7);
    Ok(documents(WorkoutRepo::list_since(pool, from).await?))
}

/// Bind a suggestion lookup to already loaded history.
pub fn suggester(history: &[Workout]) -> impl Fn(&str, &[String]) -> Weight + '_ {
    move |name, groups| suggest_weight(name, groups, history)
}

pub async fn current_streak(pool: &SqlitePool, today: TrainingDate) -> Result<Streak, sqlx::Error> {
    let recent = WorkoutRepo::list_recent(pool, STREAK_WINDOW).await?;
    Ok(compute_streak(recent.iter().map(|w| w.workout.date), today))
}

/// Recompute achievement stats, persist any new unlocks and report the
/// profile.
pub async fn evaluate_profile(
    pool: &SqlitePool,
    today: TrainingDate,
) -> Result<ProfileReport, sqlx::Error> {
    let workouts = chronological(pool).await?;
    let streak = current_streak(pool, today).await?;
    let stats = AchievementStats::from_history(&workouts, streak.current_streak);

    let mut profile = ProfileRepo::get_or_create(pool, DEFAULT_USER_ID).await?;
    let unlocked = profile.evaluate(&stats);
    if !unlocked.is_empty() {
        ProfileRepo::save_unlocks(pool, &profile, &unlocked).await?;
        tracing::info!(
            count = unlocked.len(),
            xp = profile.xp,
            "Achievements unlocked"
        );
    }
    Ok(ProfileReport::new(&profile, &unlocked))
}

/// Summary of the user for model prompts.
pub async fn user_context(pool: &SqlitePool, today: TrainingDate) -> Result<UserContext, sqlx::Error> {
    let workouts = chronological(pool).await?;
    let streak = current_streak(pool, today).await?;
    let profile = evaluate_profile(pool, today).await?;
    let general = general_stats(&workouts);

    Ok(UserContext {
        total_workouts: general.total_workouts,
        days_trained: general.days_trained,
        current_streak: streak.current_streak,
        week: (!workouts.is_empty()).then(|| week_summary(&workouts, today)),
        level: profile.level,
        level_title: profile.title,
        xp: profile.xp,
        last_workout: workouts.last().map(|w| (w.name.clone(), w.date)),
        records: personal_records(&workouts, TOP_RECORDS),
    })
}
