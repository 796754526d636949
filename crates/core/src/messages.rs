//! Text sent to the chat room and returned by the keyword bot.

use crate::active::ActiveWorkout;
use crate::gamification::ProfileReport;
use crate::stats::{GeneralStats, PersonalRecord, WeekSummary};
use crate::streak::Streak;
use crate::workout::{format_kg, Workout};

/// Personal records listed in a bot reply.
const RECORDS_IN_REPLY: usize = 5;

pub const TEST_MESSAGE: &str = "Test message from Trener: connection OK!";

pub const HELP_REPLY: &str = "I can help with:\n\
• \"What did I train this week?\"\n\
• \"What's my streak?\"\n\
• \"My personal records\"\n\
• \"Last workout\"\n\
• \"My stats\"\n\
• \"My achievements\"\n\
• \"Generate a push routine\"";

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

pub fn workout_started(active: &ActiveWorkout) -> String {
    let mut msg = format!(
        "New workout started!\n\n{}\nDate: {}\nGroups: {}\n\nExercises:\n",
        active.name,
        active.date,
        active.muscle_groups.join(", ")
    );
    for (i, e) in active.exercises.iter().enumerate() {
        msg.push_str(&format!(
            "\n{}. {}\n   → {} sets x {} reps @ {}\n",
            i + 1,
            e.name,
            e.planned_sets,
            e.target_reps,
            e.suggested_weight
        ));
    }
    msg.push_str("\nLet's go!");
    msg
}

pub fn workout_finished(active: &ActiveWorkout, duration_min: u32) -> String {
    let mut msg = format!(
        "Workout completed: {}\nDate: {}\nDuration: {} minutes\nGroups: {}\n\nExercises done:\n",
        active.name,
        active.date,
        duration_min,
        active.muscle_groups.join(", ")
    );
    for e in active.exercises.iter().filter(|e| !e.logged_sets.is_empty()) {
        msg.push_str(&format!("\n• {}: {} sets\n", e.name, e.logged_sets.len()));
        for (i, s) in e.logged_sets.iter().enumerate() {
            msg.push_str(&format!(
                "  Set {}: {} reps @ {}kg\n",
                i + 1,
                s.reps,
                format_kg(s.weight_kg)
            ));
        }
    }
    msg
}

// ---------------------------------------------------------------------------
// Bot replies
// ---------------------------------------------------------------------------

pub fn week_summary_reply(week: &WeekSummary) -> String {
    let groups = if week.muscle_groups.is_empty() {
        "none yet".to_string()
    } else {
        week.muscle_groups.join(", ")
    };
    format!(
        "**This week:**\n• Workouts: {}\n• Groups trained: {}\n• Total sets: {}\n• Days left: {}",
        week.workouts, groups, week.total_sets, week.days_left
    )
}

pub fn streak_reply(streak: &Streak) -> String {
    if streak.current_streak > 0 {
        format!(
            "You're on a streak of **{} workouts**! Keep it up",
            streak.current_streak
        )
    } else {
        "No active streak. Time to train!".to_string()
    }
}

pub fn records_reply(records: &[PersonalRecord]) -> String {
    if records.is_empty() {
        return "I don't have any weights recorded yet.".to_string();
    }
    let mut msg = String::from("**Your best lifts:**\n");
    for (i, pr) in records.iter().take(RECORDS_IN_REPLY).enumerate() {
        msg.push_str(&format!(
            "{}. {}: **{}kg** ({})\n",
            i + 1,
            pr.exercise,
            format_kg(pr.weight_kg),
            pr.date
        ));
    }
    msg
}

pub fn last_workout_reply(last: Option<&Workout>) -> String {
    match last {
        Some(w) => format!(
            "**Last workout:** {}\nDate: {}\nGroups: {}\nExercises: {}",
            w.name,
            w.date,
            w.muscle_groups.join(", "),
            w.exercises.len()
        ),
        None => "I couldn't find any recorded workouts.".to_string(),
    }
}

pub fn stats_reply(stats: &GeneralStats) -> String {
    format!(
        "**Overall stats:**\n• Total workouts: {}\n• Unique exercises: {}\n• Days trained: {}",
        stats.total_workouts, stats.unique_exercises, stats.days_trained
    )
}

pub fn generate_hint_reply(kind: &str) -> String {
    format!(
        "To generate a **{kind}** routine, open the generator page or ask the chat, \
         e.g. \"create a 45 minute {kind} workout\". Tell me your goal, duration and level."
    )
}

pub fn gamification_reply(profile: &ProfileReport) -> String {
    let mut msg = format!(
        "**Your profile:**\n• Level: {} ({})\n• XP: {}/{}\n• Achievements: {}/{}",
        profile.level,
        profile.title,
        profile.xp,
        profile.xp_next_level,
        profile.unlocked_achievements.len(),
        profile.total_achievements
    );
    if !profile.unlocked_achievements.is_empty() {
        let start = profile.unlocked_achievements.len().saturating_sub(3);
        msg.push_str(&format!(
            "\nLatest: {}",
            profile.unlocked_achievements[start..].join(", ")
        ));
    }
    msg
}
