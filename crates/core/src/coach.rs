//! Prompts for the conversational coach and the AI insight summary.

use serde::Serialize;

use crate::stats::{PersonalRecord, WeekSummary, WeeklyComparison};
use crate::types::TrainingDate;
use crate::workout::format_kg;

/// History messages forwarded to the model.
pub const MAX_HISTORY_MESSAGES: usize = 6;

/// Model rounds per chat request, tool calls included.
pub const MAX_TOOL_ROUNDS: usize = 4;

/// Personal records included in the user context.
const CONTEXT_RECORDS: usize = 5;

pub const CHAT_FALLBACK: &str = "Oops, something went wrong. Could you rephrase your question?";

pub const INSIGHT_FALLBACK: &str =
    "Keep training! I'm still collecting data to give you better insights.";

pub const INSIGHT_SYSTEM_PROMPT: &str =
    "You are a friendly, motivating fitness coach. Short and direct answers.";

/// Snapshot of the user handed to the model as context.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserContext {
    pub total_workouts: usize,
    pub days_trained: usize,
    pub current_streak: u32,
    pub week: Option<WeekSummary>,
    pub level: u32,
    pub level_title: String,
    pub xp: u32,
    pub last_workout: Option<(String, TrainingDate)>,
    pub records: Vec<PersonalRecord>,
}

impl UserContext {
    fn records_line(&self) -> String {
        if self.records.is_empty() {
            return "none".to_string();
        }
        self.records
            .iter()
            .take(CONTEXT_RECORDS)
            .map(|p| format!("{}: {}kg", p.exercise, format_kg(p.weight_kg)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn week_line(&self) -> String {
        match &self.week {
            Some(w) => {
                let groups = if w.muscle_groups.is_empty() {
                    "none".to_string()
                } else {
                    w.muscle_groups.join(", ")
                };
                format!(
                    "{} workouts, {} sets (groups: {})",
                    w.workouts, w.total_sets, groups
                )
            }
            None => "no workouts".to_string(),
        }
    }

    pub fn render(&self) -> String {
        let last = match &self.last_workout {
            Some((name, date)) => format!("{name} ({date})"),
            None => "none".to_string(),
        };
        format!(
            "USER DATA:\n\
             - Total workouts: {}\n\
             - Days trained: {}\n\
             - Current streak: {}\n\
             - This week: {}\n\
             - Level: {} - {} ({} XP)\n\
             - Last workout: {}\n\
             - PRs: {}\n",
            self.total_workouts,
            self.days_trained,
            self.current_streak,
            self.week_line(),
            self.level,
            self.level_title,
            self.xp,
            last,
            self.records_line(),
        )
    }
}

/// System prompt of the tool-calling chat.
pub fn chat_system_prompt(context: &UserContext, today: TrainingDate) -> String {
    format!(
        "You are Trener AI, a personal training assistant and expert in fitness, \
         nutrition and strength training. Answer in a friendly, concise way.\n\
         Today is {today}. Use the available tools to look up the user's training \
         history whenever a question depends on it; never invent numbers.\n\
         If the user wants a new routine, ask which kind of workout they want.\n\n{}",
        context.render()
    )
}

/// Prompt of the AI insight summary.
pub fn insight_prompt(context: &UserContext, comparison: &WeeklyComparison) -> String {
    format!(
        "Based on this data, write a short summary (3-4 lines at most) with one \
         motivating insight and one practical suggestion. Be direct and personal.\n\n\
         {}- Change vs last week: {}% workouts, {}% volume\n",
        context.render(),
        comparison.change.workouts,
        comparison.change.volume
    )
}
