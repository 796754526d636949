//! Keyword intent detection for the bot and the chat.

use serde::Serialize;

/// What a bot message asks for. Variants are listed in match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BotIntent {
    WeekSummary,
    Streak,
    PersonalRecords,
    LastWorkout,
    Stats,
    GenerateRoutine,
    Gamification,
    Help,
}

impl BotIntent {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeekSummary => "week_summary",
            Self::Streak => "streak",
            Self::PersonalRecords => "personal_records",
            Self::LastWorkout => "last_workout",
            Self::Stats => "stats",
            Self::GenerateRoutine => "generate_routine",
            Self::Gamification => "gamification",
            Self::Help => "help",
        }
    }
}

const WEEK_WORDS: &[&str] = &["week", "weekly"];
const STREAK_WORDS: &[&str] = &["streak", "consecutive", "in a row"];
const RECORD_WORDS: &[&str] = &["pr", "prs", "record", "records", "best", "max", "heaviest"];
const LAST_WORDS: &[&str] = &["last", "latest", "recent", "today", "yesterday"];
const STATS_WORDS: &[&str] = &["stats", "statistics", "total", "totals"];
const GENERATE_WORDS: &[&str] = &["generate", "routine", "create"];
const GAMIFICATION_WORDS: &[&str] = &[
    "achievement",
    "achievements",
    "badge",
    "badges",
    "level",
    "xp",
    "gamification",
];

/// Lowercase alphanumeric words of a message.
fn words(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Single keywords match whole words; phrases match as substrings.
fn mentions(message: &str, words: &[String], keywords: &[&str]) -> bool {
    keywords.iter().any(|k| {
        if k.contains(' ') {
            message.contains(k)
        } else {
            words.iter().any(|w| w == k)
        }
    })
}

pub fn detect_bot_intent(message: &str) -> BotIntent {
    let lower = message.to_lowercase();
    let tokens = words(&lower);
    let has = |keywords: &[&str]| mentions(&lower, &tokens, keywords);

    if has(WEEK_WORDS) {
        BotIntent::WeekSummary
    } else if has(STREAK_WORDS) {
        BotIntent::Streak
    } else if has(RECORD_WORDS) {
        BotIntent::PersonalRecords
    } else if has(LAST_WORDS) {
        BotIntent::LastWorkout
    } else if has(STATS_WORDS) {
        BotIntent::Stats
    } else if has(GENERATE_WORDS) {
        BotIntent::GenerateRoutine
    } else if has(GAMIFICATION_WORDS) {
        BotIntent::Gamification
    } else {
        BotIntent::Help
    }
}

/// Workout type hinted by a message; `full` when nothing matches.
pub fn suggested_type(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    let tokens = words(&lower);
    let has = |keywords: &[&str]| mentions(&lower, &tokens, keywords);

    if has(&["push", "chest"]) {
        "push"
    } else if has(&["pull", "back"]) {
        "pull"
    } else if has(&["leg", "legs", "leg day"]) {
        "legs"
    } else {
        "full"
    }
}

// ---------------------------------------------------------------------------
// Chat routine requests
// ---------------------------------------------------------------------------

const ROUTINE_VERBS: &[&str] = &["generate", "create", "make", "give", "build"];
const ROUTINE_NOUNS: &[&str] = &["routine", "workout", "session"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineAsk {
    pub kind: &'static str,
    pub duration_min: u32,
    pub level: &'static str,
}

/// `Some` when the message asks for a new routine (a creation verb together
/// with a routine noun).
pub fn detect_routine_request(message: &str) -> Option<RoutineAsk> {
    let lower = message.to_lowercase();
    let tokens = words(&lower);
    let has = |keywords: &[&str]| mentions(&lower, &tokens, keywords);

    if !(has(ROUTINE_VERBS) && has(ROUTINE_NOUNS)) {
        return None;
    }

    let duration_min = if has(&["30", "30min", "half an hour"]) {
        30
    } else if has(&["60", "60min", "an hour", "one hour", "1 hour"]) {
        60
    } else {
        45
    };

    let level = if has(&["beginner", "basic", "easy"]) {
        "beginner"
    } else if has(&["advanced", "hard", "intense"]) {
        "advanced"
    } else {
        "intermediate"
    };

    Some(RoutineAsk {
        kind: suggested_type(message),
        duration_min,
        level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_follow_priority() {
        assert_eq!(detect_bot_intent("What did I train this week?"), BotIntent::WeekSummary);
        // "week" beats "streak".
        assert_eq!(detect_bot_intent("streak this week"), BotIntent::WeekSummary);
        assert_eq!(detect_bot_intent("How long is my streak?"), BotIntent::Streak);
        assert_eq!(detect_bot_intent("show my PRs"), BotIntent::PersonalRecords);
        assert_eq!(detect_bot_intent("last workout"), BotIntent::LastWorkout);
        assert_eq!(detect_bot_intent("my stats please"), BotIntent::Stats);
        assert_eq!(detect_bot_intent("generate a push routine"), BotIntent::GenerateRoutine);
        assert_eq!(detect_bot_intent("what level am I"), BotIntent::Gamification);
        assert_eq!(detect_bot_intent("hello"), BotIntent::Help);
    }

    #[test]
    fn keywords_match_whole_words() {
        // "press" and "progress" must not trigger the records intent.
        assert_eq!(detect_bot_intent("bench press progress"), BotIntent::Help);
    }

    #[test]
    fn suggested_type_from_keywords() {
        assert_eq!(suggested_type("chest day"), "push");
        assert_eq!(suggested_type("something for my back"), "pull");
        assert_eq!(suggested_type("leg day"), "legs");
        assert_eq!(suggested_type("anything"), "full");
        assert_eq!(suggested_type("shoulder workout"), "full");
    }

    #[test]
    fn routine_request_needs_verb_and_noun() {
        assert!(detect_routine_request("tell me about routines").is_none());
        assert!(detect_routine_request("create something").is_none());

        let ask = detect_routine_request("Create a 30 minute beginner leg workout").unwrap();
        assert_eq!(
            ask,
            RoutineAsk {
                kind: "legs",
                duration_min: 30,
                level: "beginner"
            }
        );

        let ask = detect_routine_request("give me an intense push routine for an hour").unwrap();
        assert_eq!(ask.kind, "push");
        assert_eq!(ask.duration_min, 60);
        assert_eq!(ask.level, "advanced");

        let ask = detect_routine_request("make me a workout").unwrap();
        assert_eq!((ask.kind, ask.duration_min, ask.level), ("full", 45, "intermediate"));
    }
}
