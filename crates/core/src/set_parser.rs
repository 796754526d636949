//! Free-text set logging.
//!
//! A message like `"bench 3x8 at 60kg"` is turned into structured sets by the
//! model with [`PARSER_PROMPT`]; the exercise name is then canonicalised
//! through a static synonym table and the sets are appended to the
//! chat-logged workout.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::reply::parse_json_reply;
use crate::types::{Timestamp, TrainingDate};
use crate::workout::{format_kg, generate_key, sum_sets, Exercise, Reps, Weight, Workout};

pub const PARSER_PROMPT: &str = "You convert gym log messages into JSON. \
Reply with ONLY a JSON object of the form \
{\"exercise\": string, \"sets\": [{\"weight_kg\": number, \"reps\": integer}]}. \
Expand shorthand like \"3x8\" into one entry per set. Use 0 for bodyweight sets. \
Keep the exercise name as the user wrote it.";

/// Reply when the model output cannot be decoded.
pub const REPHRASE_REPLY: &str =
    "I couldn't understand that. Please rephrase, e.g. \"bench 3x8 at 60kg\".";

/// Lowercase alias -> canonical exercise name.
const SYNONYMS: &[(&str, &str)] = &[
    ("bench", "Bench Press"),
    ("bench press", "Bench Press"),
    ("bp", "Bench Press"),
    ("incline bench", "Incline Bench Press"),
    ("incline", "Incline Bench Press"),
    ("ohp", "Overhead Press"),
    ("military press", "Overhead Press"),
    ("shoulder press", "Overhead Press"),
    ("squat", "Squat"),
    ("squats", "Squat"),
    ("back squat", "Squat"),
    ("front squat", "Front Squat"),
    ("deadlift", "Deadlift"),
    ("dl", "Deadlift"),
    ("deads", "Deadlift"),
    ("rdl", "Romanian Deadlift"),
    ("romanian", "Romanian Deadlift"),
    ("row", "Barbell Row"),
    ("rows", "Barbell Row"),
    ("bb row", "Barbell Row"),
    ("db row", "Dumbbell Row"),
    ("pullup", "Pull Up"),
    ("pullups", "Pull Up"),
    ("pull-up", "Pull Up"),
    ("pull ups", "Pull Up"),
    ("chinup", "Chin Up"),
    ("chinups", "Chin Up"),
    ("lat pulldown", "Lat Pulldown"),
    ("pulldown", "Lat Pulldown"),
    ("curl", "Biceps Curl"),
    ("curls", "Biceps Curl"),
    ("bicep curl", "Biceps Curl"),
    ("hammer", "Hammer Curl"),
    ("dips", "Dips"),
    ("pushdown", "Triceps Pushdown"),
    ("skullcrusher", "Skull Crusher"),
    ("skullcrushers", "Skull Crusher"),
    ("lateral raise", "Lateral Raise"),
    ("laterals", "Lateral Raise"),
    ("face pull", "Face Pull"),
    ("leg press", "Leg Press"),
    ("leg ext", "Leg Extension"),
    ("leg curl", "Leg Curl"),
    ("hip thrust", "Hip Thrust"),
    ("calf raise", "Calf Raise"),
    ("calves", "Calf Raise"),
];

/// Canonical name for a user-supplied exercise name. Unknown names are
/// title-cased.
pub fn canonical_name(raw: &str) -> String {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(&normalized))
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Parsed reply
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParsedSet {
    #[serde(default)]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub weight_kg: f64,
    #[validate(range(max = 1000, message = "at most 1000 reps"))]
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ParsedSets {
    pub exercise: String,
    #[serde(default)]
    #[validate(nested)]
    pub sets: Vec<ParsedSet>,
}

/// Decode the model reply and canonicalise the exercise name. A reply with
/// no exercise or no sets is rejected like undecodable JSON.
pub fn parse_sets_reply(raw: &str) -> Result<ParsedSets, CoreError> {
    let mut parsed: ParsedSets = parse_json_reply(raw)?;
    if parsed.exercise.trim().is_empty() || parsed.sets.is_empty() {
        return Err(CoreError::Validation("model reply has no exercise or sets".into()));
    }
    parsed.validate()?;
    parsed.exercise = canonical_name(&parsed.exercise);
    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Chat-logged workout
// ---------------------------------------------------------------------------

/// The in-progress workout assembled from chat messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatWorkout {
    pub date: TrainingDate,
    pub started_at: Timestamp,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub completed: bool,
}

impl ChatWorkout {
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            date: started_at.date_naive(),
            started_at,
            exercises: Vec::new(),
            completed: false,
        }
    }

    /// Append parsed sets, extending the exercise if it was already logged.
    /// Returns the updated exercise.
    pub fn add(&mut self, parsed: &ParsedSets) -> &Exercise {
        let index = match self.exercises.iter().position(|e| e.name == parsed.exercise) {
            Some(i) => i,
            None => {
                self.exercises.push(Exercise {
                    name: parsed.exercise.clone(),
                    sets: 0,
                    reps: Reps::PerSet(Vec::new()),
                    weight_kg: Weight::PerSet(Vec::new()),
                });
                self.exercises.len() - 1
            }
        };

        let exercise = &mut self.exercises[index];
        let mut reps = match &exercise.reps {
            Reps::PerSet(r) => r.clone(),
            Reps::Uniform(r) => vec![*r; exercise.sets as usize],
        };
        let mut weights = match &exercise.weight_kg {
            Weight::PerSet(w) => w.clone(),
            Weight::Kg(w) => vec![*w; exercise.sets as usize],
            Weight::Label(_) => vec![0.0; exercise.sets as usize],
        };
        for set in &parsed.sets {
            reps.push(set.reps);
            weights.push(set.weight_kg);
        }
        exercise.sets = reps.len() as u32;
        exercise.reps = Reps::PerSet(reps);
        exercise.weight_kg = Weight::PerSet(weights);
        exercise
    }

    pub fn total_sets(&self) -> u32 {
        sum_sets(self.exercises.iter().map(|e| e.sets))
    }

    /// The regular workout record persisted on finish.
    pub fn to_workout(&self, finished_at: Timestamp) -> Workout {
        let minutes = u32::try_from((finished_at - self.started_at).num_minutes()).unwrap_or(0);
        Workout {
            key: Some(generate_key(self.date, "chat", Some("completed"))),
            name: format!("Chat workout {}", self.date),
            kind: "chat".to_string(),
            date: self.date,
            muscle_groups: Vec::new(),
            exercises: self.exercises.clone(),
            notes: Some("Logged from chat".to_string()),
            duration_min: Some(minutes),
        }
    }
}

/// Confirmation sent back after a successful parse.
pub fn logged_reply(parsed: &ParsedSets, total_sets_for_exercise: u32) -> String {
    let sets: Vec<String> = parsed
        .sets
        .iter()
        .map(|s| format!("{} @ {}kg", s.reps, format_kg(s.weight_kg)))
        .collect();
    format!(
        "Logged {}: {} ({} sets so far)",
        parsed.exercise,
        sets.join(", "),
        total_sets_for_exercise
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn synonyms_are_canonicalised() {
        assert_eq!(canonical_name("bench"), "Bench Press");
        assert_eq!(canonical_name("  OHP "), "Overhead Press");
        assert_eq!(canonical_name("RDL"), "Romanian Deadlift");
        assert_eq!(canonical_name("pull  ups"), "Pull Up");
    }

    #[test]
    fn unknown_names_are_title_cased() {
        assert_eq!(canonical_name("cable crossover"), "Cable Crossover");
        assert_eq!(canonical_name("ZERCHER squat"), "Zercher Squat");
    }

    #[test]
    fn parse_reply_with_fences() {
        let raw = "```json\n{\"exercise\": \"bench\", \"sets\": [{\"weight_kg\": 60, \"reps\": 8}, {\"weight_kg\": 60, \"reps\": 8}]}\n```";
        let parsed = parse_sets_reply(raw).unwrap();
        assert_eq!(parsed.exercise, "Bench Press");
        assert_eq!(parsed.sets.len(), 2);
    }

    #[test]
    fn parse_reply_rejects_garbage_and_empty_sets() {
        assert!(parse_sets_reply("I am not sure what you mean").is_err());
        assert!(parse_sets_reply("{\"exercise\": \"bench\", \"sets\": []}").is_err());
        assert!(parse_sets_reply(
            "{\"exercise\": \"bench\", \"sets\": [{\"weight_kg\": 60, \"reps\": 4294967295}]}"
        )
        .is_err());
    }

    #[test]
    fn chat_workout_accumulates_sets() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
        let mut chat = ChatWorkout::new(start);

        let first = parse_sets_reply("{\"exercise\": \"bench\", \"sets\": [{\"weight_kg\": 60, \"reps\": 8}]}").unwrap();
        let second = parse_sets_reply("{\"exercise\": \"Bench Press\", \"sets\": [{\"weight_kg\": 62.5, \"reps\": 6}]}").unwrap();
        chat.add(&first);
        let bench = chat.add(&second).clone();

        assert_eq!(chat.exercises.len(), 1);
        assert_eq!(bench.sets, 2);
        assert_eq!(bench.reps, Reps::PerSet(vec![8, 6]));
        assert_eq!(bench.weight_kg, Weight::PerSet(vec![60.0, 62.5]));
        assert_eq!(logged_reply(&second, bench.sets), "Logged Bench Press: 6 @ 62.5kg (2 sets so far)");

        let workout = chat.to_workout(start + Duration::minutes(40));
        assert_eq!(workout.date, "2026-03-02".parse::<TrainingDate>().unwrap());
        assert_eq!(workout.duration_min, Some(40));
        assert_eq!(workout.total_sets(), 2);
    }
}
