//! AI routine generation: prompt building and reply decoding.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::reply::parse_json_reply;
use crate::types::TrainingDate;
use crate::workout::{generate_key, Exercise, Weight, Workout, DEFAULT_SETS};

/// Recent workouts included in the prompt.
pub const CONTEXT_WORKOUTS: i64 = 5;

/// Exercises listed per context workout.
const CONTEXT_EXERCISES: usize = 3;

pub const SYSTEM_PROMPT: &str =
    "You are an expert personal trainer. You only answer with valid JSON.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRoutineRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub kind: String,
    #[serde(default)]
    pub muscle_groups: Option<Vec<String>>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub goal: String,
    #[validate(range(min = 10, max = 240, message = "must be between 10 and 240 minutes"))]
    pub duration_min: u32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub level: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl GenerateRoutineRequest {
    /// Defaults used when a routine is requested from the chat.
    pub fn from_chat(kind: &str, duration_min: u32, level: &str) -> Self {
        Self {
            kind: kind.to_string(),
            muscle_groups: None,
            goal: "hypertrophy".to_string(),
            duration_min,
            level: level.to_string(),
            notes: None,
        }
    }
}

/// Build the user prompt. `recent` is the most recent history, newest first.
pub fn build_prompt(req: &GenerateRoutineRequest, recent: &[Workout], today: TrainingDate) -> String {
    let target = match &req.muscle_groups {
        Some(groups) if !groups.is_empty() => format!("Muscle groups: {}", groups.join(", ")),
        _ => format!("Type: {}", req.kind),
    };

    let mut context = String::new();
    if !recent.is_empty() {
        context.push_str("\nRecent workouts of the user:\n");
        for w in recent {
            context.push_str(&format!("\n- {} ({}):\n", w.name, w.date));
            for e in w.exercises.iter().take(CONTEXT_EXERCISES) {
                context.push_str(&format!("  * {}: {}x{} @ {}\n", e.name, e.sets, e.reps, e.weight_kg));
            }
        }
    }

    let notes = req
        .notes
        .as_deref()
        .map(|n| format!("- Notes: {n}\n"))
        .unwrap_or_default();

    format!(
        "Generate a training routine as JSON.\n\n\
         Parameters:\n\
         - {target}\n\
         - Goal: {goal}\n\
         - Level: {level}\n\
         - Duration: {duration} minutes\n\
         {notes}{context}\n\
         Return ONLY valid JSON:\n\
         {{\n  \"name\": \"Workout name\",\n  \"type\": \"{kind}\",\n  \"date\": \"{today}\",\n  \
         \"muscle_groups\": [\"group1\", \"group2\"],\n  \"exercises\": [\n    \
         {{\"name\": \"Exercise\", \"sets\": 4, \"reps\": 10, \"weight_kg\": \"adjust\"}}\n  ]\n}}\n\n\
         Include 6-8 appropriate exercises.",
        goal = req.goal,
        level = req.level,
        duration = req.duration_min,
        kind = req.kind,
    )
}

/// What the model is asked to return. Everything is optional so that a
/// sloppy reply still yields a routine.
#[derive(Debug, Deserialize)]
struct RoutineDraft {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    date: Option<TrainingDate>,
    #[serde(default)]
    muscle_groups: Vec<String>,
    #[serde(default)]
    exercises: Vec<Exercise>,
}

/// Decode the model reply into a routine. Weights are then filled from
/// history by `suggest`, regardless of what the model proposed.
pub fn parse_routine<F>(
    raw: &str,
    req: &GenerateRoutineRequest,
    today: TrainingDate,
    suggest: F,
) -> Result<Workout, CoreError>
where
    F: Fn(&str, &[String]) -> Weight,
{
    let draft: RoutineDraft = parse_json_reply(raw)?;

    let kind = draft.kind.filter(|k| !k.is_empty()).unwrap_or_else(|| req.kind.clone());
    let date = draft.date.unwrap_or(today);
    let muscle_groups = if draft.muscle_groups.is_empty() {
        req.muscle_groups.clone().unwrap_or_default()
    } else {
        draft.muscle_groups
    };

    let exercises = draft
        .exercises
        .into_iter()
        .filter(|e| !e.name.trim().is_empty())
        .map(|mut e| {
            if e.sets == 0 {
                e.sets = DEFAULT_SETS;
            }
            e.weight_kg = suggest(&e.name, &muscle_groups);
            e
        })
        .collect();

    Ok(Workout {
        key: Some(generate_key(date, &kind, None)),
        name: draft
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{kind} workout")),
        kind,
        date,
        muscle_groups,
        exercises,
        notes: req.notes.clone(),
        duration_min: Some(req.duration_min),
    })
}

/// One line per exercise, as shown in chat replies.
pub fn describe_routine(routine: &Workout) -> String {
    let lines: Vec<String> = routine
        .exercises
        .iter()
        .map(|e| format!("  • {}: {}x{} @ {}", e.name, e.sets, e.reps, e.weight_kg))
        .collect();
    format!(
        "**{}**\n\nExercises:\n{}\n\nWeights are based on your history. Want me to start it or change it?",
        routine.name,
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Reps;

    fn d(s: &str) -> TrainingDate {
        s.parse().unwrap()
    }

    fn req() -> GenerateRoutineRequest {
        GenerateRoutineRequest {
            kind: "push".into(),
            muscle_groups: None,
            goal: "strength".into(),
            duration_min: 45,
            level: "intermediate".into(),
            notes: Some("sore shoulder".into()),
        }
    }

    #[test]
    fn prompt_includes_parameters_and_history() {
        let recent: Vec<Workout> = serde_json::from_value(serde_json::json!([{
            "name": "Push A", "type": "push", "date": "2026-03-01",
            "exercises": [{"name": "Bench Press", "sets": 4, "reps": 8, "weight_kg": 70}]
        }]))
        .unwrap();

        let prompt = build_prompt(&req(), &recent, d("2026-03-05"));
        assert!(prompt.contains("- Type: push"));
        assert!(prompt.contains("- Level: intermediate"));
        assert!(prompt.contains("- Notes: sore shoulder"));
        assert!(prompt.contains("* Bench Press: 4x8 @ 70kg"));
        assert!(prompt.contains("\"date\": \"2026-03-05\""));
    }

    #[test]
    fn explicit_groups_replace_type_line() {
        let mut r = req();
        r.muscle_groups = Some(vec!["chest".into(), "triceps".into()]);
        let prompt = build_prompt(&r, &[], d("2026-03-05"));
        assert!(prompt.contains("- Muscle groups: chest, triceps"));
        assert!(!prompt.contains("Recent workouts"));
    }

    #[test]
    fn parse_fills_weights_from_history() {
        let raw = r#"```json
{"name": "Push Power", "type": "push", "date": "2026-03-05",
 "muscle_groups": ["chest"],
 "exercises": [
   {"name": "Bench Press", "sets": 5, "reps": 5, "weight_kg": "adjust"},
   {"name": "Cable Fly", "reps": [15, 12, 12], "weight_kg": 20}
 ]}
```"#;
        let routine = parse_routine(raw, &req(), d("2026-03-05"), |name, groups| {
            assert_eq!(groups, ["chest".to_string()]);
            if name == "Bench Press" {
                Weight::Kg(80.0)
            } else {
                Weight::adjust()
            }
        })
        .unwrap();

        assert_eq!(routine.name, "Push Power");
        assert!(routine.key.as_deref().unwrap().starts_with("2026-03-05-push-"));
        assert_eq!(routine.exercises[0].weight_kg, Weight::Kg(80.0));
        assert!(routine.exercises[1].weight_kg.is_adjust());
        assert_eq!(routine.exercises[1].sets, DEFAULT_SETS);
        assert_eq!(routine.exercises[1].reps, Reps::PerSet(vec![15, 12, 12]));
        assert_eq!(routine.duration_min, Some(45));
    }

    #[test]
    fn parse_rejects_non_json() {
        let result = parse_routine("Sorry, I can't.", &req(), d("2026-03-05"), |_, _| Weight::adjust());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn describe_lists_exercises() {
        let routine = parse_routine(
            r#"{"name": "Legs", "exercises": [{"name": "Squat", "sets": 4, "reps": 6}]}"#,
            &req(),
            d("2026-03-05"),
            |_, _| Weight::Kg(100.0),
        )
        .unwrap();
        assert_eq!(routine.kind, "push");
        assert!(describe_routine(&routine).contains("Squat: 4x6 @ 100kg"));
    }
}
