//! The chat's tool registry: typed read-only queries over training history.
//!
//! Each tool decodes its JSON arguments, runs against the database and
//! answers with a JSON value. Failures are answered as `{"error": ...}` so
//! the model can recover within the same conversation.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use trener_ai::{ToolCall, ToolDefinition};
use trener_core::stats::{
    exercise_progress, general_stats, personal_records, progress_trend, week_summary,
    weekly_comparison, weekly_volume, TOP_RECORDS,
};
use trener_core::types::TrainingDate;
use trener_core::weights::explain_suggestion;
use trener_db::models::workout::WorkoutFilter;
use trener_db::repositories::WorkoutRepo;
use trener_db::DbPool;

use crate::coach::history::{chronological, current_streak, suggestion_history};

/// Entries returned by `search_exercise` when the model gives no limit.
const DEFAULT_SEARCH_LIMIT: usize = 10;

const DEFAULT_WEEKS_BACK: usize = 4;
const MAX_WEEKS_BACK: usize = 52;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "list_workouts",
            "List recorded workouts, newest first, optionally filtered by type and date range.",
            json!({
                "type": "object",
                "properties": {
                    "limit": {"type": "integer", "description": "Maximum workouts (default 10, max 100)"},
                    "type": {"type": "string", "description": "Workout type, e.g. push, pull, legs"},
                    "from": {"type": "string", "description": "First date, YYYY-MM-DD"},
                    "to": {"type": "string", "description": "Last date, YYYY-MM-DD"}
                }
            }),
        ),
        ToolDefinition::new(
            "search_exercise",
            "Most recent sets of exercises whose name contains the given text.",
            json!({
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "Part of the exercise name"},
                    "limit": {"type": "integer", "description": "Maximum entries (default 10)"}
                },
                "required": ["name"]
            }),
        ),
        ToolDefinition::new(
            "get_stats",
            "Overall statistics: totals, days trained, counts by type and muscle group, streak.",
            json!({"type": "object", "properties": {}}),
        ),
        ToolDefinition::new(
            "exercise_progress",
            "Weight progression of an exercise over time with a trend summary.",
            json!({
                "type": "object",
                "properties": {
                    "exercise": {"type": "string", "description": "Part of the exercise name"}
                },
                "required": ["exercise"]
            }),
        ),
        ToolDefinition::new(
            "personal_records",
            "Heaviest weight lifted per exercise.",
            json!({
                "type": "object",
                "properties": {
                    "limit": {"type": "integer", "description": "Maximum records (default 10)"}
                }
            }),
        ),
        ToolDefinition::new(
            "weekly_summary",
            "This week's summary and per-week volume for recent weeks.",
            json!({
                "type": "object",
                "properties": {
                    "weeks_back": {"type": "integer", "description": "Weeks of volume history (default 4)"}
                }
            }),
        ),
        ToolDefinition::new(
            "compare_weeks",
            "Compare this week with last week: workouts, sets, exercises and volume.",
            json!({"type": "object", "properties": {}}),
        ),
        ToolDefinition::new(
            "suggest_weight",
            "Suggested working weight for an exercise based on the user's history.",
            json!({
                "type": "object",
                "properties": {
                    "exercise": {"type": "string"},
                    "muscle_groups": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["exercise"]
            }),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListWorkoutsArgs {
    limit: Option<i64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    from: Option<TrainingDate>,
    to: Option<TrainingDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchArgs {
    name: String,
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExerciseArgs {
    exercise: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LimitArgs {
    limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WeeksArgs {
    weeks_back: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SuggestArgs {
    exercise: String,
    muscle_groups: Vec<String>,
}

/// Decode tool arguments; a missing object means "all defaults".
fn args<T: DeserializeOwned + Default>(value: &Value) -> Result<T, String> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value.clone()).map_err(|e| format!("invalid arguments: {e}"))
}

fn required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("`{field}` is required"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Run one tool call. Never fails: errors are returned as `{"error": ...}`.
pub async fn execute(pool: &DbPool, call: &ToolCall, today: TrainingDate) -> Value {
    match run(pool, call, today).await {
        Ok(value) => value,
        Err(message) => {
            tracing::warn!(tool = %call.name, error = %message, "Tool call failed");
            json!({ "error": message })
        }
    }
}

async fn run(pool: &DbPool, call: &ToolCall, today: TrainingDate) -> Result<Value, String> {
    let db = |e: sqlx::Error| {
        tracing::error!(error = %e, "Tool database error");
        "database error".to_string()
    };

    match call.name.as_str() {
        "list_workouts" => {
            let a: ListWorkoutsArgs = args(&call.arguments)?;
            let filter = WorkoutFilter {
                kind: a.kind,
                from: a.from,
                to: a.to,
                limit: a.limit,
            };
            let workouts = WorkoutRepo::list_filtered(pool, &filter).await.map_err(db)?;
            Ok(json!({ "count": workouts.len(), "workouts": workouts }))
        }
        "search_exercise" => {
            let a: SearchArgs = args(&call.arguments)?;
            required(&a.name, "name")?;
            let workouts = chronological(pool).await.map_err(db)?;
            let points = exercise_progress(&workouts, &a.name);
            let limit = a.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
            let recent = &points[points.len().saturating_sub(limit)..];
            Ok(json!({ "query": a.name, "total": points.len(), "entries": recent }))
        }
        "get_stats" => {
            let workouts = chronological(pool).await.map_err(db)?;
            let streak = current_streak(pool, today).await.map_err(db)?;
            Ok(json!({ "stats": general_stats(&workouts), "streak": streak }))
        }
        "exercise_progress" => {
            let a: ExerciseArgs = args(&call.arguments)?;
            required(&a.exercise, "exercise")?;
            let workouts = chronological(pool).await.map_err(db)?;
            let points = exercise_progress(&workouts, &a.exercise);
            Ok(json!({
                "exercise": a.exercise,
                "trend": progress_trend(&points),
                "progress": points,
            }))
        }
        "personal_records" => {
            let a: LimitArgs = args(&call.arguments)?;
            let workouts = chronological(pool).await.map_err(db)?;
            let records = personal_records(&workouts, a.limit.unwrap_or(TOP_RECORDS));
            Ok(json!({ "records": records }))
        }
        "weekly_summary" => {
            let a: WeeksArgs = args(&call.arguments)?;
            let weeks_back = a.weeks_back.unwrap_or(DEFAULT_WEEKS_BACK).clamp(1, MAX_WEEKS_BACK);
            let workouts = chronological(pool).await.map_err(db)?;
            let volume = weekly_volume(&workouts);
            let recent = &volume[volume.len().saturating_sub(weeks_back)..];
            Ok(json!({
                "current_week": week_summary(&workouts, today),
                "weeks": recent,
            }))
        }
        "compare_weeks" => {
            let workouts = chronological(pool).await.map_err(db)?;
            serde_json::to_value(weekly_comparison(&workouts, today)).map_err(|e| e.to_string())
        }
        "suggest_weight" => {
            let a: SuggestArgs = args(&call.arguments)?;
            required(&a.exercise, "exercise")?;
            let history = suggestion_history(pool).await.map_err(db)?;
            let report = explain_suggestion(&a.exercise, &a.muscle_groups, &history);
            Ok(json!({
                "exercise": report.exercise,
                "suggested_weight": report.suggestion,
                "based_on": report.matches.first(),
            }))
        }
        other => Err(format!("unknown tool `{other}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique() {
        let defs = definitions();
        let mut names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
        assert!(defs.iter().all(|d| d.parameters["type"] == "object"));
    }

    #[test]
    fn null_arguments_use_defaults() {
        let a: ListWorkoutsArgs = args(&Value::Null).unwrap();
        assert!(a.kind.is_none() && a.limit.is_none());
    }

    #[test]
    fn arguments_decode_wire_names() {
        let a: ListWorkoutsArgs =
            args(&json!({"type": "legs", "from": "2026-03-01", "limit": 3})).unwrap();
        assert_eq!(a.kind.as_deref(), Some("legs"));
        assert_eq!(a.from, Some("2026-03-01".parse().unwrap()));
        assert_eq!(a.limit, Some(3));
    }

    #[test]
    fn bad_arguments_are_reported() {
        let err = args::<ListWorkoutsArgs>(&json!({"from": "yesterday"})).unwrap_err();
        assert!(err.starts_with("invalid arguments"));
        assert!(required("  ", "exercise").is_err());
    }
}
