//! The in-progress ("active") workout.
//!
//! At most one active workout that is not completed exists at a time. The
//! rule is enforced by the caller with a check-then-act; nothing here locks.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::messages;
use crate::types::{Timestamp, TrainingDate};
use crate::workout::{generate_key, validate_reps, Exercise, Reps, Weight, Workout, DEFAULT_SETS};

/// Key tag of workouts saved from an active session.
const COMPLETED_TAG: &str = "completed";

// ---------------------------------------------------------------------------
// Start request
// ---------------------------------------------------------------------------

/// An exercise as sent to `start`. Both the routine shape (`sets`, `reps`,
/// `weight_kg`) and the active shape (`planned_sets`, `target_reps`,
/// `suggested_weight`) are accepted; the routine shape wins when both are
/// present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct PlannedExercise {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[validate(range(max = 100, message = "at most 100 sets"))]
    pub sets: Option<u32>,
    #[serde(default)]
    #[validate(range(max = 100, message = "at most 100 sets"))]
    pub planned_sets: Option<u32>,
    #[serde(default)]
    #[validate(custom(function = "validate_reps"))]
    pub reps: Option<Reps>,
    #[serde(default)]
    #[validate(custom(function = "validate_reps"))]
    pub target_reps: Option<Reps>,
    #[serde(default)]
    pub weight_kg: Option<Weight>,
    #[serde(default)]
    pub suggested_weight: Option<Weight>,
}

impl PlannedExercise {
    fn planned_sets(&self) -> u32 {
        self.sets
            .filter(|s| *s > 0)
            .or(self.planned_sets)
            .unwrap_or(DEFAULT_SETS)
    }

    fn target_reps(&self) -> Reps {
        self.reps
            .clone()
            .or_else(|| self.target_reps.clone())
            .unwrap_or_default()
    }

    /// `weight_kg` unless it is a zero or negative number.
    fn supplied_weight(&self) -> Option<&Weight> {
        self.weight_kg
            .as_ref()
            .filter(|w| !matches!(w, Weight::Kg(kg) if *kg <= 0.0))
            .or(self.suggested_weight.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartWorkoutRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub kind: String,
    pub date: TrainingDate,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<PlannedExercise>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub duration_min: Option<u32>,
}

impl StartWorkoutRequest {
    /// Build the active workout. `suggest` is the history lookup; its answer
    /// is preferred over the supplied weight unless it is `"adjust"`.
    pub fn into_active<F>(self, started_at: Timestamp, suggest: F) -> ActiveWorkout
    where
        F: Fn(&str, &[String]) -> Weight,
    {
        let exercises = self
            .exercises
            .iter()
            .map(|planned| {
                let from_history = suggest(&planned.name, &self.muscle_groups);
                let suggested_weight = if !from_history.is_adjust() {
                    from_history
                } else {
                    match planned.supplied_weight() {
                        Some(Weight::Kg(w)) if *w > 0.0 => Weight::Kg(*w),
                        _ => Weight::adjust(),
                    }
                };
                ActiveExercise {
                    name: planned.name.clone(),
                    planned_sets: planned.planned_sets(),
                    target_reps: planned.target_reps(),
                    suggested_weight,
                    logged_sets: Vec::new(),
                    completed: false,
                    notes: None,
                }
            })
            .collect();

        ActiveWorkout {
            name: self.name,
            kind: self.kind,
            date: self.date,
            muscle_groups: self.muscle_groups,
            notes: self.notes,
            duration_min: self.duration_min,
            started_at,
            finished_at: None,
            completed: false,
            exercises,
        }
    }
}

// ---------------------------------------------------------------------------
// Active document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoggedSet {
    pub number: u32,
    #[validate(range(max = 1000, message = "at most 1000 reps"))]
    pub reps: u32,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub weight_kg: f64,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveExercise {
    pub name: String,
    pub planned_sets: u32,
    pub target_reps: Reps,
    pub suggested_weight: Weight,
    #[serde(default)]
    pub logged_sets: Vec<LoggedSet>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveWorkout {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: TrainingDate,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub duration_min: Option<u32>,
    pub started_at: Timestamp,
    #[serde(default)]
    pub finished_at: Option<Timestamp>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub exercises: Vec<ActiveExercise>,
}

/// Result of finishing an active workout.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedWorkout {
    /// The record to persist in the workouts collection.
    pub workout: Workout,
    pub duration_min: u32,
    pub completed_exercises: usize,
    pub total_exercises: usize,
    pub summary: String,
}

impl ActiveWorkout {
    fn exercise_mut(&mut self, index: usize) -> Result<&mut ActiveExercise, CoreError> {
        let count = self.exercises.len();
        self.exercises.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!(
                "invalid exercise index {index} (workout has {count} exercises)"
            ))
        })
    }

    /// Re-run the history lookup for every exercise still at `"adjust"`.
    /// Returns how many exercises were looked up.
    pub fn recalculate_weights<F>(&mut self, suggest: F) -> usize
    where
        F: Fn(&str, &[String]) -> Weight,
    {
        let groups = self.muscle_groups.clone();
        let mut updated = 0;
        for exercise in self.exercises.iter_mut().filter(|e| e.suggested_weight.is_adjust()) {
            exercise.suggested_weight = suggest(&exercise.name, &groups);
            updated += 1;
        }
        updated
    }

    /// Append a set; the exercise completes once it reaches its planned sets.
    pub fn log_set(&mut self, index: usize, set: LoggedSet) -> Result<&ActiveExercise, CoreError> {
        let exercise = self.exercise_mut(index)?;
        exercise.logged_sets.push(set);
        if exercise.logged_sets.len() >= exercise.planned_sets as usize {
            exercise.completed = true;
        }
        Ok(exercise)
    }

    pub fn complete_exercise(&mut self, index: usize) -> Result<(), CoreError> {
        self.exercise_mut(index)?.completed = true;
        Ok(())
    }

    /// Whole minutes between start and `end`, never negative.
    pub fn duration_until(&self, end: Timestamp) -> u32 {
        u32::try_from((end - self.started_at).num_minutes()).unwrap_or(0)
    }

    /// Mark the workout completed and build the record to persist. Only
    /// exercises with at least one logged set are kept; a workout with no
    /// logged sets still yields a record carrying its duration.
    pub fn finish(&mut self, finished_at: Timestamp) -> FinishedWorkout {
        self.completed = true;
        self.finished_at = Some(finished_at);
        let duration_min = self.duration_until(finished_at);

        let exercises = self
            .exercises
            .iter()
            .filter(|e| !e.logged_sets.is_empty())
            .map(|e| Exercise {
                name: e.name.clone(),
                sets: e.logged_sets.len() as u32,
                reps: Reps::PerSet(e.logged_sets.iter().map(|s| s.reps).collect()),
                weight_kg: Weight::PerSet(e.logged_sets.iter().map(|s| s.weight_kg).collect()),
            })
            .collect();

        let workout = Workout {
            key: Some(generate_key(self.date, &self.kind, Some(COMPLETED_TAG))),
            name: self.name.clone(),
            kind: self.kind.clone(),
            date: self.date,
            muscle_groups: self.muscle_groups.clone(),
            exercises,
            notes: Some(format!("Workout completed. Duration: {duration_min} min")),
            duration_min: Some(duration_min),
        };

        FinishedWorkout {
            summary: messages::workout_finished(self, duration_min),
            workout,
            duration_min,
            completed_exercises: self.exercises.iter().filter(|e| e.completed).count(),
            total_exercises: self.exercises.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn start_time() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap()
    }

    fn request() -> StartWorkoutRequest {
        serde_json::from_value(json!({
            "name": "Push day",
            "type": "push",
            "date": "2026-03-02",
            "muscle_groups": ["chest"],
            "exercises": [
                {"name": "Bench Press", "sets": 3, "reps": 8, "weight_kg": 60},
                {"name": "Cable Fly", "planned_sets": 2, "target_reps": [12, 10], "suggested_weight": "adjust"},
                {"name": "Dips"}
            ]
        }))
        .unwrap()
    }

    fn no_history(_: &str, _: &[String]) -> Weight {
        Weight::adjust()
    }

    fn set(number: u32, reps: u32, weight: f64) -> LoggedSet {
        LoggedSet {
            number,
            reps,
            weight_kg: weight,
            completed: true,
        }
    }

    #[test]
    fn start_accepts_both_exercise_shapes() {
        let active = request().into_active(start_time(), no_history);

        assert_eq!(active.exercises[0].planned_sets, 3);
        assert_eq!(active.exercises[0].suggested_weight, Weight::Kg(60.0));
        assert_eq!(active.exercises[1].planned_sets, 2);
        assert_eq!(active.exercises[1].target_reps, Reps::PerSet(vec![12, 10]));
        assert!(active.exercises[1].suggested_weight.is_adjust());
        assert_eq!(active.exercises[2].planned_sets, DEFAULT_SETS);
        assert_eq!(active.exercises[2].target_reps, Reps::Uniform(10));
        assert!(!active.completed);
    }

    #[test]
    fn zero_weight_falls_through_to_suggested_weight() {
        let req: StartWorkoutRequest = serde_json::from_value(json!({
            "name": "Pull day",
            "type": "pull",
            "date": "2026-03-02",
            "exercises": [
                {"name": "Barbell Row", "weight_kg": 0, "suggested_weight": 55},
                {"name": "Face Pull", "weight_kg": 0}
            ]
        }))
        .unwrap();
        let active = req.into_active(start_time(), no_history);

        assert_eq!(active.exercises[0].suggested_weight, Weight::Kg(55.0));
        assert!(active.exercises[1].suggested_weight.is_adjust());
    }

    #[test]
    fn start_rejects_oversized_plans() {
        assert!(request().validate().is_ok());

        let req: StartWorkoutRequest = serde_json::from_value(json!({
            "name": "Push day",
            "type": "push",
            "date": "2026-03-02",
            "exercises": [{"name": "Bench Press", "planned_sets": 4294967295u32}]
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn history_suggestion_beats_supplied_weight() {
        let active = request().into_active(start_time(), |name, _| {
            if name == "Bench Press" {
                Weight::Kg(72.5)
            } else {
                Weight::adjust()
            }
        });
        assert_eq!(active.exercises[0].suggested_weight, Weight::Kg(72.5));
    }

    #[test]
    fn recalculate_only_touches_adjust() {
        let mut active = request().into_active(start_time(), no_history);
        let updated = active.recalculate_weights(|_, _| Weight::Kg(20.0));

        assert_eq!(updated, 2);
        assert_eq!(active.exercises[0].suggested_weight, Weight::Kg(60.0));
        assert_eq!(active.exercises[1].suggested_weight, Weight::Kg(20.0));
    }

    #[test]
    fn logging_planned_sets_completes_exercise() {
        let mut active = request().into_active(start_time(), no_history);

        assert!(!active.log_set(1, set(1, 12, 15.0)).unwrap().completed);
        assert!(active.log_set(1, set(2, 10, 15.0)).unwrap().completed);
        assert_matches!(active.log_set(7, set(1, 10, 10.0)), Err(CoreError::Validation(_)));
        assert_matches!(active.complete_exercise(3), Err(CoreError::Validation(_)));
    }

    #[test]
    fn finish_keeps_exercises_with_logged_sets() {
        let mut active = request().into_active(start_time(), no_history);
        active.log_set(0, set(1, 8, 60.0)).unwrap();
        active.log_set(0, set(2, 7, 62.5)).unwrap();
        active.complete_exercise(2).unwrap();

        let finished = active.finish(start_time() + Duration::seconds(47 * 60 + 30));

        assert!(active.completed);
        assert_eq!(finished.duration_min, 47);
        assert_eq!(finished.total_exercises, 3);
        assert_eq!(finished.completed_exercises, 1);
        assert_eq!(finished.workout.exercises.len(), 1);

        let bench = &finished.workout.exercises[0];
        assert_eq!(bench.sets, 2);
        assert_eq!(bench.reps, Reps::PerSet(vec![8, 7]));
        assert_eq!(bench.weight_kg, Weight::PerSet(vec![60.0, 62.5]));
        assert!(finished.workout.key.as_deref().unwrap().starts_with("2026-03-02-push-completed-"));
        assert!(finished.summary.contains("Bench Press"));
    }

    #[test]
    fn finish_without_sets_still_yields_a_record() {
        let mut active = request().into_active(start_time(), no_history);
        let finished = active.finish(start_time() + Duration::minutes(12));

        assert!(finished.workout.exercises.is_empty());
        assert_eq!(finished.workout.duration_min, Some(12));
        assert_eq!(finished.duration_min, 12);
    }

    #[test]
    fn duration_is_never_negative() {
        let active = request().into_active(start_time(), no_history);
        assert_eq!(active.duration_until(start_time() - Duration::minutes(5)), 0);
    }
}
