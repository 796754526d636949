//! Workout documents: the shapes stored in the `workouts` collection and
//! shared by every other module.
//!
//! Documents are deliberately loose. A weight can be a single number, a
//! per-set list, or a text label, with the label [`ADJUST`] meaning "no
//! weight known yet".

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::TrainingDate;

/// Sentinel weight label meaning "pick a weight on the day".
pub const ADJUST: &str = "adjust";

/// Planned sets when a routine does not say.
pub const DEFAULT_SETS: u32 = 4;

/// Target reps when a routine does not say.
pub const DEFAULT_REPS: u32 = 10;

/// Most sets accepted for one exercise.
pub const MAX_SETS: u32 = 100;

/// Most reps accepted for one set.
pub const MAX_REPS: u32 = 1000;

// ---------------------------------------------------------------------------
// Weight
// ---------------------------------------------------------------------------

/// Weight lifted for an exercise, in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weight {
    /// Same weight for every set.
    Kg(f64),
    /// One entry per set.
    PerSet(Vec<f64>),
    /// Free-text label such as `"adjust"` or `"bodyweight"`.
    Label(String),
}

impl Default for Weight {
    fn default() -> Self {
        Self::adjust()
    }
}

impl Weight {
    /// The `"adjust"` sentinel.
    pub fn adjust() -> Self {
        Self::Label(ADJUST.to_string())
    }

    pub fn is_adjust(&self) -> bool {
        matches!(self, Self::Label(label) if label.eq_ignore_ascii_case(ADJUST))
    }

    /// The value history lookups compare: a positive single weight, or the
    /// heaviest set of a non-empty list. Labels are never usable.
    pub fn usable(&self) -> Option<f64> {
        match self {
            Self::Kg(w) if *w > 0.0 => Some(*w),
            Self::Kg(_) | Self::Label(_) => None,
            Self::PerSet(sets) if sets.is_empty() => None,
            Self::PerSet(sets) => Some(sets.iter().copied().fold(f64::MIN, f64::max)),
        }
    }

    /// Every positive number carried by this weight.
    pub fn numeric_values(&self) -> Vec<f64> {
        match self {
            Self::Kg(w) if *w > 0.0 => vec![*w],
            Self::PerSet(sets) => sets.iter().copied().filter(|w| *w > 0.0).collect(),
            _ => Vec::new(),
        }
    }

    /// Mean working weight, used for volume estimates.
    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Kg(w) if *w > 0.0 => Some(*w),
            Self::PerSet(sets) if !sets.is_empty() => {
                Some(sets.iter().sum::<f64>() / sets.len() as f64)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg(w) => write!(f, "{}kg", format_kg(*w)),
            Self::PerSet(sets) => {
                let parts: Vec<String> = sets.iter().map(|w| format_kg(*w)).collect();
                write!(f, "{}kg", parts.join("/"))
            }
            Self::Label(label) => f.write_str(label),
        }
    }
}

/// Format a weight without a trailing `.0` for whole numbers.
pub fn format_kg(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{w:.0}")
    } else {
        format!("{w}")
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Reps
// ---------------------------------------------------------------------------

/// Repetitions per set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Uniform(u32),
    PerSet(Vec<u32>),
}

impl Default for Reps {
    fn default() -> Self {
        Self::Uniform(DEFAULT_REPS)
    }
}

impl Reps {
    /// Lowest rep count, the conservative choice for strength estimates.
    pub fn min(&self) -> Option<u32> {
        match self {
            Self::Uniform(r) => Some(*r),
            Self::PerSet(reps) => reps.iter().copied().min(),
        }
    }

    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Uniform(r) => Some(f64::from(*r)),
            Self::PerSet(reps) if reps.is_empty() => None,
            Self::PerSet(reps) => {
                Some(reps.iter().map(|r| f64::from(*r)).sum::<f64>() / reps.len() as f64)
            }
        }
    }
}

/// Field validator for [`Reps`]: every count within [`MAX_REPS`] and no more
/// than [`MAX_SETS`] per-set entries.
pub fn validate_reps(reps: &Reps) -> Result<(), ValidationError> {
    let within = match reps {
        Reps::Uniform(r) => *r <= MAX_REPS,
        Reps::PerSet(list) => list.len() <= MAX_SETS as usize && list.iter().all(|r| *r <= MAX_REPS),
    };
    if within {
        Ok(())
    } else {
        Err(ValidationError::new("range").with_message("reps out of range".into()))
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(r) => write!(f, "{r}"),
            Self::PerSet(reps) => {
                let parts: Vec<String> = reps.iter().map(u32::to_string).collect();
                f.write_str(&parts.join("-"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Exercise / Workout
// ---------------------------------------------------------------------------

/// One exercise inside a workout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Exercise {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(range(max = 100, message = "at most 100 sets"))]
    pub sets: u32,
    #[serde(default)]
    #[validate(custom(function = "validate_reps"))]
    pub reps: Reps,
    #[serde(default)]
    pub weight_kg: Weight,
}

/// A persisted training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Workout {
    /// Ad-hoc identifier, `"{date}-{type}-{uuid}"` unless the caller sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
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
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<u32>,
}

impl Workout {
    /// Assign the ad-hoc key if the document has none.
    pub fn ensure_key(&mut self) {
        if self.key.as_deref().map_or(true, str::is_empty) {
            self.key = Some(generate_key(self.date, &self.kind, None));
        }
    }

    /// Sets across all exercises, saturating at `u32::MAX`.
    pub fn total_sets(&self) -> u32 {
        sum_sets(self.exercises.iter().map(|e| e.sets))
    }

    /// Case-insensitive muscle group intersection.
    pub fn shares_group(&self, groups: &[String]) -> bool {
        self.muscle_groups
            .iter()
            .any(|g| groups.iter().any(|t| t.eq_ignore_ascii_case(g)))
    }
}

/// Saturating sum of set counts.
pub fn sum_sets(sets: impl IntoIterator<Item = u32>) -> u32 {
    sets.into_iter().fold(0, u32::saturating_add)
}

/// Build an ad-hoc workout key. `tag` is inserted before the unique suffix,
/// e.g. `"completed"` for workouts saved from an active session.
pub fn generate_key(date: TrainingDate, kind: &str, tag: Option<&str>) -> String {
    let suffix = uuid::Uuid::now_v7().simple().to_string();
    match tag {
        Some(tag) => format!("{date}-{kind}-{tag}-{suffix}"),
        None => format!("{date}-{kind}-{suffix}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn weight_deserializes_all_shapes() {
        let single: Weight = serde_json::from_value(json!(60)).unwrap();
        let list: Weight = serde_json::from_value(json!([60, 62.5])).unwrap();
        let label: Weight = serde_json::from_value(json!("adjust")).unwrap();

        assert_eq!(single, Weight::Kg(60.0));
        assert_eq!(list, Weight::PerSet(vec![60.0, 62.5]));
        assert!(label.is_adjust());
    }

    #[test]
    fn usable_weight_ignores_labels_and_zero() {
        assert_eq!(Weight::Kg(0.0).usable(), None);
        assert_eq!(Weight::Label("bodyweight".into()).usable(), None);
        assert_eq!(Weight::PerSet(vec![]).usable(), None);
        assert_eq!(Weight::PerSet(vec![50.0, 57.5, 55.0]).usable(), Some(57.5));
    }

    #[test]
    fn weight_display() {
        assert_eq!(Weight::Kg(60.0).to_string(), "60kg");
        assert_eq!(Weight::PerSet(vec![60.0, 62.5]).to_string(), "60/62.5kg");
        assert_eq!(Weight::adjust().to_string(), "adjust");
    }

    #[test]
    fn reps_min_and_display() {
        let reps = Reps::PerSet(vec![10, 8, 6]);
        assert_eq!(reps.min(), Some(6));
        assert_eq!(reps.to_string(), "10-8-6");
        assert_eq!(Reps::Uniform(12).mean(), Some(12.0));
    }

    #[test]
    fn exercise_rejects_oversized_counts() {
        let exercise = |sets: u32, reps: Reps| Exercise {
            name: "Squat".into(),
            sets,
            reps,
            weight_kg: Weight::Kg(100.0),
        };
        assert!(exercise(MAX_SETS, Reps::Uniform(MAX_REPS)).validate().is_ok());
        assert!(exercise(u32::MAX, Reps::Uniform(5)).validate().is_err());
        assert!(exercise(4, Reps::Uniform(MAX_REPS + 1)).validate().is_err());
        assert!(exercise(4, Reps::PerSet(vec![5, u32::MAX])).validate().is_err());
    }

    #[test]
    fn total_sets_saturates() {
        let mut workout: Workout = serde_json::from_value(json!({
            "name": "Legacy",
            "type": "legs",
            "date": "2026-03-02",
            "exercises": [{"name": "Squat", "sets": 2}]
        }))
        .unwrap();
        workout.exercises[0].sets = u32::MAX;
        workout.exercises.push(workout.exercises[0].clone());
        assert_eq!(workout.total_sets(), u32::MAX);
        assert_eq!(sum_sets([u32::MAX, 2]), u32::MAX);
    }

    #[test]
    fn workout_round_trips_wire_names() {
        let value = json!({
            "name": "Push day",
            "type": "push",
            "date": "2026-03-02",
            "muscle_groups": ["chest", "triceps"],
            "exercises": [{"name": "Bench Press", "sets": 4, "reps": 8, "weight_kg": 70}]
        });
        let mut workout: Workout = serde_json::from_value(value).unwrap();
        assert_eq!(workout.kind, "push");
        assert_eq!(workout.total_sets(), 4);

        workout.ensure_key();
        let key = workout.key.clone().unwrap();
        assert!(key.starts_with("2026-03-02-push-"));

        let out = serde_json::to_value(&workout).unwrap();
        assert_eq!(out["type"], "push");
        assert_eq!(out["key"], key.as_str());
    }

    #[test]
    fn ensure_key_keeps_existing_key() {
        let mut workout: Workout = serde_json::from_value(json!({
            "key": "custom",
            "name": "Legs",
            "type": "legs",
            "date": "2026-03-03"
        }))
        .unwrap();
        workout.ensure_key();
        assert_eq!(workout.key.as_deref(), Some("custom"));
    }

    #[test]
    fn shares_group_is_case_insensitive() {
        let workout: Workout = serde_json::from_value(json!({
            "name": "Pull",
            "type": "pull",
            "date": "2026-03-03",
            "muscle_groups": ["Back", "Biceps"]
        }))
        .unwrap();
        assert!(workout.shares_group(&["back".to_string()]));
        assert!(!workout.shares_group(&["legs".to_string()]));
    }
}
