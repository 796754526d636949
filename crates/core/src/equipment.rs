//! Gym equipment catalogue.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Equipment {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    /// `machine`, `free_weight`, `cable` or `cardio`.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub kind: String,
    #[serde(default)]
    pub primary_muscle_groups: Vec<String>,
    #[serde(default)]
    pub possible_exercises: Vec<String>,
}

fn item(name: &str, kind: &str, groups: &[&str], exercises: &[&str]) -> Equipment {
    Equipment {
        name: name.to_string(),
        kind: kind.to_string(),
        primary_muscle_groups: groups.iter().map(|g| g.to_string()).collect(),
        possible_exercises: exercises.iter().map(|e| e.to_string()).collect(),
    }
}

/// The equipment of a typical commercial gym, used by `seed`.
pub fn default_catalogue() -> Vec<Equipment> {
    vec![
        item("Bench press station", "free_weight", &["chest", "triceps"], &["Bench Press", "Incline Bench Press", "Decline Bench Press"]),
        item("Squat rack", "free_weight", &["legs", "glutes"], &["Squat", "Front Squat", "Good Morning"]),
        item("Cable machine", "cable", &["back", "biceps", "triceps", "shoulders"], &["Lat Pulldown", "Cable Row", "Triceps Pushdown", "Face Pull", "Cable Curl"]),
        item("Shoulder press machine", "machine", &["shoulders"], &["Seated Shoulder Press"]),
        item("Leg press", "machine", &["legs"], &["Leg Press", "Single Leg Press"]),
        item("Leg extension", "machine", &["legs"], &["Leg Extension"]),
        item("Leg curl", "machine", &["legs"], &["Seated Leg Curl", "Lying Leg Curl"]),
        item("Pec deck", "machine", &["chest"], &["Machine Fly", "Pec Deck"]),
        item("Row machine", "machine", &["back"], &["Seated Machine Row"]),
        item("Dumbbells", "free_weight", &["all"], &["Biceps Curl", "Dumbbell Press", "Lateral Raise", "Dumbbell Row", "Triceps Extension"]),
        item("Olympic barbell", "free_weight", &["all"], &["Deadlift", "Barbell Row", "Barbell Curl", "Overhead Press"]),
        item("Pull-up bar", "free_weight", &["back", "biceps"], &["Pull Up", "Chin Up"]),
    ]
}
