//! Shared query parameter types for API handlers.

use serde::Deserialize;
use trener_core::types::TrainingDate;

/// `?type=&from=&to=&limit=` on the workout listing. Without any of them the
/// full history is returned.
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub from: Option<TrainingDate>,
    pub to: Option<TrainingDate>,
    pub limit: Option<i64>,
}

impl WorkoutListParams {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.from.is_none() && self.to.is_none() && self.limit.is_none()
    }
}

/// `?exercise=&groups=chest,triceps` on the weight suggestion endpoint.
#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub exercise: String,
    #[serde(default)]
    pub groups: Option<String>,
}

impl SuggestParams {
    /// Comma-separated groups, trimmed, empties dropped.
    pub fn muscle_groups(&self) -> Vec<String> {
        self.groups
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// `?limit=` on top-N listings.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}
