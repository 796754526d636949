//! Achievements, XP and levels.
//!
//! Achievements are a static list evaluated against aggregate stats that are
//! recomputed from the full history on every call. Unlocks are append-only:
//! an achievement once granted stays granted even if the stats that earned
//! it later drop (for example after a workout is deleted).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::stats::max_weight;
use crate::types::Timestamp;
use crate::workout::{sum_sets, Workout};

/// The only user of this single-user system.
pub const DEFAULT_USER_ID: &str = "default";

// ---------------------------------------------------------------------------
// Static definitions
// ---------------------------------------------------------------------------

/// What an achievement requires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    Workouts(usize),
    Streak(u32),
    MuscleGroups(usize),
    Sets(u32),
    MaxWeight(f64),
}

impl Requirement {
    pub fn is_met(&self, stats: &AchievementStats) -> bool {
        match *self {
            Self::Workouts(n) => stats.total_workouts >= n,
            Self::Streak(n) => stats.current_streak >= n,
            Self::MuscleGroups(n) => stats.unique_muscle_groups >= n,
            Self::Sets(n) => stats.total_sets >= n,
            Self::MaxWeight(kg) => stats.max_weight >= kg,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub xp: u32,
    pub requirement: Requirement,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first_workout",
        name: "First Step",
        description: "Log your first workout",
        xp: 50,
        requirement: Requirement::Workouts(1),
    },
    Achievement {
        id: "workouts_5",
        name: "Consistent",
        description: "Complete 5 workouts",
        xp: 100,
        requirement: Requirement::Workouts(5),
    },
    Achievement {
        id: "workouts_10",
        name: "On Fire",
        description: "Complete 10 workouts",
        xp: 200,
        requirement: Requirement::Workouts(10),
    },
    Achievement {
        id: "workouts_25",
        name: "Dedicated",
        description: "Complete 25 workouts",
        xp: 500,
        requirement: Requirement::Workouts(25),
    },
    Achievement {
        id: "workouts_50",
        name: "Veteran",
        description: "Complete 50 workouts",
        xp: 1000,
        requirement: Requirement::Workouts(50),
    },
    Achievement {
        id: "streak_3",
        name: "Active Week",
        description: "Reach a streak of 3 workouts",
        xp: 75,
        requirement: Requirement::Streak(3),
    },
    Achievement {
        id: "streak_7",
        name: "Perfect Week",
        description: "Reach a streak of 7 workouts",
        xp: 200,
        requirement: Requirement::Streak(7),
    },
    Achievement {
        id: "streak_14",
        name: "Two Weeks Strong",
        description: "Reach a streak of 14 workouts",
        xp: 500,
        requirement: Requirement::Streak(14),
    },
    Achievement {
        id: "all_muscle_groups",
        name: "Well Rounded",
        description: "Train 6 different muscle groups",
        xp: 150,
        requirement: Requirement::MuscleGroups(6),
    },
    Achievement {
        id: "sets_100",
        name: "Centurion",
        description: "Complete 100 sets in total",
        xp: 100,
        requirement: Requirement::Sets(100),
    },
    Achievement {
        id: "sets_500",
        name: "Machine",
        description: "Complete 500 sets in total",
        xp: 300,
        requirement: Requirement::Sets(500),
    },
    Achievement {
        id: "lift_60kg",
        name: "Solid Base",
        description: "Lift 60 kg in any exercise",
        xp: 100,
        requirement: Requirement::MaxWeight(60.0),
    },
    Achievement {
        id: "lift_100kg",
        name: "100 Club",
        description: "Lift 100 kg in any exercise",
        xp: 300,
        requirement: Requirement::MaxWeight(100.0),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u32,
    pub title: &'static str,
    pub xp_required: u32,
}

pub const LEVELS: &[Level] = &[
    Level { level: 1, title: "Novice", xp_required: 0 },
    Level { level: 2, title: "Beginner", xp_required: 100 },
    Level { level: 3, title: "Apprentice", xp_required: 300 },
    Level { level: 4, title: "Intermediate", xp_required: 600 },
    Level { level: 5, title: "Dedicated", xp_required: 1000 },
    Level { level: 6, title: "Advanced", xp_required: 1500 },
    Level { level: 7, title: "Expert", xp_required: 2200 },
    Level { level: 8, title: "Master", xp_required: 3000 },
    Level { level: 9, title: "Elite", xp_required: 4000 },
    Level { level: 10, title: "Legend", xp_required: 5500 },
];

/// Current level and the XP threshold of the next one. At the top level the
/// threshold is the top level's own.
pub fn level_for(xp: u32) -> (Level, u32) {
    let index = LEVELS
        .iter()
        .rposition(|l| xp >= l.xp_required)
        .unwrap_or(0);
    let next = LEVELS.get(index + 1).unwrap_or(&LEVELS[index]).xp_required;
    (LEVELS[index], next)
}

pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

// ---------------------------------------------------------------------------
// Stats and profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AchievementStats {
    pub total_workouts: usize,
    pub current_streak: u32,
    pub unique_muscle_groups: usize,
    pub total_sets: u32,
    pub max_weight: f64,
}

impl AchievementStats {
    /// Aggregate the full history. The streak is computed separately because
    /// it only looks at the most recent sessions.
    pub fn from_history(workouts: &[Workout], current_streak: u32) -> Self {
        let groups: BTreeSet<String> = workouts
            .iter()
            .flat_map(|w| w.muscle_groups.iter().map(|g| g.to_lowercase()))
            .collect();

        Self {
            total_workouts: workouts.len(),
            current_streak,
            unique_muscle_groups: groups.len(),
            total_sets: sum_sets(workouts.iter().map(Workout::total_sets)),
            max_weight: max_weight(workouts),
        }
    }
}

/// Persisted gamification state of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub xp: u32,
    pub unlocked_achievements: Vec<String>,
    pub created_at: Timestamp,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            user_id: user_id.into(),
            xp: 0,
            unlocked_achievements: Vec::new(),
            created_at,
        }
    }

    pub fn has_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|u| u == id)
    }

    /// Unlock every achievement whose requirement is now met, add its XP and
    /// return the new unlocks in definition order. Existing unlocks are never
    /// touched.
    pub fn evaluate(&mut self, stats: &AchievementStats) -> Vec<&'static Achievement> {
        let mut unlocked = Vec::new();
        for achievement in ACHIEVEMENTS {
            if self.has_unlocked(achievement.id) || !achievement.requirement.is_met(stats) {
                continue;
            }
            self.unlocked_achievements.push(achievement.id.to_string());
            self.xp += achievement.xp;
            unlocked.push(achievement);
        }
        unlocked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub xp: u32,
}

impl From<&Achievement> for AchievementSummary {
    fn from(a: &Achievement) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.to_string(),
            description: a.description.to_string(),
            xp: a.xp,
        }
    }
}

/// The profile as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub level: u32,
    pub title: String,
    pub xp: u32,
    pub xp_next_level: u32,
    pub unlocked_achievements: Vec<String>,
    pub total_achievements: usize,
    pub new_achievements: Vec<AchievementSummary>,
}

impl ProfileReport {
    pub fn new(profile: &UserProfile, new_achievements: &[&Achievement]) -> Self {
        let (level, next) = level_for(profile.xp);
        Self {
            level: level.level,
            title: level.title.to_string(),
            xp: profile.xp,
            xp_next_level: next,
            unlocked_achievements: profile.unlocked_achievements.clone(),
            total_achievements: ACHIEVEMENTS.len(),
            new_achievements: new_achievements.iter().map(|a| (*a).into()).collect(),
        }
    }
}

/// One entry of the achievement catalogue with its unlock state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: AchievementSummary,
    pub unlocked: bool,
}

pub fn achievement_catalogue(profile: &UserProfile) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|a| AchievementStatus {
            achievement: a.into(),
            unlocked: profile.has_unlocked(a.id),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stats(total: usize, streak: u32, sets: u32, max: f64) -> AchievementStats {
        AchievementStats {
            total_workouts: total,
            current_streak: streak,
            unique_muscle_groups: 2,
            total_sets: sets,
            max_weight: max,
        }
    }

    #[test]
    fn catalogue_has_thirteen_unique_ids() {
        let ids: BTreeSet<&str> = ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), 13);
        assert_eq!(LEVELS.len(), 10);
    }

    #[test]
    fn levels_follow_thresholds() {
        assert_eq!(level_for(0), (LEVELS[0], 100));
        assert_eq!(level_for(99).0.level, 1);
        assert_eq!(level_for(100), (LEVELS[1], 300));
        assert_eq!(level_for(2999).0.title, "Expert");
        assert_eq!(level_for(10_000), (LEVELS[9], 5500));
    }

    #[test]
    fn evaluate_unlocks_and_adds_xp() {
        let mut profile = UserProfile::new(DEFAULT_USER_ID, Utc::now());
        let new = profile.evaluate(&stats(5, 3, 40, 60.0));

        let ids: Vec<&str> = new.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_workout", "workouts_5", "streak_3", "lift_60kg"]);
        assert_eq!(profile.xp, 50 + 100 + 75 + 100);
    }

    #[test]
    fn evaluate_is_monotonic() {
        let mut profile = UserProfile::new(DEFAULT_USER_ID, Utc::now());
        profile.evaluate(&stats(10, 7, 120, 100.0));
        let unlocked = profile.unlocked_achievements.clone();
        let xp = profile.xp;

        // Stats drop: nothing is revoked and no XP is lost.
        let new = profile.evaluate(&stats(1, 0, 3, 20.0));
        assert!(new.is_empty());
        assert_eq!(profile.unlocked_achievements, unlocked);
        assert_eq!(profile.xp, xp);

        // Re-evaluating the same stats grants nothing twice.
        assert!(profile.evaluate(&stats(10, 7, 120, 100.0)).is_empty());
    }

    #[test]
    fn report_and_catalogue_reflect_profile() {
        let mut profile = UserProfile::new(DEFAULT_USER_ID, Utc::now());
        let new = profile.evaluate(&stats(1, 1, 4, 40.0));
        let report = ProfileReport::new(&profile, &new);

        assert_eq!(report.level, 1);
        assert_eq!(report.xp, 50);
        assert_eq!(report.total_achievements, 13);
        assert_eq!(report.new_achievements[0].name, "First Step");

        let catalogue = achievement_catalogue(&profile);
        assert!(catalogue[0].unlocked);
        assert!(!catalogue[1].unlocked);
    }

    #[test]
    fn muscle_groups_are_counted_case_insensitively() {
        let workouts: Vec<Workout> = serde_json::from_value(serde_json::json!([
            {"name": "A", "type": "push", "date": "2026-03-01", "muscle_groups": ["Chest"],
             "exercises": [{"name": "Bench", "sets": 4, "reps": 8, "weight_kg": 70}]},
            {"name": "B", "type": "push", "date": "2026-03-03", "muscle_groups": ["chest", "triceps"]}
        ]))
        .unwrap();

        let s = AchievementStats::from_history(&workouts, 2);
        assert_eq!(s.unique_muscle_groups, 2);
        assert_eq!(s.total_sets, 4);
        assert_eq!(s.max_weight, 70.0);
    }
}
