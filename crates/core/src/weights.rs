//! Weight suggestion from training history.
//!
//! The lookup is a keyword-overlap scan: the exercise name is reduced to its
//! significant words and every historical exercise is scored by how many of
//! those words it contains. The best-scoring entry with a usable weight wins;
//! otherwise the average weight of sessions sharing a muscle group is used;
//! otherwise the answer is the `"adjust"` sentinel.

use serde::Serialize;

use crate::types::TrainingDate;
use crate::workout::{round1, Weight, Workout};

/// How many of the most recent workouts a lookup scans.
pub const HISTORY_WINDOW: i64 = 30;

/// Number of matches reported by [`explain_suggestion`].
pub const MAX_REPORTED_MATCHES: usize = 10;

/// Words that never identify an exercise.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "at", "for", "in", "of", "on", "or", "the", "to", "with",
];

/// Tokens of this length or shorter are ignored.
const MIN_KEYWORD_LEN: usize = 2;

/// Lowercase, split on whitespace, drop stop-words and short tokens.
pub fn keywords(exercise_name: &str) -> Vec<String> {
    exercise_name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Number of keywords found (as substrings) in a historical exercise name.
pub fn overlap_score(keywords: &[String], candidate: &str) -> usize {
    let candidate = candidate.to_lowercase();
    keywords
        .iter()
        .filter(|k| candidate.contains(k.as_str()))
        .count()
}

/// Suggest a working weight for `exercise_name`.
///
/// `history` must be ordered newest first; on equal scores the entry met
/// first (the most recent) is kept.
pub fn suggest_weight(exercise_name: &str, muscle_groups: &[String], history: &[Workout]) -> Weight {
    let keywords = keywords(exercise_name);

    if let Some(best) = best_name_match(&keywords, history) {
        return Weight::Kg(best);
    }

    match group_average(muscle_groups, history) {
        Some(avg) => Weight::Kg(avg),
        None => Weight::adjust(),
    }
}

fn best_name_match(keywords: &[String], history: &[Workout]) -> Option<f64> {
    let mut best: Option<(usize, f64)> = None;

    for workout in history {
        for exercise in &workout.exercises {
            let score = overlap_score(keywords, &exercise.name);
            if score == 0 {
                continue;
            }
            let Some(weight) = exercise.weight_kg.usable() else {
                continue;
            };
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, weight));
            }
        }
    }

    best.map(|(_, weight)| weight)
}

/// Mean of every numeric weight in sessions sharing a muscle group.
fn group_average(muscle_groups: &[String], history: &[Workout]) -> Option<f64> {
    let weights: Vec<f64> = history
        .iter()
        .filter(|w| w.shares_group(muscle_groups))
        .flat_map(|w| w.exercises.iter())
        .flat_map(|e| e.weight_kg.numeric_values())
        .collect();

    if weights.is_empty() {
        return None;
    }
    Some(round1(weights.iter().sum::<f64>() / weights.len() as f64))
}

// ---------------------------------------------------------------------------
// Explanation
// ---------------------------------------------------------------------------

/// A historical exercise that shares at least one keyword with the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightMatch {
    pub exercise: String,
    pub weight_kg: Weight,
    pub score: usize,
    pub date: TrainingDate,
}

/// Everything the lookup considered, for troubleshooting odd suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct WeightExplanation {
    pub exercise: String,
    pub keywords: Vec<String>,
    pub workouts_scanned: usize,
    pub matches: Vec<WeightMatch>,
    pub suggestion: Weight,
}

pub fn explain_suggestion(
    exercise_name: &str,
    muscle_groups: &[String],
    history: &[Workout],
) -> WeightExplanation {
    let keywords = keywords(exercise_name);

    let mut matches: Vec<WeightMatch> = history
        .iter()
        .flat_map(|w| w.exercises.iter().map(move |e| (w.date, e)))
        .filter_map(|(date, e)| {
            let score = overlap_score(&keywords, &e.name);
            (score > 0).then(|| WeightMatch {
                exercise: e.name.clone(),
                weight_kg: e.weight_kg.clone(),
                score,
                date,
            })
        })
        .collect();
    // Stable sort keeps recency order among equal scores.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(MAX_REPORTED_MATCHES);

    WeightExplanation {
        exercise: exercise_name.to_string(),
        suggestion: suggest_weight(exercise_name, muscle_groups, history),
        keywords,
        workouts_scanned: history.len(),
        matches,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{Exercise, Reps};

    fn exercise(name: &str, weight: Weight) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: 3,
            reps: Reps::Uniform(10),
            weight_kg: weight,
        }
    }

    fn workout(date: &str, groups: &[&str], exercises: Vec<Exercise>) -> Workout {
        Workout {
            key: None,
            name: "Session".to_string(),
            kind: "push".to_string(),
            date: date.parse().unwrap(),
            muscle_groups: groups.iter().map(|g| g.to_string()).collect(),
            exercises,
            notes: None,
            duration_min: None,
        }
    }

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn keywords_drop_stop_words_and_short_tokens() {
        assert_eq!(
            keywords("  Press of the Bench with DB "),
            vec!["press".to_string(), "bench".to_string()]
        );
    }

    #[test]
    fn highest_overlap_wins() {
        let history = vec![
            workout(
                "2026-03-05",
                &["chest"],
                vec![exercise("Incline Press", Weight::Kg(40.0))],
            ),
            workout(
                "2026-03-01",
                &["chest"],
                vec![exercise("Incline Dumbbell Press", Weight::Kg(24.0))],
            ),
        ];

        let w = suggest_weight("Incline Dumbbell Press", &groups(&["chest"]), &history);
        assert_eq!(w, Weight::Kg(24.0));
    }

    #[test]
    fn ties_prefer_most_recent_entry() {
        let history = vec![
            workout("2026-03-05", &["chest"], vec![exercise("Bench Press", Weight::Kg(70.0))]),
            workout("2026-03-01", &["chest"], vec![exercise("Bench Press", Weight::Kg(65.0))]),
        ];

        let w = suggest_weight("bench press", &[], &history);
        assert_eq!(w, Weight::Kg(70.0));
    }

    #[test]
    fn list_weight_uses_heaviest_set() {
        let history = vec![workout(
            "2026-03-05",
            &["back"],
            vec![exercise("Barbell Row", Weight::PerSet(vec![50.0, 55.0, 52.5]))],
        )];

        assert_eq!(suggest_weight("Row", &[], &history), Weight::Kg(55.0));
    }

    #[test]
    fn matches_without_numeric_weight_are_skipped() {
        let history = vec![
            workout("2026-03-05", &["legs"], vec![exercise("Squat", Weight::adjust())]),
            workout("2026-03-01", &["legs"], vec![exercise("Front Squat", Weight::Kg(60.0))]),
        ];

        assert_eq!(suggest_weight("Squat", &[], &history), Weight::Kg(60.0));
    }

    #[test]
    fn falls_back_to_muscle_group_average() {
        let history = vec![
            workout(
                "2026-03-05",
                &["Chest", "Triceps"],
                vec![
                    exercise("Bench Press", Weight::Kg(70.0)),
                    exercise("Dips", Weight::PerSet(vec![10.0, 15.0])),
                ],
            ),
            workout("2026-03-03", &["legs"], vec![exercise("Squat", Weight::Kg(100.0))]),
        ];

        let w = suggest_weight("Cable Fly", &groups(&["chest"]), &history);
        // (70 + 10 + 15) / 3 = 31.67 -> 31.7
        assert_eq!(w, Weight::Kg(31.7));
    }

    #[test]
    fn returns_adjust_without_numeric_history() {
        let history = vec![workout(
            "2026-03-05",
            &["chest"],
            vec![exercise("Push Up", Weight::Label("bodyweight".into()))],
        )];

        assert!(suggest_weight("Cable Fly", &groups(&["chest"]), &history).is_adjust());
        assert!(suggest_weight("Cable Fly", &groups(&["chest"]), &[]).is_adjust());
    }

    #[test]
    fn explanation_orders_by_score_then_recency() {
        let history = vec![
            workout("2026-03-05", &["chest"], vec![exercise("Press Machine", Weight::Kg(50.0))]),
            workout(
                "2026-03-01",
                &["chest"],
                vec![exercise("Incline Bench Press", Weight::Kg(60.0))],
            ),
            workout("2026-02-27", &["chest"], vec![exercise("Leg Press", Weight::Kg(150.0))]),
        ];

        let report = explain_suggestion("Incline Bench Press", &groups(&["chest"]), &history);
        assert_eq!(report.workouts_scanned, 3);
        assert_eq!(report.matches[0].exercise, "Incline Bench Press");
        assert_eq!(report.matches[1].exercise, "Press Machine");
        assert_eq!(report.matches[2].exercise, "Leg Press");
        assert_eq!(report.suggestion, Weight::Kg(60.0));
    }
}
