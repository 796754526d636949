//! Training streak: consecutive sessions with a small gap tolerance.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::types::TrainingDate;

/// Number of most recent workouts the streak is computed from.
pub const STREAK_WINDOW: i64 = 60;

/// The latest session may be at most this many days before today.
pub const MAX_DAYS_SINCE_LAST: i64 = 2;

/// Maximum gap in days between two sessions that keeps a streak alive.
pub const MAX_GAP_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Compute the current streak from workout dates (any order, duplicates
/// allowed).
pub fn compute_streak(dates: impl IntoIterator<Item = TrainingDate>, today: TrainingDate) -> Streak {
    let unique: BTreeSet<TrainingDate> = dates.into_iter().collect();
    let mut newest_first = unique.into_iter().rev();

    let mut current = 0;
    if let Some(latest) = newest_first.next() {
        if (today - latest).num_days() <= MAX_DAYS_SINCE_LAST {
            current = 1;
            let mut previous = latest;
            for date in newest_first {
                if (previous - date).num_days() > MAX_GAP_DAYS {
                    break;
                }
                current += 1;
                previous = date;
            }
        }
    }

    Streak {
        current_streak: current,
        // TODO: persist the best streak on the user profile; until then it
        // mirrors the current streak.
        best_streak: current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> TrainingDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        let streak = compute_streak(Vec::new(), d("2026-03-10"));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.best_streak, 0);
    }

    #[test]
    fn stale_last_session_breaks_streak() {
        let streak = compute_streak(vec![d("2026-03-07"), d("2026-03-06")], d("2026-03-10"));
        assert_eq!(streak.current_streak, 0);
    }

    #[test]
    fn counts_sessions_within_gap_tolerance() {
        let dates = vec![
            d("2026-03-09"),
            d("2026-03-07"),
            d("2026-03-07"),
            d("2026-03-04"),
            // 5 day gap ends the streak.
            d("2026-02-27"),
        ];
        let streak = compute_streak(dates, d("2026-03-10"));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.best_streak, streak.current_streak);
    }

    #[test]
    fn session_today_starts_streak() {
        let streak = compute_streak(vec![d("2026-03-10")], d("2026-03-10"));
        assert_eq!(streak.current_streak, 1);
    }
}
