//! Aggregate statistics over workout history.
//!
//! Every function here is a linear pass over documents already loaded by the
//! caller; none of them touch the database.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, Duration};
use serde::Serialize;

use crate::types::TrainingDate;
use crate::workout::{round1, sum_sets, Reps, Workout};

/// Personal records reported by default.
pub const TOP_RECORDS: usize = 10;

/// Frequent exercises reported by default.
pub const TOP_FREQUENT: usize = 20;

/// Above this rep count a one-rep-max estimate is not meaningful.
pub const MAX_REPS_FOR_1RM: u32 = 12;

/// Monday of the week containing `date`.
pub fn week_start(date: TrainingDate) -> TrainingDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

// ---------------------------------------------------------------------------
// General stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneralStats {
    pub total_workouts: usize,
    pub total_exercises: usize,
    pub unique_exercises: usize,
    pub days_trained: usize,
    pub by_type: BTreeMap<String, u32>,
    pub by_muscle_group: BTreeMap<String, u32>,
}

pub fn general_stats(workouts: &[Workout]) -> GeneralStats {
    let mut stats = GeneralStats {
        total_workouts: workouts.len(),
        ..GeneralStats::default()
    };
    let mut names = BTreeSet::new();
    let mut days = BTreeSet::new();

    for w in workouts {
        stats.total_exercises += w.exercises.len();
        *stats.by_type.entry(w.kind.clone()).or_default() += 1;
        for group in &w.muscle_groups {
            *stats.by_muscle_group.entry(group.clone()).or_default() += 1;
        }
        names.extend(w.exercises.iter().map(|e| e.name.as_str()));
        days.insert(w.date);
    }

    stats.unique_exercises = names.len();
    stats.days_trained = days.len();
    stats
}

// ---------------------------------------------------------------------------
// Current week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub workouts: usize,
    pub muscle_groups: Vec<String>,
    pub total_sets: u32,
    pub days_left: u32,
}

pub fn week_summary(workouts: &[Workout], today: TrainingDate) -> WeekSummary {
    let monday = week_start(today);
    let this_week: Vec<&Workout> = workouts.iter().filter(|w| w.date >= monday).collect();

    let groups: BTreeSet<String> = this_week
        .iter()
        .flat_map(|w| w.muscle_groups.iter().cloned())
        .collect();

    WeekSummary {
        workouts: this_week.len(),
        muscle_groups: groups.into_iter().collect(),
        total_sets: sum_sets(this_week.iter().map(|w| w.total_sets())),
        days_left: 7 - today.weekday().num_days_from_monday(),
    }
}

// ---------------------------------------------------------------------------
// Personal records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight_kg: f64,
    pub date: TrainingDate,
}

/// Heaviest usable weight per exercise (names compared case-insensitively),
/// heaviest first. The first session that reached a weight keeps the record.
pub fn personal_records(workouts: &[Workout], limit: usize) -> Vec<PersonalRecord> {
    let mut by_name: HashMap<String, PersonalRecord> = HashMap::new();

    for w in workouts {
        for e in &w.exercises {
            let Some(weight) = e.weight_kg.usable() else {
                continue;
            };
            let key = e.name.to_lowercase();
            match by_name.get(&key) {
                Some(pr) if pr.weight_kg >= weight => {}
                _ => {
                    by_name.insert(
                        key,
                        PersonalRecord {
                            exercise: e.name.clone(),
                            weight_kg: weight,
                            date: w.date,
                        },
                    );
                }
            }
        }
    }

    let mut records: Vec<PersonalRecord> = by_name.into_values().collect();
    records.sort_by(|a, b| {
        b.weight_kg
            .total_cmp(&a.weight_kg)
            .then_with(|| a.exercise.cmp(&b.exercise))
    });
    records.truncate(limit);
    records
}

/// Heaviest usable weight across all history.
pub fn max_weight(workouts: &[Workout]) -> f64 {
    workouts
        .iter()
        .flat_map(|w| w.exercises.iter())
        .filter_map(|e| e.weight_kg.usable())
        .fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Exercise progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: TrainingDate,
    pub exercise: String,
    pub weight_kg: f64,
    pub sets: u32,
    pub reps: Reps,
}

/// Usable weights of every exercise whose name contains `query`
/// (case-insensitive), oldest first.
pub fn exercise_progress(workouts: &[Workout], query: &str) -> Vec<ProgressPoint> {
    let needle = query.trim().to_lowercase();
    let mut points: Vec<ProgressPoint> = workouts
        .iter()
        .flat_map(|w| w.exercises.iter().map(move |e| (w.date, e)))
        .filter(|(_, e)| e.name.to_lowercase().contains(&needle))
        .filter_map(|(date, e)| {
            e.weight_kg.usable().map(|weight| ProgressPoint {
                date,
                exercise: e.name.clone(),
                weight_kg: weight,
                sets: e.sets,
                reps: e.reps.clone(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressTrend {
    pub records: usize,
    pub first_weight: f64,
    pub last_weight: f64,
    pub max_weight: f64,
    pub absolute_change: f64,
    pub percent_change: f64,
    pub trend: Trend,
}

/// Summarise a progress series. `None` when there are no points.
pub fn progress_trend(points: &[ProgressPoint]) -> Option<ProgressTrend> {
    let first = points.first()?.weight_kg;
    let last = points.last()?.weight_kg;
    let max = points.iter().map(|p| p.weight_kg).fold(f64::MIN, f64::max);

    let trend = if last > first {
        Trend::Up
    } else if last < first {
        Trend::Down
    } else {
        Trend::Flat
    };

    Some(ProgressTrend {
        records: points.len(),
        first_weight: first,
        last_weight: last,
        max_weight: max,
        absolute_change: round1(last - first),
        percent_change: if first > 0.0 {
            round1((last - first) / first * 100.0)
        } else {
            0.0
        },
        trend,
    })
}

// ---------------------------------------------------------------------------
// Volume and distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyVolume {
    pub week: TrainingDate,
    pub workouts: u32,
    pub sets: u32,
    pub exercises: u32,
}

/// Workouts, sets and exercises per Monday-starting week, oldest first.
pub fn weekly_volume(workouts: &[Workout]) -> Vec<WeeklyVolume> {
    let mut weeks: BTreeMap<TrainingDate, WeeklyVolume> = BTreeMap::new();

    for w in workouts {
        let week = week_start(w.date);
        let entry = weeks.entry(week).or_insert(WeeklyVolume {
            week,
            workouts: 0,
            sets: 0,
            exercises: 0,
        });
        entry.workouts += 1;
        entry.sets = entry.sets.saturating_add(w.total_sets());
        entry.exercises += w.exercises.len() as u32;
    }

    weeks.into_values().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupLoad {
    pub workouts: u32,
    pub sets: u32,
}

/// Sessions and sets per muscle group (lowercased).
pub fn muscle_group_distribution(workouts: &[Workout]) -> BTreeMap<String, GroupLoad> {
    let mut groups: BTreeMap<String, GroupLoad> = BTreeMap::new();
    for w in workouts {
        for group in &w.muscle_groups {
            let load = groups.entry(group.to_lowercase()).or_default();
            load.workouts += 1;
            load.sets = load.sets.saturating_add(w.total_sets());
        }
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentExercise {
    pub name: String,
    pub times: u32,
    pub last_weight: Option<f64>,
    pub max_weight: f64,
    pub mean_weight: Option<f64>,
}

/// Most performed exercises. `workouts` must be oldest first so that
/// `last_weight` is the most recent one.
pub fn frequent_exercises(workouts: &[Workout], limit: usize) -> Vec<FrequentExercise> {
    let mut order: Vec<String> = Vec::new();
    let mut acc: HashMap<String, (FrequentExercise, Vec<f64>)> = HashMap::new();

    for e in workouts.iter().flat_map(|w| w.exercises.iter()) {
        if e.name.is_empty() {
            continue;
        }
        let (entry, weights) = acc.entry(e.name.clone()).or_insert_with(|| {
            order.push(e.name.clone());
            (
                FrequentExercise {
                    name: e.name.clone(),
                    times: 0,
                    last_weight: None,
                    max_weight: 0.0,
                    mean_weight: None,
                },
                Vec::new(),
            )
        });
        entry.times += 1;
        if let Some(weight) = e.weight_kg.usable() {
            weights.push(weight);
            entry.last_weight = Some(weight);
            entry.max_weight = entry.max_weight.max(weight);
        }
    }

    let mut result: Vec<FrequentExercise> = order
        .into_iter()
        .filter_map(|name| acc.remove(&name))
        .map(|(mut entry, weights)| {
            if !weights.is_empty() {
                entry.mean_weight = Some(round1(weights.iter().sum::<f64>() / weights.len() as f64));
            }
            entry
        })
        .collect();
    result.sort_by(|a, b| b.times.cmp(&a.times));
    result.truncate(limit);
    result
}

// ---------------------------------------------------------------------------
// One-rep max
// ---------------------------------------------------------------------------

/// Brzycki estimate of the one-rep max.
pub fn brzycki(weight: f64, reps: u32) -> f64 {
    if reps == 0 || weight <= 0.0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    round1(weight * (36.0 / (37.0 - f64::from(reps))))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneRepMax {
    pub exercise: String,
    pub estimated_1rm: f64,
    pub weight_kg: f64,
    pub reps: u32,
    pub date: TrainingDate,
}

/// Best estimated one-rep max per exercise, strongest first.
///
/// Uses the heaviest set and the lowest rep count of each entry; entries with
/// more than [`MAX_REPS_FOR_1RM`] reps are skipped.
pub fn one_rep_maxes(workouts: &[Workout]) -> Vec<OneRepMax> {
    let mut best: HashMap<String, OneRepMax> = HashMap::new();

    for w in workouts {
        for e in &w.exercises {
            let (Some(weight), Some(reps)) = (e.weight_kg.usable(), e.reps.min()) else {
                continue;
            };
            if reps == 0 || reps > MAX_REPS_FOR_1RM {
                continue;
            }
            let rm = brzycki(weight, reps);
            if best.get(&e.name).map_or(true, |b| rm > b.estimated_1rm) {
                best.insert(
                    e.name.clone(),
                    OneRepMax {
                        exercise: e.name.clone(),
                        estimated_1rm: rm,
                        weight_kg: weight,
                        reps,
                        date: w.date,
                    },
                );
            }
        }
    }

    let mut result: Vec<OneRepMax> = best.into_values().collect();
    result.sort_by(|a, b| {
        b.estimated_1rm
            .total_cmp(&a.estimated_1rm)
            .then_with(|| a.exercise.cmp(&b.exercise))
    });
    result
}

// ---------------------------------------------------------------------------
// Week over week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekLoad {
    pub workouts: u32,
    pub sets: u32,
    pub exercises: u32,
    pub volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekChange {
    pub workouts: f64,
    pub sets: f64,
    pub exercises: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyComparison {
    pub this_week: WeekLoad,
    pub last_week: WeekLoad,
    pub change: WeekChange,
}

/// Percent change, 100 when growing from zero.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    round1((current - previous) / previous * 100.0)
}

pub fn weekly_comparison(workouts: &[Workout], today: TrainingDate) -> WeeklyComparison {
    let this_monday = week_start(today);
    let last_monday = this_monday - Duration::days(7);

    let mut this_week = WeekLoad::default();
    let mut last_week = WeekLoad::default();

    for w in workouts {
        let load = if w.date >= this_monday {
            &mut this_week
        } else if w.date >= last_monday {
            &mut last_week
        } else {
            continue;
        };
        load.workouts += 1;
        for e in &w.exercises {
            load.sets = load.sets.saturating_add(e.sets);
            load.exercises += 1;
            if let Some(weight) = e.weight_kg.mean() {
                let reps = e.reps.mean().unwrap_or(f64::from(crate::workout::DEFAULT_REPS));
                load.volume += f64::from(e.sets) * reps * weight;
            }
        }
    }
    this_week.volume = round1(this_week.volume);
    last_week.volume = round1(last_week.volume);

    let change = WeekChange {
        workouts: percent_change(f64::from(this_week.workouts), f64::from(last_week.workouts)),
        sets: percent_change(f64::from(this_week.sets), f64::from(last_week.sets)),
        exercises: percent_change(f64::from(this_week.exercises), f64::from(last_week.exercises)),
        volume: percent_change(this_week.volume, last_week.volume),
    };

    WeeklyComparison {
        this_week,
        last_week,
        change,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
