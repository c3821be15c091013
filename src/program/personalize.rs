//! Personalization engine: goal bias and time-budget fitting
//!
//! A pass over a program runs in this order:
//! 1. goal text -> [`Goal`], rest time from tuning
//! 2. baseline set counts snapshotted (ceiling for set growth); the
//!    template's count, so repeated passes cannot ratchet sets upward
//! 3. rep ranges shifted by goal
//! 4. each day fitted to the session length: gentle rep-range rescale,
//!    then a bounded search over set counts

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ProgramPreferences, TargetSpec, UserExerciseEntry, UserProgram, UserProgramDay};
use crate::config::PersonalizationTuning;

/// A day within this many seconds of its target counts as fitted
pub const TOLERANCE_SECONDS: f64 = 5.0;

/// Work time of one set whose target is not a numeric range
pub const FLAT_SET_SECONDS: f64 = 45.0;

const RESCALE_UP: f64 = 1.25;
const RESCALE_DOWN: f64 = 0.75;

/// Rescaled bounds moving less than this are treated as unchanged
const RESCALE_NOISE: f64 = 0.5;

/// Normalized training goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Goal {
    MuscleGain,
    WeightLoss,
    Maintain,
}

impl Goal {
    /// Map free-form goal text to a goal by keyword
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("gain") {
            Goal::MuscleGain
        } else if text.contains("loss") || text.contains("lose") {
            Goal::WeightLoss
        } else {
            Goal::Maintain
        }
    }

    /// Multiplier applied to rep ranges
    pub fn rep_shift(&self) -> f64 {
        match self {
            Goal::MuscleGain => 0.75,
            Goal::WeightLoss => 1.25,
            Goal::Maintain => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::MuscleGain => "Muscle gain",
            Goal::WeightLoss => "Weight loss",
            Goal::Maintain => "Maintain",
        }
    }
}

/// How a day's time fitting ended
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FitOutcome {
    /// Estimate was already within tolerance
    AlreadyFit,
    /// Rep-range rescale alone brought it within tolerance
    Rescaled,
    /// Set search brought it within tolerance
    Converged,
    /// Set search stopped: no exercise could take another change
    Exhausted,
    /// Set search stepped past the tolerance window and stopped there
    Approximate,
}

impl FitOutcome {
    pub fn is_within_tolerance(&self) -> bool {
        matches!(self, FitOutcome::AlreadyFit | FitOutcome::Rescaled | FitOutcome::Converged)
    }
}

/// Time-fitting record for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayFit {
    pub day_index: usize,
    pub target_seconds: f64,
    pub initial_seconds: f64,
    pub estimated_seconds: f64,
    pub rescaled_exercises: usize,
    pub sets_removed: i32,
    pub sets_added: i32,
    pub outcome: FitOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalizationReport {
    pub goal: Goal,
    pub rest_seconds: i32,
    /// Empty when no session length was given
    pub days: Vec<DayFit>,
}

type Baseline = HashMap<(usize, String), i32>;

/// Personalize a program in place for a goal and session length.
///
/// Only `sets` and `target_reps` change; logged reps and weights are
/// left alone. A session length of zero or less skips time fitting.
pub fn personalize(
    program: &mut UserProgram,
    preferences: &ProgramPreferences,
    tuning: &PersonalizationTuning,
) -> PersonalizationReport {
    let goal = Goal::from_text(&preferences.workout_goal);
    let rest_seconds = tuning.rest_seconds(goal);

    let mut baseline: Baseline = HashMap::new();
    for day in &program.schedule {
        for entry in &day.exercises {
            baseline
                .entry((day.day_index, entry.name.clone()))
                .or_insert(entry.baseline());
        }
    }

    shift_rep_ranges(program, goal);

    let mut days = Vec::new();
    if preferences.workout_length_minutes > 0 {
        let target_seconds = f64::from(preferences.workout_length_minutes) * 60.0;
        for day in program.schedule.iter_mut() {
            let fit = fit_day(day, &baseline, target_seconds, f64::from(rest_seconds), tuning);
            debug!(
                "Day {} ({}): {:.0}s -> {:.0}s of {:.0}s, {:?}",
                fit.day_index, day.day_name, fit.initial_seconds, fit.estimated_seconds,
                fit.target_seconds, fit.outcome
            );
            days.push(fit);
        }
    }

    program.preferences = Some(preferences.clone());
    program.updated_at = Utc::now();

    info!(
        "Personalized '{}' for {} ({} min, rest {}s)",
        program.template_name,
        goal.label(),
        preferences.workout_length_minutes,
        rest_seconds
    );

    PersonalizationReport {
        goal,
        rest_seconds,
        days,
    }
}

/// Scale every numeric target of the program by the goal's factor
pub fn shift_rep_ranges(program: &mut UserProgram, goal: Goal) {
    let factor = goal.rep_shift();
    for entry in program.schedule.iter_mut().flat_map(|d| d.exercises.iter_mut()) {
        let spec = TargetSpec::parse(&entry.target_reps);
        if !spec.is_numeric() {
            continue;
        }
        let (low, high) = scale_range(spec.low, spec.high, factor);
        entry.target_reps = spec.with_range(low, high).render();
    }
}

/// Scale a range, rounding half away from zero; keeps 1 <= low <= high
pub fn scale_range(low: i32, high: i32, factor: f64) -> (i32, i32) {
    let low = round_rep(f64::from(low) * factor);
    let high = round_rep(f64::from(high) * factor).max(low);
    (low, high)
}

fn round_rep(value: f64) -> i32 {
    (value.round() as i32).max(1)
}

/// Work seconds of one set of an exercise
pub fn per_set_work_seconds(entry: &UserExerciseEntry, tuning: &PersonalizationTuning) -> f64 {
    let spec = TargetSpec::parse(&entry.target_reps);
    if spec.is_numeric() {
        spec.average() * tuning.seconds_per_rep
    } else {
        FLAT_SET_SECONDS
    }
}

/// Estimated duration of a day: work of every set plus rest between sets
pub fn estimate_day_seconds(
    day: &UserProgramDay,
    rest_seconds: f64,
    tuning: &PersonalizationTuning,
) -> f64 {
    day.exercises
        .iter()
        .map(|entry| {
            let sets = f64::from(entry.sets);
            sets * per_set_work_seconds(entry, tuning) + (sets - 1.0).max(0.0) * rest_seconds
        })
        .sum()
}

fn within_tolerance(estimated: f64, target: f64) -> bool {
    (estimated - target).abs() <= TOLERANCE_SECONDS
}

fn fit_day(
    day: &mut UserProgramDay,
    baseline: &Baseline,
    target_seconds: f64,
    rest_seconds: f64,
    tuning: &PersonalizationTuning,
) -> DayFit {
    let initial_seconds = estimate_day_seconds(day, rest_seconds, tuning);
    let mut fit = DayFit {
        day_index: day.day_index,
        target_seconds,
        initial_seconds,
        estimated_seconds: initial_seconds,
        rescaled_exercises: 0,
        sets_removed: 0,
        sets_added: 0,
        outcome: FitOutcome::AlreadyFit,
    };

    if within_tolerance(initial_seconds, target_seconds) {
        return fit;
    }

    let factor = if initial_seconds < target_seconds {
        RESCALE_UP
    } else {
        RESCALE_DOWN
    };
    for entry in day.exercises.iter_mut() {
        if let Some(delta) = rescale_entry(entry, factor, tuning) {
            fit.estimated_seconds += delta;
            fit.rescaled_exercises += 1;
        }
    }

    if within_tolerance(fit.estimated_seconds, target_seconds) {
        fit.outcome = FitOutcome::Rescaled;
        return fit;
    }

    let set_cost = |entry: &UserExerciseEntry| per_set_work_seconds(entry, tuning) + rest_seconds;
    let mut exhausted = false;

    while fit.estimated_seconds > target_seconds + TOLERANCE_SECONDS {
        // Most expensive set first; earliest exercise wins ties
        let mut pick: Option<(usize, f64)> = None;
        for (i, entry) in day.exercises.iter().enumerate() {
            if entry.sets <= tuning.min_sets {
                continue;
            }
            let cost = set_cost(entry);
            if pick.is_none_or(|(_, best)| cost > best) {
                pick = Some((i, cost));
            }
        }
        let Some((i, cost)) = pick else {
            exhausted = true;
            break;
        };
        day.exercises[i].sets -= 1;
        fit.estimated_seconds -= cost;
        fit.sets_removed += 1;
    }

    while fit.estimated_seconds < target_seconds - TOLERANCE_SECONDS {
        // Resulting estimate closest to target; bigger set wins ties
        let mut pick: Option<(usize, f64, f64)> = None;
        for (i, entry) in day.exercises.iter().enumerate() {
            let ceiling = baseline
                .get(&(day.day_index, entry.name.clone()))
                .copied()
                .unwrap_or_else(|| entry.baseline())
                + tuning.max_sets_bump;
            if entry.sets >= ceiling {
                continue;
            }
            let cost = set_cost(entry);
            let distance = (fit.estimated_seconds + cost - target_seconds).abs();
            let better = match pick {
                None => true,
                Some((_, best_distance, best_cost)) => {
                    distance < best_distance || (distance == best_distance && cost > best_cost)
                }
            };
            if better {
                pick = Some((i, distance, cost));
            }
        }
        let Some((i, _, cost)) = pick else {
            exhausted = true;
            break;
        };
        day.exercises[i].sets += 1;
        fit.estimated_seconds += cost;
        fit.sets_added += 1;
    }

    fit.outcome = if within_tolerance(fit.estimated_seconds, target_seconds) {
        FitOutcome::Converged
    } else if exhausted {
        FitOutcome::Exhausted
    } else {
        FitOutcome::Approximate
    };
    fit
}

/// Nudge one numeric target toward the session length without touching
/// sets. Returns the change in estimated seconds, or `None` if skipped.
fn rescale_entry(
    entry: &mut UserExerciseEntry,
    factor: f64,
    tuning: &PersonalizationTuning,
) -> Option<f64> {
    let spec = TargetSpec::parse(&entry.target_reps);
    if !spec.is_numeric() {
        return None;
    }

    let bound = |value: f64| {
        (value * factor)
            .max(value * tuning.time_scale_min)
            .min(value * tuning.time_scale_max)
    };
    let (low, high) = (f64::from(spec.low), f64::from(spec.high));
    let (candidate_low, candidate_high) = (bound(low), bound(high));

    if (candidate_low - low).abs() <= RESCALE_NOISE && (candidate_high - high).abs() <= RESCALE_NOISE {
        return None;
    }

    let new_low = round_rep(candidate_low);
    let new_high = round_rep(candidate_high).max(new_low);
    let rescaled = spec.with_range(new_low, new_high);

    let delta = (rescaled.average() - spec.average()) * tuning.seconds_per_rep * f64::from(entry.sets);
    entry.target_reps = rescaled.render();
    Some(delta)
}
