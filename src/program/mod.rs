//! Program module - templates, user programs and their personalization
//!
//! Features:
//! - Target rep string parsing
//! - Template selection with type fallback
//! - Instantiation of fresh user programs
//! - Change classification (rebuild / relabel / re-personalize)
//! - Goal and time-budget fitting

pub mod catalog;
pub mod classify;
pub mod instantiate;
pub mod personalize;
pub mod target;

pub use catalog::{JsonCatalog, StaticCatalog, TemplateCatalog, select_template};
pub use classify::{ProgramChange, classify};
pub use instantiate::{instantiate, normalize_day_name};
pub use personalize::{DayFit, FitOutcome, Goal, PersonalizationReport, personalize};
pub use target::{TargetKind, TargetSpec};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Smallest supported number of training days per week
pub const MIN_DAYS: usize = 3;
/// Largest supported number of training days per week
pub const MAX_DAYS: usize = 6;

/// Weight unit used when a template does not name one
pub const DEFAULT_WEIGHT_UNIT: &str = "lbs";

/// Equipment a program is built around.
///
/// Declaration order is the ordering used by type fallback.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum,
)]
pub enum ProgramType {
    Bodyweight,
    HomeDumbbell,
    Gym,
}

impl ProgramType {
    pub fn label(&self) -> &'static str {
        match self {
            ProgramType::Bodyweight => "Bodyweight",
            ProgramType::HomeDumbbell => "Home dumbbell",
            ProgramType::Gym => "Gym",
        }
    }

    /// All program types for iteration
    pub fn all() -> &'static [ProgramType] {
        &[ProgramType::Bodyweight, ProgramType::HomeDumbbell, ProgramType::Gym]
    }
}

impl std::fmt::Display for ProgramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Exercise slot in a template day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateExercise {
    pub name: String,
    pub sets: i32,
    pub target_rep_spec: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateDay {
    pub day_index: usize,
    pub focus: String,
    pub exercises: Vec<TemplateExercise>,
}

/// Immutable, goal-agnostic workout blueprint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramTemplate {
    pub name: String,
    pub days: usize,
    pub program_type: ProgramType,
    pub schedule: Vec<TemplateDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Weight {
    pub value: f64,
    pub unit: String,
}

/// One exercise of a user's day, with logged progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserExerciseEntry {
    pub name: String,
    pub sets: i32,
    pub target_reps: String,
    pub reps_completed: i32,
    pub weight: Weight,
    /// Set count of the template exercise this entry was created from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_sets: Option<i32>,
}

impl UserExerciseEntry {
    /// Set count that growth is measured from: the template's, or the
    /// current count if it is lower or the template's is unknown
    pub fn baseline(&self) -> i32 {
        self.baseline_sets.map_or(self.sets, |b| b.min(self.sets))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProgramDay {
    pub day_index: usize,
    /// User-facing label ("Mon", "Legs day", ...)
    pub day_name: String,
    pub focus: String,
    pub exercises: Vec<UserExerciseEntry>,
}

/// Goal and session length the program was fitted to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProgramPreferences {
    pub workout_goal: String,
    pub workout_length_minutes: i32,
}

impl ProgramPreferences {
    pub fn new(goal: impl Into<String>, minutes: i32) -> Self {
        Self {
            workout_goal: goal.into(),
            workout_length_minutes: minutes,
        }
    }

    /// Same goal text (ignoring case and surrounding space) and same length
    pub fn same_as(&self, other: &ProgramPreferences) -> bool {
        self.workout_goal.trim().to_lowercase() == other.workout_goal.trim().to_lowercase()
            && self.workout_length_minutes == other.workout_length_minutes
    }
}

/// A user's own program, instantiated from a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProgram {
    pub template_name: String,
    pub days: usize,
    pub program_type: ProgramType,
    pub schedule: Vec<UserProgramDay>,
    /// Preferences the schedule was last personalized with
    #[serde(default)]
    pub preferences: Option<ProgramPreferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProgram {
    /// Configuration this program currently represents
    pub fn config(&self) -> ProgramConfig {
        ProgramConfig {
            day_names: self.schedule.iter().map(|d| d.day_name.clone()).collect(),
            program_type: self.program_type,
            preferences: self.preferences.clone(),
        }
    }

    /// Overwrite day labels positionally; the caller checks the count
    pub fn relabel(&mut self, day_names: &[String]) {
        for (day, name) in self.schedule.iter_mut().zip(day_names) {
            day.day_name = normalize_day_name(name);
        }
        self.updated_at = Utc::now();
    }

    pub fn exercise_count(&self) -> usize {
        self.schedule.iter().map(|d| d.exercises.len()).sum()
    }
}

/// Day labels, equipment and preferences requested for (or recorded on) a user
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramConfig {
    pub day_names: Vec<String>,
    pub program_type: ProgramType,
    pub preferences: Option<ProgramPreferences>,
}

impl ProgramConfig {
    pub fn new(
        day_names: Vec<String>,
        program_type: ProgramType,
        preferences: Option<ProgramPreferences>,
    ) -> Self {
        Self {
            day_names,
            program_type,
            preferences,
        }
    }
}
