//! Personalization tuning constants

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};

use crate::program::Goal;

/// Tunable constants of the personalization engine.
///
/// Defaults are fixed; every field can be overridden from the command
/// line or from a JSON file holding any subset of the fields.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalizationTuning {
    /// Rest between sets when the goal is muscle gain
    #[arg(long, default_value_t = 90)]
    pub rest_muscle_gain_secs: i32,
    /// Rest between sets when the goal is weight loss
    #[arg(long, default_value_t = 45)]
    pub rest_weight_loss_secs: i32,
    /// Rest between sets for maintenance
    #[arg(long, default_value_t = 60)]
    pub rest_maintain_secs: i32,
    /// Work time per rep
    #[arg(long, default_value_t = 3.0)]
    pub seconds_per_rep: f64,
    /// Floor for set counts when trimming a day
    #[arg(long, default_value_t = 2)]
    pub min_sets: i32,
    /// Sets that may be added on top of the baseline
    #[arg(long, default_value_t = 2)]
    pub max_sets_bump: i32,
    /// Lower bound of a rep-range rescale, relative to the current value
    #[arg(long, default_value_t = 0.8)]
    pub time_scale_min: f64,
    /// Upper bound of a rep-range rescale, relative to the current value
    #[arg(long, default_value_t = 1.2)]
    pub time_scale_max: f64,
}

impl Default for PersonalizationTuning {
    fn default() -> Self {
        Self {
            rest_muscle_gain_secs: 90,
            rest_weight_loss_secs: 45,
            rest_maintain_secs: 60,
            seconds_per_rep: 3.0,
            min_sets: 2,
            max_sets_bump: 2,
            time_scale_min: 0.8,
            time_scale_max: 1.2,
        }
    }
}

impl PersonalizationTuning {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning {}", path.display()))?;
        let tuning: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing tuning {}", path.display()))?;
        tuning
            .validate()
            .with_context(|| format!("invalid tuning {}", path.display()))?;
        Ok(tuning)
    }

    /// Take every value the user typed on the command line, keep the rest
    pub fn merge_from_cli(&mut self, cli: &PersonalizationTuning, matches: &ArgMatches) -> Result<()> {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }

        update_if_present!(rest_muscle_gain_secs);
        update_if_present!(rest_weight_loss_secs);
        update_if_present!(rest_maintain_secs);
        update_if_present!(seconds_per_rep);
        update_if_present!(min_sets);
        update_if_present!(max_sets_bump);
        update_if_present!(time_scale_min);
        update_if_present!(time_scale_max);
        self.validate()
    }

    /// Reject values the set search cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_sets < 1 {
            bail!("min_sets must be at least 1, got {}", self.min_sets);
        }
        if self.max_sets_bump < 0 {
            bail!("max_sets_bump must not be negative, got {}", self.max_sets_bump);
        }
        if !(self.seconds_per_rep.is_finite() && self.seconds_per_rep > 0.0) {
            bail!("seconds_per_rep must be positive, got {}", self.seconds_per_rep);
        }
        for (name, rest) in [
            ("rest_muscle_gain_secs", self.rest_muscle_gain_secs),
            ("rest_weight_loss_secs", self.rest_weight_loss_secs),
            ("rest_maintain_secs", self.rest_maintain_secs),
        ] {
            if rest < 0 {
                bail!("{} must not be negative, got {}", name, rest);
            }
        }
        if !(self.time_scale_min > 0.0 && self.time_scale_min <= self.time_scale_max)
            || !self.time_scale_max.is_finite()
        {
            bail!(
                "time scale bounds must satisfy 0 < min <= max, got {}..{}",
                self.time_scale_min,
                self.time_scale_max
            );
        }
        Ok(())
    }

    pub fn rest_seconds(&self, goal: Goal) -> i32 {
        match goal {
            Goal::MuscleGain => self.rest_muscle_gain_secs,
            Goal::WeightLoss => self.rest_weight_loss_secs,
            Goal::Maintain => self.rest_maintain_secs,
        }
    }
}
