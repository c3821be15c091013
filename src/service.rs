//! Program assignment service
//!
//! Every operation is fetch -> mutate a working copy -> persist. The
//! working copy is dropped if the store does not acknowledge the write.

use tracing::{debug, info, warn};

use crate::config::PersonalizationTuning;
use crate::db::ProgramStore;
use crate::error::{ProgramError, ProgramResult};
use crate::program::{
    MAX_DAYS, MIN_DAYS, PersonalizationReport, ProgramChange, ProgramConfig, ProgramPreferences,
    ProgramType, TemplateCatalog, UserProgram, classify, instantiate, personalize, select_template,
};

/// Result of an assignment request
#[derive(Debug, Clone)]
pub struct Assignment {
    pub program: UserProgram,
    pub change: ProgramChange,
    /// Present when personalization ran
    pub report: Option<PersonalizationReport>,
}

pub struct ProgramService<C, S> {
    catalog: C,
    store: S,
    tuning: PersonalizationTuning,
}

impl<C: TemplateCatalog, S: ProgramStore> ProgramService<C, S> {
    pub fn new(catalog: C, store: S, tuning: PersonalizationTuning) -> Self {
        Self {
            catalog,
            store,
            tuning,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tuning(&self) -> &PersonalizationTuning {
        &self.tuning
    }

    /// Assign (or update) a user's program and return what was stored
    pub fn assign_program(
        &self,
        user_id: &str,
        day_names: &[String],
        program_type: ProgramType,
        preferences: Option<&ProgramPreferences>,
    ) -> ProgramResult<UserProgram> {
        self.assign(user_id, day_names, program_type, preferences)
            .map(|a| a.program)
    }

    /// Like [`assign_program`](Self::assign_program), also reporting the
    /// change path taken and the personalization outcome
    pub fn assign(
        &self,
        user_id: &str,
        day_names: &[String],
        program_type: ProgramType,
        preferences: Option<&ProgramPreferences>,
    ) -> ProgramResult<Assignment> {
        validate_day_count(day_names)?;

        let requested = ProgramConfig::new(day_names.to_vec(), program_type, preferences.cloned());
        let stored = self.store.get(user_id)?;
        let assignment = self.apply(stored, &requested)?;

        if assignment.change != ProgramChange::NoOp && !self.persist(user_id, &assignment.program)? {
            return Err(ProgramError::NotPersisted(user_id.to_string()));
        }
        Ok(assignment)
    }

    /// Rename the days of a stored program, optionally re-personalizing.
    ///
    /// Returns `false` when there is no stored program, the label count
    /// differs from the program's day count, or the write failed.
    pub fn relabel_days(
        &self,
        user_id: &str,
        day_names: &[String],
        preferences: Option<&ProgramPreferences>,
    ) -> ProgramResult<bool> {
        let Some(stored) = self.store.get(user_id)? else {
            warn!("Relabel for '{}': no stored program", user_id);
            return Ok(false);
        };
        if stored.schedule.len() != day_names.len() {
            warn!(
                "Relabel for '{}': {} labels for {} days",
                user_id,
                day_names.len(),
                stored.schedule.len()
            );
            return Ok(false);
        }

        let requested = ProgramConfig::new(day_names.to_vec(), stored.program_type, preferences.cloned());
        let assignment = self.apply(Some(stored), &requested)?;
        if assignment.change == ProgramChange::NoOp {
            return Ok(true);
        }
        self.persist(user_id, &assignment.program)
    }

    /// Apply new settings to an existing program
    pub fn update_preferences(
        &self,
        user_id: &str,
        program_type: ProgramType,
        day_names: &[String],
        preferences: &ProgramPreferences,
    ) -> ProgramResult<bool> {
        validate_day_count(day_names)?;

        let Some(stored) = self.store.get(user_id)? else {
            return Err(ProgramError::NotFound(format!("no program for user '{}'", user_id)));
        };

        let requested = ProgramConfig::new(day_names.to_vec(), program_type, Some(preferences.clone()));
        let assignment = self.apply(Some(stored), &requested)?;
        if assignment.change == ProgramChange::NoOp {
            return Ok(true);
        }
        self.persist(user_id, &assignment.program)
    }

    pub fn get_program(&self, user_id: &str) -> ProgramResult<Option<UserProgram>> {
        Ok(self.store.get(user_id)?)
    }

    /// Overwrite a program as-is (progress logging), no personalization
    pub fn replace_program(&self, user_id: &str, program: &UserProgram) -> ProgramResult<bool> {
        self.persist(user_id, program)
    }

    /// Record reps and weight for one exercise of a stored program
    pub fn log_progress(
        &self,
        user_id: &str,
        day_index: usize,
        exercise: &str,
        reps_completed: Option<i32>,
        weight: Option<f64>,
    ) -> ProgramResult<bool> {
        let Some(mut program) = self.store.get(user_id)? else {
            return Err(ProgramError::NotFound(format!("no program for user '{}'", user_id)));
        };

        let entry = program
            .schedule
            .iter_mut()
            .find(|d| d.day_index == day_index)
            .and_then(|d| {
                d.exercises
                    .iter_mut()
                    .find(|e| e.name.eq_ignore_ascii_case(exercise))
            })
            .ok_or_else(|| {
                ProgramError::NotFound(format!("no '{}' on day {}", exercise, day_index))
            })?;

        if let Some(reps) = reps_completed {
            entry.reps_completed = reps;
        }
        if let Some(value) = weight {
            entry.weight.value = value;
        }
        program.updated_at = chrono::Utc::now();
        self.replace_program(user_id, &program)
    }

    /// Classify and apply a request to a working copy of the stored program
    fn apply(&self, stored: Option<UserProgram>, requested: &ProgramConfig) -> ProgramResult<Assignment> {
        let previous = stored.as_ref().map(UserProgram::config);
        let change = classify(previous.as_ref(), requested);
        info!(
            "Program change: {} ({})",
            change.label(),
            if change.preserves_progress() { "progress kept" } else { "progress reset" }
        );

        let mut program = match (change, stored) {
            (ProgramChange::Rebuild, _) => {
                let template =
                    select_template(&self.catalog, requested.day_names.len(), requested.program_type)?;
                debug!("Instantiating '{}'", template.name);
                instantiate(&template, &requested.day_names)
            }
            (_, Some(program)) => program,
            (_, None) => {
                return Err(ProgramError::NotFound("no stored program to update".to_string()));
            }
        };

        let repersonalize = match change {
            ProgramChange::Rebuild | ProgramChange::Repersonalize => true,
            ProgramChange::Relabel { repersonalize } => {
                program.relabel(&requested.day_names);
                repersonalize
            }
            ProgramChange::NoOp => false,
        };

        let report = match (&requested.preferences, repersonalize) {
            (Some(preferences), true) => Some(personalize(&mut program, preferences, &self.tuning)),
            _ => None,
        };

        if let Some(report) = &report {
            for fit in &report.days {
                debug!(
                    "Day {}: {:.0}s for a {:.0}s target ({:?})",
                    fit.day_index, fit.estimated_seconds, fit.target_seconds, fit.outcome
                );
            }
        }

        Ok(Assignment {
            program,
            change,
            report,
        })
    }

    fn persist(&self, user_id: &str, program: &UserProgram) -> ProgramResult<bool> {
        let stored = self.store.upsert(user_id, program)?;
        if !stored {
            warn!("Program for '{}' was not stored; discarding changes", user_id);
        }
        Ok(stored)
    }
}

fn validate_day_count(day_names: &[String]) -> ProgramResult<()> {
    if (MIN_DAYS..=MAX_DAYS).contains(&day_names.len()) {
        Ok(())
    } else {
        Err(ProgramError::Validation(format!(
            "expected {} to {} day names, got {}",
            MIN_DAYS,
            MAX_DAYS,
            day_names.len()
        )))
    }
}
