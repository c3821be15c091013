//! Error taxonomy for program assignment

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgramError {
    /// Request rejected before any lookup or mutation
    #[error("Validation Error: {0}")]
    Validation(String),

    /// No template for the day count, or no stored program for the user
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Store did not acknowledge the write; the working copy was discarded
    #[error("Program for user '{0}' was not persisted")]
    NotPersisted(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ProgramResult<T> = Result<T, ProgramError>;
