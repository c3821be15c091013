//! liftplan - Workout program assignment and personalization
//!
//! Picks a template for the requested days and equipment, instantiates
//! it for a user and fits it to their goal and session length, keeping
//! logged progress unless the program has to be rebuilt.

pub mod config;
pub mod db;
pub mod error;
pub mod program;
pub mod service;
pub mod templates;
pub mod tui;

pub use config::PersonalizationTuning;
pub use db::{Database, MemoryStore, ProgramStore};
pub use error::{ProgramError, ProgramResult};
pub use service::ProgramService;
