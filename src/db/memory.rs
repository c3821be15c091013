//! In-process program store

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, anyhow};

use super::ProgramStore;
use crate::program::UserProgram;

/// HashMap-backed store; can be told to refuse writes
#[derive(Default)]
pub struct MemoryStore {
    programs: Mutex<HashMap<String, UserProgram>>,
    read_only: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `upsert` acknowledges nothing and stores nothing
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.programs.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProgramStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<UserProgram>> {
        let programs = self.programs.lock().map_err(|_| anyhow!("program store poisoned"))?;
        Ok(programs.get(user_id).cloned())
    }

    fn upsert(&self, user_id: &str, program: &UserProgram) -> Result<bool> {
        if self.read_only.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let mut programs = self.programs.lock().map_err(|_| anyhow!("program store poisoned"))?;
        programs.insert(user_id.to_string(), program.clone());
        Ok(true)
    }
}
