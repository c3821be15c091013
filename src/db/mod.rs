//! Database module - storage for user programs

mod memory;

pub use memory::MemoryStore;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::program::UserProgram;

/// Per-user program storage
pub trait ProgramStore {
    fn get(&self, user_id: &str) -> Result<Option<UserProgram>>;

    /// Insert or overwrite; `Ok(false)` means the write was not applied
    fn upsert(&self, user_id: &str, program: &UserProgram) -> Result<bool>;
}

/// SQLite-backed program store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("opening {}", path))?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS user_programs (
                user_id TEXT PRIMARY KEY,
                template_name TEXT NOT NULL,
                program TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// All stored user ids, sorted
    pub fn user_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT user_id FROM user_programs ORDER BY user_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

impl ProgramStore for Database {
    fn get(&self, user_id: &str) -> Result<Option<UserProgram>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT program FROM user_programs WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => {
                let program = serde_json::from_str(&json)
                    .with_context(|| format!("decoding stored program of '{}'", user_id))?;
                Ok(Some(program))
            }
            None => Ok(None),
        }
    }

    fn upsert(&self, user_id: &str, program: &UserProgram) -> Result<bool> {
        let json = serde_json::to_string(program)?;
        let changed = self.conn.execute(
            "INSERT INTO user_programs (user_id, template_name, program, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                template_name = excluded.template_name,
                program = excluded.program,
                updated_at = excluded.updated_at",
            params![user_id, program.template_name, json, Utc::now().to_rfc3339()],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ProgramType, StaticCatalog, instantiate, select_template};

    fn create_program() -> UserProgram {
        let template = select_template(&StaticCatalog::builtin(), 3, ProgramType::Gym).unwrap();
        instantiate(&template, &["mon".to_string(), "wed".to_string(), "fri".to_string()])
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("nobody").unwrap().is_none());
    }

    #[test]
    fn test_upsert_then_get() {
        let db = Database::open_in_memory().unwrap();
        let program = create_program();
        assert!(db.upsert("alice", &program).unwrap());
        assert_eq!(db.get("alice").unwrap(), Some(program));
    }

    #[test]
    fn test_upsert_overwrites() {
        let db = Database::open_in_memory().unwrap();
        let mut program = create_program();
        db.upsert("alice", &program).unwrap();

        program.schedule[0].exercises[0].reps_completed = 8;
        assert!(db.upsert("alice", &program).unwrap());

        let stored = db.get("alice").unwrap().unwrap();
        assert_eq!(stored.schedule[0].exercises[0].reps_completed, 8);
        assert_eq!(db.user_ids().unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn test_users_are_separate() {
        let db = Database::open_in_memory().unwrap();
        db.upsert("bob", &create_program()).unwrap();
        db.upsert("alice", &create_program()).unwrap();
        assert_eq!(db.user_ids().unwrap(), vec!["alice".to_string(), "bob".to_string()]);
    }
}
