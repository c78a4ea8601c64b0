/// Database module for timetable records (teachers, rooms, disciplines, groups, schedule)

pub mod conflict;
pub mod disciplines;
pub mod groups;
pub mod rooms;
pub mod schedule;
pub mod teachers;
mod types;

pub use conflict::{check_conflict, ConflictResult, ProposedSlot};
pub use types::{
    day_name, Discipline, Group, NewDiscipline, NewGroup, NewRoom, NewScheduleEntry, NewTeacher,
    Room, ScheduleEntry, ScheduleRow, Teacher, WeekType,
};

use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

const SCHEMA_SQL: &str = include_str!("../../sql/init_schema.sql");

/// Owns the SQLite connection. Handlers borrow it through [`Store::conn`]
/// for the duration of a single operation.
pub struct Store {
    db: Mutex<Connection>,
}

impl Store {
    /// Opens (or creates) the database file and applies the schema.
    pub fn open(db_path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = db_path.as_ref();
        info!("Opening timetable database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// An in-memory store, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        init_schema(&conn)?;

        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// Locks the connection for one operation.
    pub fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| StoreError::Unavailable("database lock poisoned".into()))
    }

    /// Re-applies the idempotent schema.
    pub fn init_schema(&self) -> StoreResult<()> {
        init_schema(&*self.conn()?)
    }

    /// Runs a trivial query to confirm the database answers.
    pub fn ping(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Maps an empty optional text field to `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Shared tail of every `delete_*` function: zero rows means the id was unknown,
/// a foreign key failure means schedule rows still reference the record.
pub(crate) fn finish_delete(
    result: rusqlite::Result<usize>,
    kind: &'static str,
    id: i64,
) -> StoreResult<()> {
    match result {
        Ok(0) => Err(StoreError::NotFound { kind, id }),
        Ok(_) => Ok(()),
        Err(e) => match StoreError::from(e) {
            StoreError::Integrity(_) => Err(StoreError::InUse { kind, id }),
            other => Err(other),
        },
    }
}
