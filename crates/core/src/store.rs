//! State persistence
//!
//! A `StateStore` owns the last-applied `SubnetState` of one resource
//! between runs. The sqlite store keeps one row per named resource.

use crate::error::StateError;
use crate::types::SubnetState;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Persistence capability for a single resource's state
pub trait StateStore: Send + Sync {
    /// Current state, empty when nothing was ever saved
    fn load(&self) -> Result<SubnetState, StateError>;

    /// Replace the stored state with `state`
    fn save(&self, state: &SubnetState) -> Result<(), StateError>;
}

/// In-process store that remembers every save
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    current: Mutex<SubnetState>,
    saves: Mutex<Vec<SubnetState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SubnetState) -> Self {
        Self {
            current: Mutex::new(state),
            saves: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> SubnetState {
        self.current.lock().clone()
    }

    /// Every state passed to `save`, oldest first
    pub fn saves(&self) -> Vec<SubnetState> {
        self.saves.lock().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<SubnetState, StateError> {
        Ok(self.current())
    }

    fn save(&self, state: &SubnetState) -> Result<(), StateError> {
        *self.current.lock() = state.clone();
        self.saves.lock().push(state.clone());
        Ok(())
    }
}

/// SQLite-backed store, one row per resource name
#[derive(Clone)]
pub struct SqliteStateStore {
    conn: Arc<Mutex<Connection>>,
    name: String,
}

impl SqliteStateStore {
    /// Open or create the database at `path`, bound to resource `name`
    pub fn open(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, StateError> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            name: name.into(),
        };
        store.init_schema()?;

        info!("Opened state database at {:?}", path.as_ref());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_memory(name: impl Into<String>) -> Result<Self, StateError> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
            name: name.into(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Same database, bound to another resource
    pub fn for_resource(&self, name: impl Into<String>) -> Self {
        Self {
            conn: self.conn.clone(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn init_schema(&self) -> Result<(), StateError> {
        let conn = self.conn.lock();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS subnets (
                name TEXT PRIMARY KEY,
                state TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                generation INTEGER NOT NULL DEFAULT 1
            );
            "#,
        )?;
        Ok(())
    }

    /// Number of saves recorded for this resource
    pub fn generation(&self) -> Result<i64, StateError> {
        let conn = self.conn.lock();
        let generation: Option<i64> = conn
            .query_row(
                "SELECT generation FROM subnets WHERE name = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(generation.unwrap_or(0))
    }

    /// Names of every resource with a stored row
    pub fn resources(&self) -> Result<Vec<String>, StateError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT name FROM subnets ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

impl StateStore for SqliteStateStore {
    fn load(&self) -> Result<SubnetState, StateError> {
        let conn = self.conn.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT state FROM subnets WHERE name = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(SubnetState::default()),
        }
    }

    fn save(&self, state: &SubnetState) -> Result<(), StateError> {
        let json = serde_json::to_string(state)?;
        let now = chrono::Utc::now().timestamp();

        let conn = self.conn.lock();
        conn.execute(
            r#"
            INSERT INTO subnets (name, state, updated_at, generation)
            VALUES (?1, ?2, ?3, 1)
            ON CONFLICT(name) DO UPDATE SET
                state = excluded.state,
                updated_at = excluded.updated_at,
                generation = generation + 1
            "#,
            params![self.name, json, now],
        )?;

        debug!("Saved state for {}: {}", self.name, json);
        Ok(())
    }
}
