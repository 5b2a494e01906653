use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tokio::sync::OwnedMutexGuard;

use crate::db::queries;
use crate::models::DialogueState;

/// Where dialogue states live between turns. Entries are never expired here.
pub trait SessionStore: Send + Sync {
    fn load(&self, session_id: &str) -> anyhow::Result<Option<DialogueState>>;
    fn save(&self, session_id: &str, state: &DialogueState) -> anyhow::Result<()>;
    fn remove(&self, session_id: &str) -> anyhow::Result<bool>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    states: Mutex<HashMap<String, DialogueState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, session_id: &str) -> anyhow::Result<Option<DialogueState>> {
        let states = self
            .states
            .lock()
            .map_err(|_| anyhow::anyhow!("session map lock poisoned"))?;
        Ok(states.get(session_id).cloned())
    }

    fn save(&self, session_id: &str, state: &DialogueState) -> anyhow::Result<()> {
        let mut states = self
            .states
            .lock()
            .map_err(|_| anyhow::anyhow!("session map lock poisoned"))?;
        states.insert(session_id.to_string(), state.clone());
        Ok(())
    }

    fn remove(&self, session_id: &str) -> anyhow::Result<bool> {
        let mut states = self
            .states
            .lock()
            .map_err(|_| anyhow::anyhow!("session map lock poisoned"))?;
        Ok(states.remove(session_id).is_some())
    }
}

pub struct SqliteSessionStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteSessionStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let db = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        f(&db)
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self, session_id: &str) -> anyhow::Result<Option<DialogueState>> {
        self.with_conn(|db| queries::get_dialogue_state(db, session_id))
    }

    fn save(&self, session_id: &str, state: &DialogueState) -> anyhow::Result<()> {
        self.with_conn(|db| queries::save_dialogue_state(db, session_id, state))
    }

    fn remove(&self, session_id: &str) -> anyhow::Result<bool> {
        self.with_conn(|db| queries::delete_dialogue_state(db, session_id))
    }
}

/// One async mutex per session key, so turns of the same session run one at
/// a time while different sessions proceed in parallel. A key is dropped from
/// the registry when its last turn ends and nobody is waiting on it.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

/// Exclusive access to one session for the duration of a turn.
pub struct SessionTurn<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a SessionLocks,
    session_id: String,
}

impl Drop for SessionTurn<'_> {
    fn drop(&mut self) {
        // Release the mutex first so the registry holds the only handle.
        drop(self.guard.take());
        self.locks.forget(&self.session_id);
    }
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, session_id: &str) -> SessionTurn<'_> {
        let lock = {
            let mut locks = match self.locks.lock() {
                Ok(locks) => locks,
                Err(poisoned) => poisoned.into_inner(),
            };
            locks
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        SessionTurn {
            guard: Some(lock.lock_owned().await),
            locks: self,
            session_id: session_id.to_string(),
        }
    }

    /// Removes the key unless a turn holds or awaits its mutex. Handles are
    /// only cloned under the registry lock, so the count cannot race.
    fn forget(&self, session_id: &str) {
        let mut locks = match self.locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        if locks
            .get(session_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(session_id);
        }
    }
}
