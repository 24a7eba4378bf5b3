//! In-memory session

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::storage::Session;

/// In-memory [`Session`] implementation
///
/// Backs tests and single-process deployments. `renew` rotates the session
/// id while keeping stored values, and the number of renewals is observable
/// so fixation-mitigation behavior can be asserted on.
pub struct MemorySession {
    state: RwLock<State>,
    renewals: AtomicUsize,
}

struct State {
    id: String,
    values: BTreeMap<String, Value>,
}

fn generate_id() -> String {
    format!("sess_{}", Uuid::new_v4())
}

impl MemorySession {
    /// Create a session with a fresh id
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                id: generate_id(),
                values: BTreeMap::new(),
            }),
            renewals: AtomicUsize::new(0),
        }
    }

    /// Number of times the session id has been rotated
    pub fn renewals(&self) -> usize {
        self.renewals.load(Ordering::SeqCst)
    }

    fn state(&self) -> Result<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| Error::Storage("Session lock poisoned".to_string()))
    }

    fn state_mut(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| Error::Storage("Session lock poisoned".to_string()))
    }
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl Session for MemorySession {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.state()?.values.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<()> {
        self.state_mut()?.values.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.state_mut()?.values.remove(key);
        Ok(())
    }

    fn renew(&self) -> Result<()> {
        // id swap and value retention happen under one write lock
        let mut state = self.state_mut()?;
        state.id = generate_id();
        self.renewals.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn id(&self) -> String {
        self.state
            .read()
            .map(|state| state.id.clone())
            .unwrap_or_default()
    }
}
