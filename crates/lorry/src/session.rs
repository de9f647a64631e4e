//! External session collaborator.
//!
//! The session is a mutable key-value mapping owned by the host application;
//! the carrier only ever touches the `flash` sub-mapping inside it. Access
//! is not synchronized across carriers here: callers serialize session use,
//! typically one session per logical request lifecycle.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by a session backend.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Backend(String),
}

/// A mutable mapping the carrier shares with its host.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError>;
    fn put(&self, key: &str, value: Value) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory session for tests, local demos, and embedding.
#[derive(Debug, Default)]
pub struct MemorySession {
    inner: RwLock<BTreeMap<String, Value>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of top-level session keys.
    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Result<Option<Value>, SessionError> {
        let map = self
            .inner
            .read()
            .map_err(|_| SessionError::Backend("session lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), SessionError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| SessionError::Backend("session lock poisoned".into()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| SessionError::Backend("session lock poisoned".into()))?;
        map.remove(key);
        Ok(())
    }
}
