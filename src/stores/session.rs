//! Session Store

use std::sync::Arc;

use tracing::warn;

use crate::{
    storage::{Storage, StorageError},
    users::Session,
};

/// Storage key of the persisted session.
pub const SESSION_KEY: &str = "user";

/// Persists the logged in user between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Create a store over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns the persisted session; missing or malformed records yield `None`.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "failed to read stored session");
                return None;
            }
        };

        serde_json::from_str(&raw)
            .inspect_err(|error| warn!(%error, "stored session is malformed"))
            .ok()
    }

    /// Overwrites the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be encoded or written.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(session).map_err(|source| StorageError::Encode {
            key: SESSION_KEY.to_string(),
            source,
        })?;

        self.storage.set(SESSION_KEY, &raw)
    }

    /// Deletes the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error when the record cannot be removed.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(SESSION_KEY)
    }
}
