//! Client-local persisted state: the session token and the cached preference echo.
//!
//! Steps never touch the backing file directly; they go through `SessionStore`, which the
//! `ClientContext` carries. Reads and writes are not locked against other processes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::preferences::NormalizedPreferences;

/// Everything the client remembers between steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub preferences: Option<NormalizedPreferences>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<StoredState, ClientError>;

    fn save(&self, state: &StoredState) -> Result<(), ClientError>;

    /// The stored session token. Empty strings count as absent.
    fn session_id(&self) -> Option<String> {
        match self.load() {
            Ok(state) => state.session_id.filter(|id| !id.is_empty()),
            Err(e) => {
                warn!("Could not read session store: {e}");
                None
            }
        }
    }

    /// State to build a write on. An unreadable state is replaced rather than blocking the
    /// write, so a fresh upload can always recover the flow.
    fn load_for_write(&self) -> Result<StoredState, ClientError> {
        match self.load() {
            Err(ClientError::Storage(reason)) => {
                warn!("Discarding unreadable session state: {reason}");
                Ok(StoredState::default())
            }
            other => other,
        }
    }

    fn set_session_id(&self, session_id: &str) -> Result<(), ClientError> {
        let mut state = self.load_for_write()?;
        state.session_id = Some(session_id.to_string());
        state.updated_at = Some(Utc::now());
        self.save(&state)
    }

    fn preferences(&self) -> Option<NormalizedPreferences> {
        self.load().ok().and_then(|state| state.preferences)
    }

    fn set_preferences(&self, preferences: &NormalizedPreferences) -> Result<(), ClientError> {
        let mut state = self.load_for_write()?;
        state.preferences = Some(preferences.clone());
        state.updated_at = Some(Utc::now());
        self.save(&state)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FileSessionStore (JSON file on disk)
// ────────────────────────────────────────────────────────────────────────────

/// Persists `StoredState` as pretty-printed JSON. A missing file is an empty state.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<StoredState, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoredState::default()),
            Err(e) => return Err(ClientError::Io(e)),
        };
        if raw.trim().is_empty() {
            return Ok(StoredState::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            ClientError::Storage(format!("{} is not a valid state file: {e}", self.path.display()))
        })
    }

    fn save(&self, state: &StoredState) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        debug!("Session state written to {}", self.path.display());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemorySessionStore (test double)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    state: std::sync::Mutex<StoredState>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn with_session(session_id: &str) -> Self {
        Self {
            state: std::sync::Mutex::new(StoredState {
                session_id: Some(session_id.to_string()),
                ..StoredState::default()
            }),
        }
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<StoredState, ClientError> {
        Ok(self.state.lock().unwrap().clone())
    }

    fn save(&self, state: &StoredState) -> Result<(), ClientError> {
        *self.state.lock().unwrap() = state.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));
        assert_eq!(store.session_id(), None);
        assert_eq!(store.preferences(), None);
    }

    #[test]
    fn test_session_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");
        let store = FileSessionStore::new(&path);
        store.set_session_id("abc").unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.session_id().as_deref(), Some("abc"));
        assert!(reopened.load().unwrap().updated_at.is_some());
    }

    #[test]
    fn test_preferences_do_not_clobber_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set_session_id("abc").unwrap();
        let prefs = NormalizedPreferences {
            desired_roles: vec!["Designer".to_string()],
            ..NormalizedPreferences::default()
        };
        store.set_preferences(&prefs).unwrap();

        assert_eq!(store.session_id().as_deref(), Some("abc"));
        assert_eq!(store.preferences(), Some(prefs));
    }

    #[test]
    fn test_empty_session_counts_as_absent() {
        let store = MemorySessionStore::with_session("");
        assert_eq!(store.session_id(), None);
    }

    #[test]
    fn test_corrupt_file_reports_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(ClientError::Storage(_))));
        assert_eq!(store.session_id(), None);
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ truncated").unwrap();
        let store = FileSessionStore::new(&path);

        store.set_session_id("abc").unwrap();

        assert_eq!(store.session_id().as_deref(), Some("abc"));
        assert_eq!(FileSessionStore::new(&path).session_id().as_deref(), Some("abc"));
    }

    #[test]
    fn test_preferences_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let store = FileSessionStore::new(&path);
        let prefs = NormalizedPreferences {
            work_locations: vec!["remote".to_string()],
            ..NormalizedPreferences::default()
        };

        store.set_preferences(&prefs).unwrap();

        assert_eq!(store.preferences(), Some(prefs));
        assert_eq!(store.session_id(), None);
    }
}
