//! File-backed client session state.
//!
//! Holds the tokens from the last login so follow-up commands can attach
//! them. One file per session path; `clear` resets it, mirroring view
//! state that resets on navigation.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Tokens and identity from the last successful login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub username: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Loads and saves the session file.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `$HOME/.fixly-session.json`, falling back to the
    /// working directory when HOME is unset.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default()
            .join(".fixly-session.json")
    }

    /// Reads the stored session; a missing file is an empty session.
    pub fn load(&self) -> anyhow::Result<Session> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Corrupt session file: {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => {
                Err(anyhow::Error::from(e)
                    .context(format!("Cannot read session file: {}", self.path.display())))
            }
        }
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Cannot write session file: {}", self.path.display()))
    }

    /// Drops the stored session, if any.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::from(e)
                .context(format!("Cannot remove session file: {}", self.path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let session = store.load().unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn round_trips_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let session = Session {
            username: Some("alice".to_string()),
            access_token: Some("token-a".to_string()),
            refresh_token: Some("token-r".to_string()),
        };
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.is_logged_in());
        assert_eq!(loaded.username.as_deref(), Some("alice"));
        assert_eq!(loaded.access_token.as_deref(), Some("token-a"));
    }

    #[test]
    fn clear_resets_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        store
            .save(&Session {
                username: Some("alice".to_string()),
                access_token: Some("token".to_string()),
                refresh_token: None,
            })
            .unwrap();
        store.clear().unwrap();
        // clearing twice is fine
        store.clear().unwrap();

        assert!(!store.load().unwrap().is_logged_in());
    }
}
