//! Persisted login session.
//!
//! The session is a single JSON record (`session.json` in the config
//! directory) shaped `{ access, user? }`, matching what the login endpoint
//! returns. It is read on startup to decide authenticated vs.
//! unauthenticated state, written on login and deleted on logout.

use crate::config;
use crate::error::{HullError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const SESSION_FILE: &str = "session.json";

/// The authenticated user as returned by the login endpoint.
///
/// Every field except `username` may be absent in older server responses,
/// so they all default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: Option<u64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl SessionUser {
    /// Display name for the header: "First Last" when available,
    /// otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// The stored auth record: access token plus whatever user details the
/// server sent back with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthData {
    pub access: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
    /// When this record was written. Informational only; expiry is the
    /// server's call (it answers 401 when the token is no longer good).
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Session store backed by a JSON file in an explicit directory.
///
/// The directory is constructor-injected so tests can point the store at a
/// temp dir instead of the real config directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    current: Option<AuthData>,
}

impl SessionStore {
    /// Open the store rooted at the default config directory, loading any
    /// persisted session.
    pub fn open() -> Result<Self> {
        Self::open_at(config::ensure_config_dir()?)
    }

    /// Open the store rooted at an explicit directory.
    pub fn open_at(dir: PathBuf) -> Result<Self> {
        let mut store = Self { dir, current: None };
        store.current = store.read_file()?;
        Ok(store)
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn read_file(&self) -> Result<Option<AuthData>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<AuthData>(&content) {
            Ok(auth) => Ok(Some(auth)),
            // A corrupt session file is treated as logged-out, not fatal.
            Err(_) => {
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn auth(&self) -> Option<&AuthData> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|a| a.access.as_str())
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.current.as_ref().and_then(|a| a.user.as_ref())
    }

    /// Persist a fresh login.
    pub fn login(&mut self, mut auth: AuthData) -> Result<()> {
        auth.saved_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&auth)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(self.session_path(), content)
            .map_err(|e| HullError::Session(format!("Failed to write session file: {e}")))?;
        self.current = Some(auth);
        Ok(())
    }

    /// Forget the session, both in memory and on disk. Used on explicit
    /// logout and on a 401 from any endpoint.
    pub fn logout(&mut self) -> Result<()> {
        self.current = None;
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Whether the current user may perform `_action` on `_module`.
    ///
    /// The backend does not yet expose per-module grants, so any
    /// authenticated user passes. Kept as the single choke point for when
    /// it does.
    pub fn has_permission(&self, _module: &str, _action: &str) -> bool {
        self.current.is_some()
    }
}
