//! Authenticated session values.
//!
//! A [`Session`] is an immutable snapshot of "who is logged in". Login
//! produces a new value, logout discards it; nothing mutates a shared
//! token store. The CLI persists the current session to a small JSON
//! file so it survives between invocations.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "venueManager", default)]
    pub venue_manager: bool,
}

impl Session {
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Session>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Removes the persisted session, if any. Logout is just dropping
    /// the value; there is no server-side session to revoke.
    pub fn clear(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
