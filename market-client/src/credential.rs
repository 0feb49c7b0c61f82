//! Credential cache - JSON file holding the auth token and user
//!
//! Only auth data lives here. Bookings and payments are always re-fetched.

use serde::{Deserialize, Serialize};
use shared::UserInfo;
use std::fs;
use std::path::{Path, PathBuf};

/// Cached login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub user: UserInfo,
}

impl Credential {
    pub fn new(token: impl Into<String>, user: UserInfo) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// File-backed credential storage
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, credential: &Credential) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
    }

    /// Load the cached credential; a missing or corrupt file reads as none
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable credential file: {e}");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
