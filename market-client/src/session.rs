//! Login session shared by every request
//!
//! The session owns the bearer token. Any 401 from the backend calls
//! [`Session::expire`], which clears memory and the credential file and
//! broadcasts [`SessionEvent::Expired`] so the front end can send the user
//! back to the login screen.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::UserInfo;
use tokio::sync::broadcast;

use crate::credential::{Credential, CredentialStorage};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Session change notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn(UserInfo),
    LoggedOut,
    /// The backend rejected the token; the user must log in again
    Expired,
}

#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<UserInfo>,
}

/// Cheap-to-clone handle to the current login
#[derive(Debug, Clone)]
pub struct Session {
    data: Arc<RwLock<SessionData>>,
    storage: Option<CredentialStorage>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// In-memory session with no credential file
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            data: Arc::new(RwLock::new(SessionData::default())),
            storage: None,
            events,
        }
    }

    /// Session backed by a credential file, restoring any cached login
    pub fn with_storage(storage: CredentialStorage) -> Self {
        let mut session = Self::new();
        if let Some(credential) = storage.load() {
            tracing::debug!(user = %credential.user.email, "Restored cached credential");
            let mut data = session.write();
            data.token = Some(credential.token);
            data.user = Some(credential.user);
        }
        session.storage = Some(storage);
        session
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.read().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().token.is_some()
    }

    /// Store a fresh login; persisting is best-effort
    pub fn set_login(&self, token: String, user: UserInfo) {
        {
            let mut data = self.write();
            data.token = Some(token.clone());
            data.user = Some(user.clone());
        }
        if let Some(storage) = &self.storage
            && let Err(e) = storage.save(&Credential::new(token, user.clone()))
        {
            tracing::warn!(path = %storage.path().display(), "Failed to cache credential: {e}");
        }
        let _ = self.events.send(SessionEvent::LoggedIn(user));
    }

    /// Explicit logout
    pub fn clear(&self) {
        self.reset();
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Token rejected by the backend. Returns whether a token was held;
    /// `Expired` is only announced in that case.
    pub fn expire(&self) -> bool {
        let had_token = self.write().token.take().is_some();
        self.reset();
        if had_token {
            tracing::warn!("Session expired, credentials cleared");
            let _ = self.events.send(SessionEvent::Expired);
        }
        had_token
    }

    fn reset(&self) {
        {
            let mut data = self.write();
            data.token = None;
            data.user = None;
        }
        if let Some(storage) = &self.storage
            && let Err(e) = storage.delete()
        {
            tracing::warn!(path = %storage.path().display(), "Failed to delete credential: {e}");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
