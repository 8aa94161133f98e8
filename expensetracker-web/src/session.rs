//! Session persistence.
//!
//! The session is two plain string entries in durable storage. Every
//! mutation goes through [`SessionStore`], which updates the in-memory
//! [`SessionState`] and writes storage in the same call so a reload restores
//! exactly what the views last saw.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};
use yewdux::Dispatch;

use crate::models::app_state::SessionState;

pub const TOKEN_KEY: &str = "jwt_token";
pub const USERNAME_KEY: &str = "username";

/// Failure to write a storage entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to persist `{key}`: {reason}")]
pub struct StorageError {
    pub key: String,
    pub reason: String,
}

/// Durable key/value storage holding the session entries.
pub trait SessionStorage {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`, storing raw strings rather than JSON.
///
/// Browsers can withhold `localStorage` (private windows, blocked site
/// data). Without it reads come back empty and writes fail with a
/// [`StorageError`], so the session lives in memory only.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    /// Binds to the window's `localStorage`, if the browser grants it.
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("localStorage unavailable; sessions will not survive a reload");
        }
        Self { storage }
    }

    /// Storage with no backing store, as when the browser refuses access.
    #[cfg(test)]
    fn unavailable() -> Self {
        Self { storage: None }
    }
}

impl SessionStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let Some(storage) = &self.storage else {
            return Err(StorageError {
                key: key.to_string(),
                reason: "localStorage unavailable".to_string(),
            });
        };
        storage.set_item(key, value).map_err(|err| StorageError {
            key: key.to_string(),
            reason: format!("{err:?}"),
        })
    }

    fn remove(&self, key: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.remove_item(key) {
            warn!(key, error = ?err, "failed to remove storage entry");
        }
    }
}

/// Process-local storage for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `entries`, as if written by an earlier run.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
        storage
    }
}

#[cfg(test)]
impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// An authenticated identity.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

/// Owner of the session for the lifetime of the application.
///
/// Cheap to clone; clones share the same state and storage.
#[derive(Clone)]
pub struct SessionStore {
    dispatch: Dispatch<SessionState>,
    storage: Rc<dyn SessionStorage>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.dispatch.get())
            .finish_non_exhaustive()
    }
}

impl PartialEq for SessionStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage) && self.dispatch.get() == other.dispatch.get()
    }
}

impl SessionStore {
    pub fn new(dispatch: Dispatch<SessionState>, storage: Rc<dyn SessionStorage>) -> Self {
        Self { dispatch, storage }
    }

    /// Loads a previously persisted session into memory.
    ///
    /// Returns the restored username. A half-written session (one entry
    /// without the other) is discarded.
    pub fn restore(&self) -> Option<String> {
        let token = self.storage.read(TOKEN_KEY);
        let username = self.storage.read(USERNAME_KEY);
        match (token, username) {
            (Some(token), Some(username)) => {
                debug!(%username, "restored persisted session");
                self.dispatch.set(SessionState {
                    token: Some(token),
                    username: Some(username.clone()),
                });
                Some(username)
            }
            (None, None) => {
                self.dispatch.set(SessionState::default());
                None
            }
            _ => {
                warn!("discarding incomplete persisted session");
                self.clear();
                None
            }
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<Session> {
        let state = self.dispatch.get();
        match (&state.token, &state.username) {
            (Some(token), Some(username)) => Some(Session {
                token: token.clone(),
                username: username.clone(),
            }),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.dispatch.get().token.clone()
    }

    #[cfg(test)]
    pub fn username(&self) -> Option<String> {
        self.dispatch.get().username.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.dispatch.get().is_authenticated()
    }

    /// Stores both values together. If either is absent the session is
    /// cleared instead.
    pub fn set_session(&self, token: Option<String>, username: Option<String>) {
        let (Some(token), Some(username)) = (token, username) else {
            self.clear();
            return;
        };

        for (key, value) in [(TOKEN_KEY, token.as_str()), (USERNAME_KEY, username.as_str())] {
            if let Err(err) = self.storage.write(key, value) {
                warn!(error = %err, "session will not survive a reload");
            }
        }
        info!(%username, "session started");
        self.dispatch.set(SessionState {
            token: Some(token),
            username: Some(username),
        });
    }

    /// Drops the session from memory and storage.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USERNAME_KEY);
        if self.is_authenticated() {
            info!("session cleared");
        }
        self.dispatch.set(SessionState::default());
    }
}
