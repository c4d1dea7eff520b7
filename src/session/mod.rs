//! Persistence of cart and auth state across page loads.
//!
//! The host environment provides a keyed string store (the browser's local
//! storage, here behind [`KeyValueStore`]); everything lives under one
//! namespaced key as a JSON blob. The byte layout is an implementation
//! detail, not a compatibility surface.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AuthState, CartLine, User};

/// The single key everything is persisted under.
pub const SESSION_KEY: &str = "storefront:session";

/// A keyed string store provided by the host environment.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Everything restored on load: the cart lines and the auth state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl SessionSnapshot {
    pub fn auth(&self) -> AuthState {
        AuthState {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Persist the snapshot under [`SESSION_KEY`].
pub fn save_session(
    store: &dyn KeyValueStore,
    snapshot: &SessionSnapshot,
) -> Result<(), SessionError> {
    store.set(SESSION_KEY, serde_json::to_string(snapshot)?);
    Ok(())
}

/// Load the snapshot. Missing or unreadable state restores a fresh
/// session rather than failing the boot.
pub fn load_session(store: &dyn KeyValueStore) -> SessionSnapshot {
    store
        .get(SESSION_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Drop the persisted session (logout).
pub fn clear_session(store: &dyn KeyValueStore) {
    store.remove(SESSION_KEY);
}
