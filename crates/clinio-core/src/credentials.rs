//! Credential storage capability.
//!
//! The browser host backs this with `localStorage`; tests and the CLI use the
//! in-memory implementation. The token and the cached user record live under
//! fixed keys and are always cleared together when a session dies.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the serialized user record.
pub const USER_DATA_KEY: &str = "userData";

/// Persistent key-value storage for authentication state.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);

    fn token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY)
    }

    fn set_token(&self, token: &str) {
        self.set(AUTH_TOKEN_KEY, token);
    }

    fn user_data(&self) -> Option<String> {
        self.get(USER_DATA_KEY)
    }

    fn set_user_data(&self, data: &str) {
        self.set(USER_DATA_KEY, data);
    }

    /// Remove the token and the user record together.
    fn clear_credentials(&self) {
        self.remove(AUTH_TOKEN_KEY);
        self.remove(USER_DATA_KEY);
    }
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

impl std::fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCredentialStore")
            .field("keys", &self.entries.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
