//! SessionStore: single source of truth for "who is logged in".
//!
//! The store keeps the authenticated user and bearer token in memory and
//! mirrors them into durable storage under the keys `user` (JSON-serialized
//! identity/role) and `token` (bearer string), so the session survives
//! reloads. It is constructed explicitly and threaded through screen
//! constructors rather than accessed as an ambient global.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use paylater_types::{Role, SessionUser};
use thiserror::Error;
use tracing::warn;

/// Durable storage key for the serialized `SessionUser`.
pub const USER_KEY: &str = "user";
/// Durable storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("malformed session record: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable key/value storage for session fields.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(fs::write(self.path(key), value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory storage for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Authenticated-session state with durable persistence.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    user: Option<SessionUser>,
    token: Option<String>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Rehydrate from durable storage. Absent or malformed records start
    /// the store unauthenticated; rehydration itself never fails.
    pub fn load(storage: S) -> Self {
        let user: Option<SessionUser> = storage
            .get(USER_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok());
        let token = storage.get(TOKEN_KEY).ok().flatten();
        // A session needs both halves; a lone user record or token is stale.
        let (user, token) = match (user, token) {
            (Some(user), Some(token)) => (Some(user), Some(token)),
            _ => (None, None),
        };
        Self {
            storage,
            user,
            token,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Store the user record and token, persisting both. Memory is only
    /// updated once both durable writes succeed.
    pub fn login(&mut self, user: SessionUser, token: String) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&user)?;
        self.storage.set(USER_KEY, &raw)?;
        self.storage.set(TOKEN_KEY, &token)?;
        self.user = Some(user);
        self.token = Some(token);
        Ok(())
    }

    /// Clear the session from memory and durable storage. If clearing
    /// durable state fails, fall back to removing each key individually;
    /// the in-memory session always ends unauthenticated.
    pub fn logout(&mut self) {
        let cleared = self
            .storage
            .remove(USER_KEY)
            .and_then(|()| self.storage.remove(TOKEN_KEY));
        if let Err(err) = cleared {
            warn!(error = %err, "session clear failed, removing keys best-effort");
            let _ = self.storage.remove(USER_KEY);
            let _ = self.storage.remove(TOKEN_KEY);
        }
        self.user = None;
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use paylater_types::{Role, SessionUser};

    use super::{
        FileStorage, MemoryStorage, SessionStorage, SessionStore, StorageError, TOKEN_KEY, USER_KEY,
    };

    fn asha() -> SessionUser {
        SessionUser {
            id: 1,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn login_persists_exactly_user_and_token() {
        let mut store = SessionStore::load(MemoryStorage::new());
        assert!(!store.is_authenticated());

        store.login(asha(), "token-1-1".to_string()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("token-1-1"));

        let raw_user = store.storage().get(USER_KEY).unwrap().unwrap();
        let persisted: SessionUser = serde_json::from_str(&raw_user).unwrap();
        assert_eq!(persisted, asha());
        assert_eq!(
            store.storage().get(TOKEN_KEY).unwrap().as_deref(),
            Some("token-1-1")
        );
    }

    #[test]
    fn logout_removes_both_keys() {
        let mut store = SessionStore::load(MemoryStorage::new());
        store.login(asha(), "token-1-1".to_string()).unwrap();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.storage().get(USER_KEY).unwrap().is_none());
        assert!(store.storage().get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn rehydrates_persisted_session() {
        let mut storage = MemoryStorage::new();
        storage
            .set(USER_KEY, &serde_json::to_string(&asha()).unwrap())
            .unwrap();
        storage.set(TOKEN_KEY, "token-1-1").unwrap();

        let store = SessionStore::load(storage);
        assert!(store.is_authenticated());
        assert_eq!(store.role(), Some(Role::Customer));
        assert_eq!(store.user().unwrap().name, "Asha");
    }

    #[test]
    fn malformed_user_record_starts_unauthenticated() {
        let mut storage = MemoryStorage::new();
        storage.set(USER_KEY, "{not json").unwrap();
        storage.set(TOKEN_KEY, "token-1-1").unwrap();

        let store = SessionStore::load(storage);
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn lone_token_without_user_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "token-1-1").unwrap();
        let store = SessionStore::load(storage);
        assert!(!store.is_authenticated());
    }

    /// Storage that fails the first removal of each key, to exercise the
    /// logout fallback path.
    struct FlakyStorage {
        inner: MemoryStorage,
        failures_left: u32,
    }

    impl SessionStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(StorageError::Unavailable("transient".to_string()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn logout_falls_back_when_clearing_fails() {
        let mut store = SessionStore::load(FlakyStorage {
            inner: MemoryStorage::new(),
            failures_left: 1,
        });
        store.login(asha(), "token-1-1".to_string()).unwrap();

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.storage().get(USER_KEY).unwrap().is_none());
        assert!(store.storage().get(TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn file_storage_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("session")).unwrap();
        assert!(storage.get(USER_KEY).unwrap().is_none());

        storage.set(TOKEN_KEY, "token-9-9").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("token-9-9"));

        storage.remove(TOKEN_KEY).unwrap();
        assert!(storage.get(TOKEN_KEY).unwrap().is_none());
        // Removing an absent key is not an error.
        storage.remove(TOKEN_KEY).unwrap();
    }
}
