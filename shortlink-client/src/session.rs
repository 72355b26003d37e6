//! The one piece of shared client state: who is logged in.
//!
//! `SessionStore` owns the in-memory session and writes it through to a
//! `SessionStorage` on every change. Storage failures are logged and
//! otherwise ignored, so the in-memory value stays authoritative.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Session;

#[derive(Debug, Error)]
/// Durable storage failures.
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable slot holding one serialized session.
pub trait SessionStorage {
    /// Raw persisted value, `None` when nothing was stored or it cannot be read.
    fn load(&self) -> Option<String>;

    /// Overwrites the persisted value.
    fn save(&self, raw: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
/// In-memory storage. Clones share the same slot, which lets tests
/// "restart" a store on top of what a previous one persisted.
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// Current raw value.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.raw()
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("memory slot poisoned".to_string()))?;
        *slot = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::{SessionStorage, StorageError};

    #[derive(Debug, Clone)]
    /// JSON file on disk, the CLI's equivalent of browser local storage.
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SessionStorage for FileStorage {
        fn load(&self) -> Option<String> {
            fs::read_to_string(&self.path).ok()
        }

        fn save(&self, raw: &str) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, raw)?;
            Ok(())
        }
    }
}

/// Parses a persisted session. Anything unreadable is an anonymous session.
pub fn parse_session(raw: &str) -> Session {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => session,
        Err(err) => {
            debug!(error = %err, "persisted session is unreadable, starting anonymous");
            Session::default()
        }
    }
}

#[derive(Debug)]
/// Owner of the current session.
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restores the persisted session, or starts anonymous.
    pub fn load(storage: S) -> Self {
        let session = storage
            .load()
            .map(|raw| parse_session(&raw))
            .unwrap_or_default();
        Self { storage, session }
    }

    pub fn get(&self) -> &Session {
        &self.session
    }

    /// Replaces the session wholesale and persists it.
    pub fn set(&mut self, session: Session) {
        self.session = session;
        self.persist();
    }

    /// Logout: back to the anonymous session.
    pub fn clear(&mut self) {
        self.set(Session::default());
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        if let Err(err) = persist_session(&self.storage, &self.session) {
            warn!(error = %err, "failed to persist session, keeping it in memory only");
        }
    }
}

/// Serializes `session` into `storage`.
pub fn persist_session(storage: &impl SessionStorage, session: &Session) -> Result<(), StorageError> {
    let raw = serde_json::to_string(session)?;
    storage.save(&raw)
}
