use shortlink_client::{SessionStorage, StorageError};

/// `localStorage` key of the serialized session.
pub(crate) const SESSION_KEY: &str = "user";

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window =
        web_sys::window().ok_or_else(|| StorageError::Unavailable("window is not available".into()))?;
    window
        .local_storage()
        .map_err(|_| StorageError::Unavailable("failed to access localStorage".into()))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is not available".into()))
}

#[derive(Debug, Clone, Copy, Default)]
/// The browser's `localStorage`, one key for the whole session.
pub(crate) struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn load(&self) -> Option<String> {
        local_storage().ok()?.get_item(SESSION_KEY).ok()?
    }

    fn save(&self, raw: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(SESSION_KEY, raw)
            .map_err(|_| StorageError::Unavailable("failed to save session".into()))
    }
}
