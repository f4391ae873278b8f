use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

/// Fabricate an opaque session token. There is no signature and no expiry;
/// the token only carries the user id so a session can be restored.
pub fn issue_token(user_id: Uuid, issued_at: DateTime<Utc>) -> String {
    B64.encode(format!("{}:{}", user_id, issued_at.timestamp_millis()))
}

/// Recover the user id from a token produced by [`issue_token`].
pub fn user_id_from_token(token: &str) -> Option<Uuid> {
    let bytes = B64.decode(token.trim()).ok()?;
    let raw = String::from_utf8(bytes).ok()?;
    let (id, _issued_at) = raw.split_once(':')?;
    id.parse().ok()
}

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("token store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("token store lock poisoned")]
    Poisoned,
}

/// Where the client keeps its session token between runs. Stands in for
/// browser local storage: a single opaque string slot.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token slot that lives as long as the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.slot.lock().map_err(|_| TokenStoreError::Poisoned)?.clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.slot.lock().map_err(|_| TokenStoreError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.lock().map_err(|_| TokenStoreError::Poisoned)? = None;
        Ok(())
    }
}

/// Token slot persisted to a single file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!("Failed to read token file {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token)?;
        debug!("Token written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_user_id() {
        let id = Uuid::new_v4();
        let token = issue_token(id, Utc::now());
        assert_eq!(user_id_from_token(&token), Some(id));
    }

    #[test]
    fn garbage_token_has_no_user() {
        assert_eq!(user_id_from_token("not-a-token"), None);
        assert_eq!(user_id_from_token(""), None);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();

        store.save("xyz").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("xyz"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
