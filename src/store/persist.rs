//! Persisted local state - the identity and navigation subset of the store.
//!
//! The subset is written as `{"version": 0, "state": {...}}` under a fixed
//! namespace key whenever it changes, and read back at startup so the UI can
//! show the last wedding and tab before the backend has answered.

use super::{ActiveTab, CurrentUser};
use crate::entities::WeddingModel;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Format version of the persisted document. Documents with another version
/// are ignored on load.
pub const STATE_VERSION: u32 = 0;

/// The slice of store state that survives a restart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Signed-in user
    pub user: Option<CurrentUser>,
    /// Wedding being planned
    pub current_wedding: Option<WeddingModel>,
    /// Page last shown
    #[serde(default)]
    pub active_tab: ActiveTab,
}

#[derive(Serialize, Deserialize)]
struct StoredDocument {
    version: u32,
    state: PersistedState,
}

/// Encodes `state` as a versioned JSON document.
pub fn encode_state(state: &PersistedState) -> Result<String> {
    let document = StoredDocument {
        version: STATE_VERSION,
        state: state.clone(),
    };
    Ok(serde_json::to_string(&document)?)
}

/// Decodes a versioned JSON document. Returns `Ok(None)` for documents written
/// with a different format version.
pub fn decode_state(raw: &str) -> Result<Option<PersistedState>> {
    let document: StoredDocument = serde_json::from_str(raw)?;
    if document.version != STATE_VERSION {
        debug!(
            "Ignoring persisted state with version {} (expected {})",
            document.version, STATE_VERSION
        );
        return Ok(None);
    }
    Ok(Some(document.state))
}

/// Durable client-local storage for [`PersistedState`].
pub trait StateStorage: Debug + Send {
    /// Reads the stored state, `Ok(None)` when nothing usable is stored.
    fn load(&self) -> Result<Option<PersistedState>>;

    /// Replaces the stored state.
    fn save(&mut self, state: &PersistedState) -> Result<()>;
}

/// Stores the state as `<dir>/<namespace>.json`.
#[derive(Clone, Debug)]
pub struct FileStateStorage {
    path: PathBuf,
}

impl FileStateStorage {
    /// Storage for `namespace` inside `dir`. The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{namespace}.json")),
        }
    }

    /// File the state is written to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for FileStateStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        if !self.path.exists() {
            debug!("No persisted state at {:?}", self.path);
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        decode_state(&raw)
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write then rename so a crash never leaves a half-written document.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encode_state(state)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Persisted state to {:?}", self.path);
        Ok(())
    }
}

/// In-memory storage. Clones share the same slot, so a caller can keep a
/// handle while the store owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStateStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStateStorage {
    /// Empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw document last saved, if any.
    pub fn raw(&self) -> Result<Option<String>> {
        let slot = self.slot.lock().map_err(|_| Error::Storage {
            message: "memory storage lock poisoned".to_string(),
        })?;
        Ok(slot.clone())
    }
}

impl StateStorage for MemoryStateStorage {
    fn load(&self) -> Result<Option<PersistedState>> {
        match self.raw()? {
            Some(raw) => decode_state(&raw),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &PersistedState) -> Result<()> {
        let encoded = encode_state(state)?;
        let mut slot = self.slot.lock().map_err(|_| Error::Storage {
            message: "memory storage lock poisoned".to_string(),
        })?;
        *slot = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{sample_user, sample_wedding};

    fn sample_state() -> PersistedState {
        PersistedState {
            user: Some(sample_user()),
            current_wedding: Some(sample_wedding("w1")),
            active_tab: ActiveTab::Guests,
        }
    }

    #[test]
    fn test_document_shape() {
        let raw = encode_state(&sample_state()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["active_tab"], "guests");
        assert_eq!(value["state"]["user"]["email"], "couple@example.com");
    }

    #[test]
    fn test_other_versions_are_ignored() {
        let raw = r#"{"version": 7, "state": {"user": null, "current_wedding": null, "active_tab": "budget"}}"#;
        assert_eq!(decode_state(raw).unwrap(), None);
    }

    #[test]
    fn test_missing_tab_defaults_to_dashboard() {
        let raw = r#"{"version": 0, "state": {"user": null, "current_wedding": null}}"#;
        let state = decode_state(raw).unwrap().unwrap();
        assert_eq!(state.active_tab, ActiveTab::Dashboard);
    }

    #[test]
    fn test_file_storage_round_trip() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStateStorage::new(dir.path().join("nested"), "planwed-storage");
        assert_eq!(storage.load()?, None);

        storage.save(&sample_state())?;
        assert!(storage.path().ends_with("planwed-storage.json"));
        assert_eq!(storage.load()?, Some(sample_state()));
        Ok(())
    }

    #[test]
    fn test_file_storage_rejects_garbage() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStateStorage::new(dir.path(), "planwed-storage");
        std::fs::write(storage.path(), "not json")?;
        assert!(matches!(storage.load(), Err(Error::Serialization(_))));
        Ok(())
    }

    #[test]
    fn test_memory_storage_clones_share_slot() -> Result<()> {
        let handle = MemoryStateStorage::new();
        let mut owned = handle.clone();
        owned.save(&sample_state())?;
        assert_eq!(handle.load()?, Some(sample_state()));
        Ok(())
    }
}
