//! Local state storage location.
//!
//! The persisted store subset lives in `<PLANWED_STATE_DIR>/planwed-storage.json`.

use crate::store::{AppStore, FileStateStorage};
use std::path::PathBuf;
use tracing::info;

/// Namespace key the persisted state is stored under.
pub const STORAGE_NAMESPACE: &str = "planwed-storage";

/// Directory used when `PLANWED_STATE_DIR` is not set.
pub const DEFAULT_STATE_DIR: &str = "data";

/// Gets the state directory from `PLANWED_STATE_DIR`, defaulting to `./data`.
#[must_use]
pub fn get_state_dir() -> PathBuf {
    std::env::var("PLANWED_STATE_DIR")
        .map_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from)
}

/// File storage for the persisted subset in the configured directory.
#[must_use]
pub fn open_state_storage() -> FileStateStorage {
    let storage = FileStateStorage::new(get_state_dir(), STORAGE_NAMESPACE);
    info!("Local state file: {:?}", storage.path());
    storage
}

/// A store pre-populated from the configured local state file.
#[must_use]
pub fn restore_store() -> AppStore {
    AppStore::restore(Box::new(open_state_storage()))
}
