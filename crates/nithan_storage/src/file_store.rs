//! Key/value stores for session state.

use nithan_error::{JsonError, NithanResult, StorageError, StorageErrorKind};
use nithan_interface::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

const STATE_FILE: &str = "state.json";

/// JSON-file-backed store.
///
/// Keeps `{state_dir}/state.json` as a flat string map. Every write replaces
/// the file through a temp file + rename; the in-memory map only changes once
/// the file has been written.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens (or creates) the store under `state_dir`.
    ///
    /// An unreadable or corrupt state file is logged and treated as empty,
    /// so a damaged token falls back to "signed out".
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip(state_dir), fields(dir = %state_dir.as_ref().display()))]
    pub fn open(state_dir: impl AsRef<Path>) -> NithanResult<Self> {
        let dir = state_dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        let path = dir.join(STATE_FILE);
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt state file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable state file");
                BTreeMap::new()
            }
        };

        info!(path = %path.display(), keys = entries.len(), "Opened state store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> NithanResult<()> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| JsonError::new(format!("{}: {}", self.path.display(), e)))?;

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> NithanResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    #[instrument(skip(self, value), fields(key = %key))]
    fn set(&self, key: &str, value: &str) -> NithanResult<()> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    fn remove(&self, key: &str) -> NithanResult<()> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        debug!("Removed value");
        Ok(())
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> NithanResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> NithanResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> NithanResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
