//! String key-value storage for drafts.
//!
//! Values are stored as JSON text. [`MemoryStorage`] lives as long as the
//! process; [`FileStorage`] keeps all entries in one JSON document on disk.
use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use parking_lot::{Mutex, RwLock};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Failure reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// A stored value or the backing file is not valid JSON.
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The platform has no per-user data directory.
    #[error("no data directory is available on this platform")]
    NoDataDir,
}

/// String key-value storage.
pub trait Storage: Send + Sync {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes the JSON value stored under `key`.
pub fn read_json<T>(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
{
    match storage.get(key)? {
        Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
        _ => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn write_json<T>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    storage.set(key, &raw)
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Storage persisted as one JSON object in a file.
///
/// Every write rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the storage at `path`, loading existing entries.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "opened file storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens `storage.json` in the per-user data directory of `app_name`.
    pub fn open_default(app_name: &str) -> Result<Self, StorageError> {
        let dir = dirs::data_local_dir()
            .ok_or(StorageError::NoDataDir)?
            .join(app_name);
        Self::open(dir.join("storage.json"))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
