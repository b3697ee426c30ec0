//! Best-effort persistence of the cube session under a single storage key.
//!
//! Saving and loading never fail from the caller's point of view. Problems
//! are logged and the operation becomes a no-op.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub const STORAGE_KEY: &str = "rubiksCubeState";

/// How long the state must stay unchanged before it is auto-saved
pub const SAVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not (de)serialize the stored value: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storing {needed} bytes under `{key}` exceeds the quota of {quota} bytes")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("`{0}` cannot be used as a storage key")]
    InvalidKey(String),
}

/// A durable string key-value store
pub trait Storage {
    /// # Errors
    ///
    /// If the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// If the store cannot be written or is full.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// If the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Storage held in memory, optionally with a size limit on the total of all
/// stored values
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub fn with_quota(quota: usize) -> MemoryStorage {
        MemoryStorage {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .values
                .iter()
                .filter(|(k, _)| *k != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    quota,
                });
            }
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage in a directory, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> FileStorage {
        FileStorage { dir: dir.into() }
    }

    /// Storage in the platform's per-user data directory
    pub fn in_data_dir() -> Option<FileStorage> {
        dirs::data_dir().map(|dir| FileStorage::new(dir.join("cube")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        debug!(target: "storage", "Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Save `state` under [`STORAGE_KEY`]. Failures are logged and ignored.
pub fn save_cube_state<T: Serialize>(storage: &mut impl Storage, state: &T) {
    let result = serde_json::to_string(state)
        .map_err(StorageError::from)
        .and_then(|json| storage.set(STORAGE_KEY, &json));
    match result {
        Ok(()) => debug!(target: "storage", "Saved cube state"),
        Err(err) => warn!(target: "storage", "Failed to save cube state: {err}"),
    }
}

/// The state saved under [`STORAGE_KEY`], if there is a readable one
pub fn load_cube_state<T: DeserializeOwned>(storage: &impl Storage) -> Option<T> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(err) => {
            warn!(target: "storage", "Failed to load cube state: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(target: "storage", "Failed to load cube state: {err}");
            None
        }
    }
}

/// Forget the saved state. Failures are logged and ignored.
pub fn clear_cube_state(storage: &mut impl Storage) {
    if let Err(err) = storage.remove(STORAGE_KEY) {
        warn!(target: "storage", "Failed to clear cube state: {err}");
    }
}

/// Delays an action until things have been quiet for a while. Every
/// [`touch`](Debounce::touch) pushes the deadline back.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Debounce::new(SAVE_DELAY)
    }
}

impl Debounce {
    pub fn new(delay: Duration) -> Debounce {
        Debounce {
            delay,
            deadline: None,
        }
    }

    /// Something changed at `now`
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether the action is due at `now`. Returns `true` once per quiet
    /// period.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Take a pending action regardless of the deadline, as on shutdown
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
