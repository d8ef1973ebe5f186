//! File-backed storage: one JSON file per key.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `WILDFLOUR_STATE_DIR` - Directory for persisted state files
//!   (default: `.wildflour/state`)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StateStorage, StorageError};

/// Environment variable naming the state directory.
pub const STATE_DIR_ENV: &str = "WILDFLOUR_STATE_DIR";

/// Default state directory, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".wildflour/state";

/// Durable key-value storage backed by one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    /// Open storage at the directory named by `WILDFLOUR_STATE_DIR`.
    ///
    /// Loads `.env` via dotenvy if present. Falls back to
    /// [`DEFAULT_STATE_DIR`] when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn from_env() -> Result<Self, StorageError> {
        let _ = dotenvy::dotenv();
        let dir =
            std::env::var(STATE_DIR_ENV).unwrap_or_else(|_| DEFAULT_STATE_DIR.to_string());
        Self::open(dir)
    }

    /// Directory holding the state files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys must be usable as file names on any platform.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}

impl StateStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::write(&path, value).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}
