//! Storage backends the cart store persists through.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing a storage file failed.
    #[error("storage I/O failed for {}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,

        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Key/value storage for serialized client state.
///
/// Each client supplies its own backend (browser storage, device storage, a
/// directory on disk); the cart store only sees this trait.
pub trait CartStorage {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend could not be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();

        storage.values.insert(key.into(), value.into());

        storage
    }

    /// Returns the raw stored value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Staging file a new value is written to before it replaces `key`'s file.
    fn staging_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write aside and rename so an interrupted save leaves the old value intact.
        let staging = self.staging_path_for(key);

        fs::write(&staging, value).map_err(|source| StorageError::Io {
            path: staging.clone(),
            source,
        })?;

        let path = self.path_for(key);

        fs::rename(&staging, &path).map_err(|source| StorageError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn memory_storage_round_trips_values() -> TestResult {
        let mut storage = MemoryStorage::new();

        assert_eq!(storage.load("cart")?, None);

        storage.save("cart", "{}")?;

        assert_eq!(storage.load("cart")?.as_deref(), Some("{}"));
        assert_eq!(storage.get("cart"), Some("{}"));

        Ok(())
    }

    #[test]
    fn file_storage_missing_key_is_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.load("cart")?, None);

        Ok(())
    }

    #[test]
    fn file_storage_creates_directory_and_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path().join("nested").join("state"));

        storage.save("randostore-cart", r#"{"version":0}"#)?;

        assert!(storage.path_for("randostore-cart").exists());
        assert_eq!(
            storage.load("randostore-cart")?.as_deref(),
            Some(r#"{"version":0}"#)
        );

        Ok(())
    }

    #[test]
    fn file_storage_overwrites_previous_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path());

        storage.save("cart", "first")?;
        storage.save("cart", "second")?;

        assert_eq!(storage.load("cart")?.as_deref(), Some("second"));

        Ok(())
    }

    #[test]
    fn file_storage_leaves_no_staging_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path());

        storage.save("cart", "first")?;
        storage.save("cart", "second")?;

        let names: Vec<String> = fs::read_dir(dir.path())?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;

        assert_eq!(names, vec!["cart.json".to_string()]);

        Ok(())
    }

    #[test]
    fn interrupted_save_keeps_previous_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileStorage::new(dir.path());

        storage.save("cart", r#"{"version":0}"#)?;

        // A torn write only ever reaches the staging file.
        fs::write(storage.staging_path_for("cart"), r#"{"vers"#)?;

        assert_eq!(storage.load("cart")?.as_deref(), Some(r#"{"version":0}"#));

        storage.save("cart", r#"{"version":1}"#)?;

        assert_eq!(storage.load("cart")?.as_deref(), Some(r#"{"version":1}"#));

        Ok(())
    }
}
