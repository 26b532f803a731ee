use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use recipe_logging::{recipe_debug, recipe_warn};
use tempfile::NamedTempFile;

use crate::{KeyValueStore, StorageError};

pub const STATE_FILENAME: &str = ".recipe_state.ron";

/// Ensure the state directory exists and is writable; create it if missing.
pub fn ensure_state_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.exists() {
        if !fs::metadata(dir)?.is_dir() {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )));
        }
    } else {
        fs::create_dir_all(dir)?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir)?;
    Ok(())
}

/// Key-value store persisted as a RON map in `{dir}/.recipe_state.ron`.
///
/// Every write rewrites the whole file through a temp file and a rename, so a crash never
/// leaves a half-written state file behind.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    // Serializes read-modify-write of the file within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILENAME)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        match ron::from_str(&content) {
            Ok(values) => Ok(values),
            Err(err) => {
                // A corrupt file is treated as empty and replaced on the next write.
                recipe_warn!("Ignoring unreadable state file {:?}: {}", path, err);
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        ensure_state_dir(&self.dir)?;
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(values, pretty)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;

        let target = self.path();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| StorageError::Io(e.error))?;
        recipe_debug!("Wrote state file {:?}", target);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    /// Read-only check: an existing writable directory, or one that a first write will create.
    fn is_available(&self) -> bool {
        match fs::metadata(&self.dir) {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(err) => err.kind() == io::ErrorKind::NotFound,
        }
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)
    }
}
