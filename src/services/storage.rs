//! Persistent entry storage
//!
//! The whole entry list lives under a single key: one JSON file holding the
//! serialized array. It is read once at startup and rewritten wholesale on
//! every change.

use crate::model::entry::DiaryEntry;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default storage key, used as the file name of the entry list
pub const STORAGE_KEY: &str = "pawprintsDiary";

/// Backend that can read and overwrite the full entry list
pub trait EntryStorage {
    /// Read the stored list. A missing list is `Ok(vec![])`.
    fn load(&self) -> Result<Vec<DiaryEntry>>;

    /// Replace the stored list with `entries`
    fn save(&self, entries: &[DiaryEntry]) -> Result<()>;
}

/// Entry list stored as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntryStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<DiaryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed entry list in {}", self.path.display()))
    }

    /// Write the list to a temporary file beside the target, then rename it
    /// over the target so the old list survives a failed write
    fn save(&self, entries: &[DiaryEntry]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let json = serde_json::to_string(entries).context("Failed to serialize entries")?;

        let mut temp_file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
        temp_file
            .write_all(json.as_bytes())
            .and_then(|_| temp_file.as_file().sync_all())
            .with_context(|| format!("Failed to write {}", temp_file.path().display()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

/// In-memory storage holding the serialized list, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw JSON, which need not be valid
    pub fn with_raw(raw: &str) -> Self {
        Self {
            data: std::cell::RefCell::new(Some(raw.to_string())),
        }
    }

    /// Raw JSON currently stored
    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

#[cfg(test)]
impl EntryStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<DiaryEntry>> {
        match self.data.borrow().as_deref() {
            Some(raw) => serde_json::from_str(raw).context("Malformed entry list"),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[DiaryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        *self.data.borrow_mut() = Some(json);
        Ok(())
    }
}

#[cfg(test)]
impl<S: EntryStorage + ?Sized> EntryStorage for std::rc::Rc<S> {
    fn load(&self) -> Result<Vec<DiaryEntry>> {
        (**self).load()
    }

    fn save(&self, entries: &[DiaryEntry]) -> Result<()> {
        (**self).save(entries)
    }
}
