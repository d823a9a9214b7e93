//! Entry store - the ordered entry list mirrored to storage

use super::entry::{DiaryEntry, EntryId};
use crate::services::storage::EntryStorage;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, error, warn};

/// Ordered list of diary entries, written back to storage on every change
///
/// Mutations are applied in memory first; a failed write is logged and
/// returned, but the in-memory list keeps the change.
pub struct EntryStore {
    entries: Vec<DiaryEntry>,
    storage: Box<dyn EntryStorage>,
}

impl EntryStore {
    /// Load the list from `storage`, falling back to empty on any read error
    pub fn load(storage: Box<dyn EntryStorage>) -> Self {
        let entries = match storage.load() {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded diary entries");
                entries
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Could not load diary entries, starting empty");
                Vec::new()
            }
        };

        Self { entries, storage }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DiaryEntry> {
        self.entries.get(index)
    }

    pub fn find(&self, id: EntryId) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// First entry written on `date`
    pub fn find_by_date(&self, date: NaiveDate) -> Option<(usize, &DiaryEntry)> {
        self.entries.iter().enumerate().find(|(_, e)| e.date == date)
    }

    /// Id for a new entry created at `timestamp`, bumped past any collision
    pub fn next_id(&self, timestamp: EntryId) -> EntryId {
        if self.find(timestamp).is_none() {
            return timestamp;
        }
        let max = self.entries.iter().map(|e| e.id).max().unwrap_or(timestamp);
        max.max(timestamp) + 1
    }

    /// Append a new entry at the end of the book
    pub fn append(&mut self, entry: DiaryEntry) -> Result<()> {
        debug!(id = entry.id, date = %entry.date, "Appending entry");
        self.entries.push(entry);
        self.persist()
    }

    /// Replace title and content of the entry with `id`
    ///
    /// Returns `Ok(false)` when no such entry exists.
    pub fn replace(&mut self, id: EntryId, title: &str, content: &str) -> Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.title = super::entry::truncate_title(title);
        entry.content = content.to_string();
        debug!(id, "Updated entry");
        self.persist()?;
        Ok(true)
    }

    /// Remove the entry with `id`; returns `Ok(false)` when nothing matched
    pub fn remove(&mut self, id: EntryId) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        debug!(id, "Removed entry");
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.entries).inspect_err(|e| {
            error!(error = %format!("{:#}", e), "Failed to write diary entries");
        })
    }
}
