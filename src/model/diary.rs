//! Diary session state
//!
//! `Diary` owns the entry store, the book navigator and the draft editor and
//! implements every state transition of the book. It has no terminal
//! dependencies: the App translates actions into these calls and turns the
//! returned outcomes into dialogs and status messages.

use super::book::{Book, BookEvent};
use super::clock::Clock;
use super::draft::Draft;
use super::entry::{DiaryEntry, EntryId};
use super::store::EntryStore;
use crate::config::Config;
use crate::services::storage::EntryStorage;
use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

/// Result of asking to save the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was appended
    Created(EntryId),
    /// The bound entry was updated in place
    Updated(EntryId),
    /// The title is blank; the user must be told
    MissingTitle,
    /// The content is blank; nothing happens
    EmptyContent,
}

/// Result of asking to close the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// There are unsaved changes; ask before discarding them
    NeedsConfirmation,
}

/// Timing knobs for the book
#[derive(Debug, Clone, Copy)]
pub struct DiaryTiming {
    pub open_delay: Duration,
    pub page_turn: Duration,
    pub day_check: Duration,
}

impl Default for DiaryTiming {
    fn default() -> Self {
        Self {
            open_delay: Duration::milliseconds(1000),
            page_turn: Duration::milliseconds(300),
            day_check: Duration::seconds(60),
        }
    }
}

impl From<&Config> for DiaryTiming {
    /// Values too large for a `Duration` fall back to the defaults
    fn from(config: &Config) -> Self {
        let defaults = Self::default();
        let millis = |name, value| config_duration(name, value, Duration::try_milliseconds);
        Self {
            open_delay: millis("open_delay_ms", config.open_delay_ms).unwrap_or(defaults.open_delay),
            page_turn: millis("page_turn_ms", config.page_turn_ms).unwrap_or(defaults.page_turn),
            day_check: config_duration("day_check_secs", config.day_check_secs, Duration::try_seconds)
                .unwrap_or(defaults.day_check),
        }
    }
}

fn config_duration(name: &str, value: u64, make: fn(i64) -> Option<Duration>) -> Option<Duration> {
    let duration = i64::try_from(value).ok().and_then(make);
    if duration.is_none() {
        warn!(setting = name, value, "Timing setting out of range, using the default");
    }
    duration
}

/// `now + delay`, pinned to the far future when that overflows
fn after(now: NaiveDateTime, delay: Duration) -> NaiveDateTime {
    now.checked_add_signed(delay).unwrap_or(NaiveDateTime::MAX)
}

/// The whole diary session
pub struct Diary {
    pub store: EntryStore,
    pub book: Book,
    pub draft: Draft,
    clock: Box<dyn Clock>,
    /// Day the current draft belongs to
    reference_date: NaiveDate,
    next_day_check: NaiveDateTime,
    day_check: Duration,
}

impl Diary {
    pub fn new(storage: Box<dyn EntryStorage>, clock: Box<dyn Clock>, timing: DiaryTiming) -> Self {
        let now = clock.now();
        Self {
            store: EntryStore::load(storage),
            book: Book::new(timing.open_delay, timing.page_turn),
            draft: Draft::default(),
            reference_date: now.date(),
            next_day_check: after(now, timing.day_check),
            day_check: timing.day_check,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The saved entry the draft is bound to
    pub fn editing_entry(&self) -> Option<&DiaryEntry> {
        self.draft.editing().and_then(|id| self.store.find(id))
    }

    /// Date shown on the editable page
    pub fn draft_date(&self) -> NaiveDate {
        self.editing_entry()
            .map(|e| e.date)
            .unwrap_or(self.reference_date)
    }

    /// Entry shown read-only on the left page, `None` for the portrait
    pub fn left_page_entry(&self) -> Option<&DiaryEntry> {
        let page = self.book.page();
        if page < 2 {
            return None;
        }
        self.store.get(page - 2)
    }

    /// Whether the draft holds edits that would be lost on close
    pub fn has_unsaved_changes(&self) -> bool {
        if !self.book.is_open() {
            return false;
        }
        self.draft.differs_from(self.editing_entry())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Book Navigator
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_book(&mut self) {
        if self.book.open(self.clock.now()) {
            debug!("Opening book");
        }
    }

    pub fn close_book(&mut self) -> CloseOutcome {
        if self.has_unsaved_changes() {
            return CloseOutcome::NeedsConfirmation;
        }
        self.close_book_confirmed();
        CloseOutcome::Closed
    }

    /// Close and discard whatever is in the draft
    pub fn close_book_confirmed(&mut self) {
        self.book.close();
        self.draft.clear();
        debug!("Closed book");
    }

    pub fn next_page(&mut self) -> bool {
        self.book.next(self.clock.now(), self.store.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.book.prev(self.clock.now())
    }

    /// Advance deferred transitions and the day check
    pub fn tick(&mut self) {
        let now = self.clock.now();

        match self.book.poll(now) {
            Some(BookEvent::Opened) => self.locate_today(),
            Some(BookEvent::Turned(page)) => self.load_page(page),
            None => {}
        }

        if now >= self.next_day_check {
            self.next_day_check = after(now, self.day_check);
            self.check_for_new_day();
        }
    }

    /// Jump to today's entry, or to the last page when there is none
    fn locate_today(&mut self) {
        let today = self.today();
        self.reference_date = today;

        if let Some((index, entry)) = self.store.find_by_date(today) {
            let entry = entry.clone();
            self.draft.load(&entry);
            self.book.set_page(index + 1);
            debug!(id = entry.id, page = index + 1, "Opened on today's entry");
        } else {
            self.draft.clear();
            self.book.set_page(self.store.len());
            debug!(page = self.store.len(), "No entry for today");
        }
    }

    /// Load the entry that lives on `page`, or clear the draft if none does
    fn load_page(&mut self, page: usize) {
        let entry = page
            .checked_sub(1)
            .and_then(|index| self.store.get(index))
            .cloned();

        match entry {
            Some(entry) => self.draft.load(&entry),
            None => self.draft.clear(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Draft Editor
    // ─────────────────────────────────────────────────────────────────────────

    pub fn save_entry(&mut self) -> Result<SaveOutcome> {
        if self.draft.title().trim().is_empty() {
            return Ok(SaveOutcome::MissingTitle);
        }
        if self.draft.content().trim().is_empty() {
            debug!("Ignoring save of empty content");
            return Ok(SaveOutcome::EmptyContent);
        }

        if let Some(id) = self.draft.editing() {
            if self.store.find(id).is_some() {
                let title = self.draft.title().to_string();
                let content = self.draft.content().to_string();
                self.store.replace(id, &title, &content)?;
                info!(id, "Updated diary entry");
                return Ok(SaveOutcome::Updated(id));
            }
        }

        let now = self.clock.now();
        let id = self.store.next_id(self.clock.timestamp_millis());
        let entry = DiaryEntry::new(id, now.date(), self.draft.title(), self.draft.content());
        self.draft.bind(id);
        self.book.set_page(self.store.len() + 1);
        self.store.append(entry)?;
        info!(id, date = %now.date(), "Created diary entry");

        Ok(SaveOutcome::Created(id))
    }

    /// Delete the entry with `id` after the user confirmed
    pub fn delete_entry(&mut self, id: EntryId) -> Result<bool> {
        let removed = self.store.remove(id);

        if self.draft.editing() == Some(id) {
            self.draft.clear();
        }
        // a pending turn targets a page index from before the removal
        self.book.cancel_turn();
        self.book.clamp(self.store.len());

        let removed = removed?;
        if removed {
            info!(id, "Deleted diary entry");
        }
        Ok(removed)
    }

    /// Clear the draft if the calendar day moved on since it was started
    pub fn check_for_new_day(&mut self) -> bool {
        let today = self.today();
        if today <= self.reference_date {
            return false;
        }

        info!(from = %self.reference_date, to = %today, "Day changed, clearing draft");
        self.reference_date = today;
        self.draft.clear();
        true
    }
}
