//! Model layer - diary state without any terminal concerns
//!
//! - `Diary` - the session: entry store, book navigator, draft editor
//! - `EntryStore` - ordered entry list mirrored to storage
//! - `Book` - page index and deferred open/turn transitions
//! - `Draft` - the in-progress title and content
//! - `ModalStack` - confirmation dialogs and overlays

pub mod book;
pub mod clock;
pub mod diary;
pub mod draft;
pub mod entry;
pub mod modal;
pub mod store;

pub use diary::{CloseOutcome, Diary, DiaryTiming, SaveOutcome};
pub use draft::DraftField;
pub use entry::{DiaryEntry, EntryId, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
pub use modal::{Modal, ModalStack};
