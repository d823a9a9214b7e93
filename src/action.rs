//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key and mouse events, and the App
//! processes them to update the diary.

use crate::model::EntryId;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick driving page animations and the day check
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit immediately
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Book
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the book from the cover
    OpenBook,
    /// Close the book, asking first if there are unsaved changes
    CloseBook,
    /// Turn to the next page
    NextPage,
    /// Turn to the previous page
    PrevPage,

    // ─────────────────────────────────────────────────────────────────────────
    // Draft Editor
    // ─────────────────────────────────────────────────────────────────────────
    /// Type a character into the focused field
    Input(char),
    /// Delete the last character of the focused field
    Backspace,
    /// Move focus between title and content
    ToggleField,
    /// Save the draft
    SaveEntry,
    /// Ask to delete the given entry
    DeleteEntry(EntryId),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the keyboard shortcuts overlay
    OpenHelp,
    /// Confirm the top dialog
    ConfirmModal,
    /// Dismiss the top dialog without acting
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenBook => write!(f, "OpenBook"),
            Action::CloseBook => write!(f, "CloseBook"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::Input(c) => write!(f, "Input({:?})", c),
            Action::Backspace => write!(f, "Backspace"),
            Action::ToggleField => write!(f, "ToggleField"),
            Action::SaveEntry => write!(f, "SaveEntry"),
            Action::DeleteEntry(id) => write!(f, "DeleteEntry({})", id),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
