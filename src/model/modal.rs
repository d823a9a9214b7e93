//! Modal stack for the book's dialogs
//!
//! Each confirmation is a variant instead of a separate visibility flag, and
//! only the top modal receives input.

use super::entry::EntryId;

/// A dialog shown on top of the book
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Saving was refused because the title is blank
    MissingTitle,
    /// Confirm permanent deletion of an entry
    ConfirmDelete { id: EntryId },
    /// Confirm closing the book and discarding unsaved changes
    ConfirmClose,
    /// Keyboard shortcuts overlay
    Help,
}

/// A stack of modal overlays
///
/// Only the top modal is drawn and receives input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
