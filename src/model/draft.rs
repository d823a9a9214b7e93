//! Draft editor state

use super::entry::{truncate_title, DiaryEntry, EntryId, MAX_CONTENT_LENGTH};

/// Which draft field receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    Title,
    #[default]
    Content,
}

impl DraftField {
    pub fn toggle(self) -> Self {
        match self {
            DraftField::Title => DraftField::Content,
            DraftField::Content => DraftField::Title,
        }
    }
}

/// The in-progress title/content pair for the page on screen
///
/// `editing` is the id of the entry the draft is bound to; `None` means the
/// draft will become a new entry when saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    title: String,
    content: String,
    editing: Option<EntryId>,
    pub focus: DraftField,
}

impl Draft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn editing(&self) -> Option<EntryId> {
        self.editing
    }

    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Load a saved entry into the editor and bind to it
    pub fn load(&mut self, entry: &DiaryEntry) {
        self.title = truncate_title(&entry.title);
        self.content = entry.content.clone();
        self.editing = Some(entry.id);
    }

    /// Empty the editor and unbind it
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
        self.editing = None;
    }

    pub fn bind(&mut self, id: EntryId) {
        self.editing = Some(id);
    }

    /// Replace the title, truncated to the title limit
    pub fn set_title(&mut self, title: &str) {
        self.title = truncate_title(title);
    }

    /// Replace the content; rejected when over the content limit
    #[cfg(test)]
    pub fn set_content(&mut self, content: &str) -> bool {
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return false;
        }
        self.content = content.to_string();
        true
    }

    /// Type a character into the focused field
    ///
    /// Returns false when the field is full and the character was dropped.
    pub fn insert_char(&mut self, c: char) -> bool {
        match self.focus {
            DraftField::Title => {
                let mut title = std::mem::take(&mut self.title);
                title.push(c);
                self.set_title(&title);
                self.title.len() == title.len()
            }
            DraftField::Content => {
                if self.content_len() >= MAX_CONTENT_LENGTH {
                    return false;
                }
                self.content.push(c);
                true
            }
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            DraftField::Title => {
                self.title.pop();
            }
            DraftField::Content => {
                self.content.pop();
            }
        }
    }

    /// Whether the draft differs from what is saved
    ///
    /// A bound draft is compared with its entry (`saved`); an unbound draft
    /// counts as unsaved as soon as it has any text.
    pub fn differs_from(&self, saved: Option<&DiaryEntry>) -> bool {
        match (self.editing, saved) {
            (Some(_), Some(entry)) => entry.title != self.title || entry.content != self.content,
            _ => !self.is_empty(),
        }
    }
}
