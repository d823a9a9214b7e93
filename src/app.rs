//! Root application component
//!
//! App routes terminal events to the cover, the open book, or whichever
//! dialog is on top, and applies the resulting Actions to the diary.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_book_screen, BookComponent, BookRenderContext, ConfirmDialog, CoverComponent, DialogKind,
    HelpDialog,
};
use crate::config::Config;
use crate::model::clock::SystemClock;
use crate::model::{CloseOutcome, Diary, DiaryTiming, DraftField, Modal, ModalStack, SaveOutcome};
use crate::services::JsonFileStorage;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use tracing::{debug, error};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// The diary session
    pub diary: Diary,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub cover: CoverComponent,
    pub book: BookComponent,
    pub confirm_dialog: ConfirmDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create an App backed by the configured storage file and the system clock
    pub fn new(config: &Config) -> App {
        let storage = JsonFileStorage::new(config.effective_storage_path());
        debug!(path = %storage.path().display(), "Using diary storage");

        let diary = Diary::new(
            Box::new(storage),
            Box::new(SystemClock),
            DiaryTiming::from(config),
        );
        Self::with_diary(diary)
    }

    pub fn with_diary(diary: Diary) -> App {
        App {
            diary,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            cover: CoverComponent::new(),
            book: BookComponent::new(),
            confirm_dialog: ConfirmDialog::default(),
            help_dialog: HelpDialog::default(),
        }
    }

    fn save_entry(&mut self) {
        match self.diary.save_entry() {
            Ok(SaveOutcome::Created(_)) => {
                self.error = None;
                self.status_message = Some("Page saved".to_string());
            }
            Ok(SaveOutcome::Updated(_)) => {
                self.error = None;
                self.status_message = Some("Page updated".to_string());
            }
            Ok(SaveOutcome::MissingTitle) => self.modals.push(Modal::MissingTitle),
            Ok(SaveOutcome::EmptyContent) => {}
            Err(e) => self.report_storage_error(e),
        }
    }

    fn confirm_modal(&mut self) {
        match self.modals.pop() {
            Some(Modal::ConfirmDelete { id }) => match self.diary.delete_entry(id) {
                Ok(true) => self.status_message = Some("Page deleted".to_string()),
                Ok(false) => {}
                Err(e) => self.report_storage_error(e),
            },
            Some(Modal::ConfirmClose) => {
                self.diary.close_book_confirmed();
                self.modals.clear();
                self.status_message = None;
            }
            _ => {}
        }
    }

    fn type_char(&mut self, c: char) {
        if c == '\n' && self.diary.draft.focus == DraftField::Title {
            self.diary.draft.focus = DraftField::Content;
            return;
        }
        if !self.diary.draft.insert_char(c) && self.diary.draft.focus == DraftField::Content {
            self.status_message = Some("This page is full".to_string());
        }
    }

    /// Whether the draft may be edited right now
    fn can_edit(&self) -> bool {
        self.diary.book.is_open() && !self.diary.book.is_turning()
    }

    fn report_storage_error(&mut self, e: anyhow::Error) {
        error!(error = %format!("{:#}", e), "Could not save the diary");
        self.error = Some(format!("Could not save the diary: {}", e));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.cover.init()?;
        self.book.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if self.diary.book.is_open() {
            self.book.editing = self.diary.draft.editing();
            self.book.handle_key_event(key)
        } else {
            self.cover.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }

        if self.diary.book.is_open() {
            self.book.handle_mouse_event(mouse)
        } else {
            self.cover.handle_mouse_event(mouse)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "Handling action");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.diary.tick();
                self.cover.opening = self.diary.book.is_opening();
                self.cover.update(Action::Tick)?;
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Book
            // ─────────────────────────────────────────────────────────────────
            Action::OpenBook => {
                self.diary.open_book();
                self.cover.opening = self.diary.book.is_opening();
            }
            Action::CloseBook => match self.diary.close_book() {
                CloseOutcome::Closed => self.status_message = None,
                CloseOutcome::NeedsConfirmation => self.modals.push(Modal::ConfirmClose),
            },
            Action::NextPage => {
                if self.diary.next_page() {
                    self.status_message = None;
                }
            }
            Action::PrevPage => {
                if self.diary.prev_page() {
                    self.status_message = None;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Draft Editor
            // ─────────────────────────────────────────────────────────────────
            Action::Input(c) => {
                if self.can_edit() {
                    self.type_char(c);
                }
            }
            Action::Backspace => {
                if self.can_edit() {
                    self.diary.draft.backspace();
                }
            }
            Action::ToggleField => {
                self.diary.draft.focus = self.diary.draft.focus.toggle();
            }
            Action::SaveEntry => {
                if self.can_edit() {
                    self.save_entry();
                }
            }
            Action::DeleteEntry(id) => {
                if self.can_edit() && self.diary.store.find(id).is_some() {
                    self.modals.push(Modal::ConfirmDelete { id });
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::ConfirmModal => self.confirm_modal(),
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if self.diary.book.is_open() {
            let diary = &self.diary;
            let ctx = BookRenderContext {
                page: diary.book.page(),
                page_total: diary.book.page_total(diary.store.len()),
                turning: diary.book.is_turning(),
                can_go_prev: diary.book.can_go_prev(),
                can_go_next: diary.book.can_go_next(diary.store.len()),
                left_entry: diary.left_page_entry(),
                title: diary.draft.title(),
                content: diary.draft.content(),
                focus: diary.draft.focus,
                draft_date: diary.draft_date(),
                editing: diary.draft.editing(),
                unsaved: diary.has_unsaved_changes(),
                status_message: self.status_message.as_deref(),
                error: self.error.as_deref(),
            };
            draw_book_screen(frame, area, &mut self.book, &ctx)?;
        } else {
            self.cover.draw(frame, area)?;
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match DialogKind::from_modal(modal) {
            Some(kind) => {
                self.confirm_dialog.kind = kind;
                self.confirm_dialog.handle_key_event(key)
            }
            None => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match DialogKind::from_modal(modal) {
            Some(kind) => {
                self.confirm_dialog.kind = kind;
                self.confirm_dialog.draw(frame, area)
            }
            None => self.help_dialog.draw(frame, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clock::ManualClock;
    use crate::model::DiaryEntry;
    use crate::services::storage::{EntryStorage, MemoryStorage};
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::rc::Rc;

    struct Harness {
        app: App,
        clock: ManualClock,
        storage: Rc<MemoryStorage>,
    }

    impl Harness {
        fn new() -> Self {
            let clock = ManualClock::at(2025, 5, 4, 20, 0);
            let storage = Rc::new(MemoryStorage::new());
            let diary = Diary::new(
                Box::new(storage.clone()),
                Box::new(clock.clone()),
                DiaryTiming::default(),
            );
            Self {
                app: App::with_diary(diary),
                clock,
                storage,
            }
        }

        fn act(&mut self, action: Action) {
            let mut next = Some(action);
            while let Some(a) = next {
                next = self.app.update(a).unwrap();
            }
        }

        fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            let key = KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            };
            if let Some(action) = self.app.handle_key_event(key).unwrap() {
                self.act(action);
            }
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c), KeyModifiers::NONE);
            }
        }

        fn wait(&mut self, ms: i64) {
            self.clock.advance_ms(ms);
            self.act(Action::Tick);
        }

        fn open(&mut self) {
            self.press(KeyCode::Enter, KeyModifiers::NONE);
            self.wait(1000);
            assert!(self.app.diary.book.is_open());
        }

        fn write(&mut self, title: &str, content: &str) {
            self.app.diary.draft.focus = DraftField::Title;
            self.type_text(title);
            self.press(KeyCode::Tab, KeyModifiers::NONE);
            self.type_text(content);
        }

        fn save(&mut self) {
            self.press(KeyCode::Char('s'), KeyModifiers::CONTROL);
        }
    }

    #[test]
    fn test_cover_opens_after_delay() {
        let mut h = Harness::new();
        h.press(KeyCode::Enter, KeyModifiers::NONE);
        assert!(h.app.diary.book.is_opening());
        assert!(h.app.cover.opening);

        h.wait(1000);
        assert!(h.app.diary.book.is_open());
        assert!(!h.app.cover.opening);
    }

    #[test]
    fn test_write_and_save_new_entry() {
        let mut h = Harness::new();
        h.open();
        h.write("T", "C");
        h.save();

        let stored = h.storage.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "T");
        assert_eq!(stored[0].content, "C");
        assert_eq!(stored[0].date, NaiveDate::from_ymd_opt(2025, 5, 4).unwrap());
        assert_eq!(h.app.status_message.as_deref(), Some("Page saved"));
    }

    #[test]
    fn test_typed_title_is_truncated() {
        let mut h = Harness::new();
        h.open();
        h.write("Twenty-five characters!!!", "body");
        assert_eq!(h.app.diary.draft.title(), "Twenty-five characte");

        h.save();
        assert_eq!(h.storage.load().unwrap()[0].title, "Twenty-five characte");
    }

    #[test]
    fn test_content_beyond_limit_cannot_be_typed() {
        let mut h = Harness::new();
        h.open();
        h.type_text(&"x".repeat(210));

        assert_eq!(h.app.diary.draft.content_len(), 200);
        assert_eq!(h.app.status_message.as_deref(), Some("This page is full"));
    }

    #[test]
    fn test_save_without_title_opens_dialog() {
        let mut h = Harness::new();
        h.open();
        h.press(KeyCode::Tab, KeyModifiers::NONE);
        h.press(KeyCode::Tab, KeyModifiers::NONE);
        h.type_text("content only");
        h.save();

        assert_eq!(h.app.modals.top(), Some(&Modal::MissingTitle));
        assert!(h.app.diary.store.is_empty());
        assert_eq!(h.storage.raw(), None);

        // typing goes to the dialog, not the draft
        h.press(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(h.app.diary.draft.content(), "content only");

        h.press(KeyCode::Enter, KeyModifiers::NONE);
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_close_with_unsaved_changes_confirm() {
        let mut h = Harness::new();
        h.open();
        h.write("Dirty", "unsaved");

        h.press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(h.app.modals.top(), Some(&Modal::ConfirmClose));
        assert!(h.app.diary.book.is_open());

        h.press(KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(h.app.diary.book.is_closed());
        assert!(h.app.diary.draft.is_empty());
        assert!(h.app.modals.is_empty());
        assert!(h.app.diary.store.is_empty());
    }

    #[test]
    fn test_close_with_unsaved_changes_cancel() {
        let mut h = Harness::new();
        h.open();
        h.write("Dirty", "unsaved");

        h.press(KeyCode::Esc, KeyModifiers::NONE);
        h.press(KeyCode::Char('n'), KeyModifiers::NONE);

        assert!(h.app.modals.is_empty());
        assert!(h.app.diary.book.is_open());
        assert_eq!(h.app.diary.draft.title(), "Dirty");
        assert_eq!(h.app.diary.draft.content(), "unsaved");
    }

    #[test]
    fn test_close_without_changes_is_immediate() {
        let mut h = Harness::new();
        h.open();
        h.press(KeyCode::Esc, KeyModifiers::NONE);

        assert!(h.app.modals.is_empty());
        assert!(h.app.diary.book.is_closed());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut h = Harness::new();
        h.open();
        h.write("Bye", "soon gone");
        h.save();
        let id = h.app.diary.draft.editing().unwrap();

        h.press(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(h.app.modals.top(), Some(&Modal::ConfirmDelete { id }));

        h.press(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(h.app.diary.store.len(), 1);

        h.press(KeyCode::Char('d'), KeyModifiers::CONTROL);
        h.press(KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(h.app.diary.store.is_empty());
        assert!(h.storage.load().unwrap().is_empty());
        assert!(h.app.diary.draft.is_empty());
        assert_eq!(h.app.diary.book.page(), 0);
    }

    #[test]
    fn test_delete_refused_while_turning() {
        let mut h = Harness::new();
        h.app
            .diary
            .store
            .append(DiaryEntry::new(1, NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(), "Today", "now"))
            .unwrap();
        h.open();
        assert_eq!(h.app.diary.draft.editing(), Some(1));

        h.press(KeyCode::PageUp, KeyModifiers::NONE);
        assert!(h.app.diary.book.is_turning());
        h.act(Action::DeleteEntry(1));
        assert!(h.app.modals.is_empty());

        h.wait(300);
        assert_eq!(h.app.diary.store.len(), 1);
        assert_eq!(h.app.diary.book.page(), 0);
    }

    #[test]
    fn test_editing_ignored_while_turning() {
        let mut h = Harness::new();
        h.app
            .diary
            .store
            .append(DiaryEntry::new(1, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), "Old", "old"))
            .unwrap();
        h.open();

        h.press(KeyCode::PageDown, KeyModifiers::NONE);
        assert!(h.app.diary.book.is_turning());
        h.type_text("lost");
        assert!(h.app.diary.draft.is_empty());

        h.wait(300);
        assert_eq!(h.app.diary.book.page(), 2);
    }

    #[test]
    fn test_help_overlay_routes_keys() {
        let mut h = Harness::new();
        h.press(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(h.app.modals.top(), Some(&Modal::Help));

        // cover keys are blocked while help is showing
        h.press(KeyCode::Enter, KeyModifiers::NONE);
        assert!(h.app.diary.book.is_closed());

        h.press(KeyCode::Esc, KeyModifiers::NONE);
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_draw_cover_and_book() {
        let mut h = Harness::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| h.app.draw(f, f.area()).unwrap()).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Pawprints"));

        h.open();
        h.act(Action::SaveEntry);
        terminal.draw(|f| h.app.draw(f, f.area()).unwrap()).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Title missing"));
    }
}
