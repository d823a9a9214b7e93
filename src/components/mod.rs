//! UI Components
//!
//! Each component turns terminal events into Actions and renders one part of
//! the screen: the cover, the open book, and the dialogs on top of it.

pub mod book;
pub mod confirm_dialog;
pub mod cover;
pub mod help_dialog;
pub mod layout;

pub use book::{draw_book_screen, BookComponent, BookRenderContext};
pub use confirm_dialog::{ConfirmDialog, DialogKind};
pub use cover::CoverComponent;
pub use help_dialog::HelpDialog;
pub use layout::centered_popup;
