//! Confirmation dialogs: missing title, delete entry, close with unsaved changes

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Modal;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// What the dialog on screen is asking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogKind {
    #[default]
    MissingTitle,
    ConfirmDelete,
    ConfirmClose,
}

impl DialogKind {
    pub fn from_modal(modal: &Modal) -> Option<Self> {
        match modal {
            Modal::MissingTitle => Some(DialogKind::MissingTitle),
            Modal::ConfirmDelete { .. } => Some(DialogKind::ConfirmDelete),
            Modal::ConfirmClose => Some(DialogKind::ConfirmClose),
            Modal::Help => None,
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            DialogKind::MissingTitle => "Title missing",
            DialogKind::ConfirmDelete | DialogKind::ConfirmClose => "Are you sure?",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            DialogKind::MissingTitle => "You need to fill in a title before you can save.",
            DialogKind::ConfirmDelete => "This page will be deleted permanently.",
            DialogKind::ConfirmClose => {
                "You have unsaved changes. Do you still want to close the diary?"
            }
        }
    }

    fn confirm_label(&self) -> Option<&'static str> {
        match self {
            DialogKind::MissingTitle => None,
            DialogKind::ConfirmDelete => Some("Yes, delete"),
            DialogKind::ConfirmClose => Some("Yes, close"),
        }
    }
}

/// Modal dialog asking the user to acknowledge or confirm
#[derive(Default)]
pub struct ConfirmDialog {
    pub kind: DialogKind,
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (self.kind, key.code) {
            (DialogKind::MissingTitle, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                Some(Action::CloseModal)
            }
            (DialogKind::MissingTitle, _) => None,
            (_, KeyCode::Char('y') | KeyCode::Char('Y')) => Some(Action::ConfirmModal),
            (_, KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc) => {
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 50, 9);

        frame.render_widget(Clear, popup_area);

        let buttons = match self.kind.confirm_label() {
            Some(label) => Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{}  ", label)),
                Span::styled(
                    " n/Esc ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
            None => Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("OK"),
            ]),
        };

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.kind.message(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            buttons,
        ];

        let border = match self.kind {
            DialogKind::MissingTitle => Color::Yellow,
            _ => Color::Red,
        };

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", self.kind.heading()))
                    .title_style(Style::default().fg(border).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
