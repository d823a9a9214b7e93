//! Book cover component
//!
//! Shown while the book is closed. Any confirm key or a click on the cover
//! opens it; while the opening delay runs the cover shows a short animation.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{centered_popup, contains};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const COVER_WIDTH: u16 = 44;
const COVER_HEIGHT: u16 = 18;

const LEATHER: Color = Color::Rgb(120, 66, 45);
const GOLD: Color = Color::Rgb(230, 190, 90);

/// Closed-book screen
pub struct CoverComponent {
    title: String,
    dedication: String,
    /// Whether the opening delay is running
    pub opening: bool,
    /// Frame counter for the opening animation
    frame: usize,
    /// Where the cover was last drawn, for mouse clicks
    cover_area: Rect,
}

impl Default for CoverComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverComponent {
    pub fn new() -> Self {
        Self {
            title: "Pawprints".to_string(),
            dedication: "Charlie - 4 May 2025 🐾".to_string(),
            opening: false,
            frame: 0,
            cover_area: Rect::default(),
        }
    }

    fn paw() -> Vec<&'static str> {
        vec![
            "   ()  ()   ",
            " ()      () ",
            "    .--.    ",
            "   (    )   ",
            "    `--'    ",
        ]
    }

    fn opening_label(&self) -> String {
        let dots = ".".repeat(self.frame % 4);
        format!("Opening{:<3}", dots)
    }
}

impl Component for CoverComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::ForceQuit),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => Some(Action::OpenBook),
            KeyCode::F(1) | KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if contains(self.cover_area, mouse.column, mouse.row) {
                return Ok(Some(Action::OpenBook));
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.opening {
            self.frame = self.frame.wrapping_add(1);
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let cover = centered_popup(area, COVER_WIDTH, COVER_HEIGHT);
        self.cover_area = cover;

        let mut lines = vec![Line::from(""), Line::from("")];
        lines.push(Line::from(Span::styled(
            self.title.clone(),
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.extend(
            Self::paw()
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(GOLD)))),
        );
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            self.dedication.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(""));

        let hint = if self.opening {
            Span::styled(self.opening_label(), Style::default().fg(GOLD))
        } else {
            Span::styled(
                "Enter / click to open   q to quit",
                Style::default().fg(Color::DarkGray),
            )
        };
        lines.push(Line::from(hint));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(GOLD))
                    .style(Style::default().bg(LEATHER)),
            );

        frame.render_widget(paragraph, cover);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_cover_keys() {
        let mut cover = CoverComponent::new();
        assert_eq!(cover.handle_key_event(key(KeyCode::Enter)).unwrap(), Some(Action::OpenBook));
        assert_eq!(cover.handle_key_event(key(KeyCode::Char('q'))).unwrap(), Some(Action::ForceQuit));
        assert_eq!(cover.handle_key_event(key(KeyCode::Char('x'))).unwrap(), None);
    }

    #[test]
    fn test_click_on_cover_opens() {
        let mut cover = CoverComponent::new();
        cover.cover_area = Rect::new(10, 5, 20, 10);

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(cover.handle_mouse_event(click(12, 6)).unwrap(), Some(Action::OpenBook));
        assert_eq!(cover.handle_mouse_event(click(0, 0)).unwrap(), None);
    }

    #[test]
    fn test_opening_animation_advances_on_tick() {
        let mut cover = CoverComponent::new();
        cover.opening = true;
        cover.update(Action::Tick).unwrap();
        cover.update(Action::Tick).unwrap();
        assert_eq!(cover.opening_label(), "Opening.. ");
    }
}
