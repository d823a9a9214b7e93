//! Keyboard shortcuts overlay

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

const HELP_WIDTH: u16 = 58;
const HELP_HEIGHT: u16 = 30;

const GOLD: Color = Color::Rgb(230, 190, 90);

/// (key, what it does), grouped under a heading
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Cover",
        &[
            ("Enter / click", "Open the diary"),
            ("q / Esc", "Quit"),
        ],
    ),
    (
        "Turning pages",
        &[
            ("PgDn / Ctrl+n", "Next page"),
            ("PgUp / Ctrl+p", "Previous page"),
            ("click ← / →", "Previous / next page"),
            ("Esc", "Close the diary"),
        ],
    ),
    (
        "Writing",
        &[
            ("Tab", "Switch between title and text"),
            ("Enter", "New line (next field in title)"),
            ("Backspace", "Delete last character"),
            ("Ctrl+s", "Save or update the page"),
            ("Ctrl+d", "Delete the page"),
        ],
    ),
    (
        "General",
        &[("F1", "Show this help"), ("Ctrl+c", "Quit immediately")],
    ),
];

/// Scrollable list of every shortcut
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::F(1) => return Ok(Some(Action::CloseModal)),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_offset += 1,
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1)
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup = centered_popup(area, HELP_WIDTH, HELP_HEIGHT);
        frame.render_widget(Clear, popup);

        let lines = help_lines();
        let visible = popup.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(GOLD))
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .scroll((self.scroll_offset as u16, 0)),
            popup,
        );

        if max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                popup.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut state,
            );
        }
        Ok(())
    }
}

fn heading(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default()
            .fg(GOLD)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn shortcut(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("   {:16}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description.to_string()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SHORTCUTS {
        lines.push(Line::from(""));
        lines.push(heading(title));
        lines.extend(keys.iter().map(|(key, description)| shortcut(key, description)));
    }

    lines.push(Line::from(""));
    lines.push(heading("Limits"));
    lines.push(shortcut("Title", &format!("{} characters", MAX_TITLE_LENGTH)));
    lines.push(shortcut("Text", &format!("{} characters", MAX_CONTENT_LENGTH)));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc, q or F1 to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_help_mentions_save_and_delete() {
        let text = plain(&help_lines());

        assert!(text.iter().any(|l| l.contains("Ctrl+s") && l.contains("Save")));
        assert!(text.iter().any(|l| l.contains("Ctrl+d") && l.contains("Delete")));
        assert!(text.iter().any(|l| l.contains("200 characters")));
    }

    #[test]
    fn test_scroll_is_clamped_on_draw() {
        let mut dialog = HelpDialog { scroll_offset: 500 };
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| dialog.draw(f, f.area()).unwrap()).unwrap();

        let visible = 20 - 2;
        assert_eq!(dialog.scroll_offset, help_lines().len() - visible);
    }

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::F(1)] {
            let key = KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            };
            assert_eq!(dialog.handle_key_event(key).unwrap(), Some(Action::CloseModal));
        }
    }
}
