//! Open book component
//!
//! Renders the two-page spread: the left page shows the portrait or the
//! previous entry read-only, the right page holds the editable draft.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{book_layout, contains, page_layout};
use crate::model::entry::format_page_date;
use crate::model::{DiaryEntry, DraftField, EntryId, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PAPER: Color = Color::Rgb(250, 243, 224);
const INK: Color = Color::Rgb(60, 45, 35);
const FADED: Color = Color::Rgb(150, 135, 120);

/// Event handling for the open book
#[derive(Default)]
pub struct BookComponent {
    /// Entry the draft is bound to, kept in sync by App
    pub editing: Option<EntryId>,
    prev_area: Rect,
    next_area: Rect,
}

impl BookComponent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for BookComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Some(Action::ForceQuit),
            KeyCode::Char('s') if ctrl => Some(Action::SaveEntry),
            KeyCode::Char('d') if ctrl => self.editing.map(Action::DeleteEntry),
            KeyCode::Char('n') if ctrl => Some(Action::NextPage),
            KeyCode::Char('p') if ctrl => Some(Action::PrevPage),
            KeyCode::Char(_) if ctrl => None,

            KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Esc => Some(Action::CloseBook),
            KeyCode::F(1) => Some(Action::OpenHelp),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleField),

            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Input('\n')),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if contains(self.prev_area, mouse.column, mouse.row) {
                return Ok(Some(Action::PrevPage));
            }
            if contains(self.next_area, mouse.column, mouse.row) {
                return Ok(Some(Action::NextPage));
            }
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the diary; see draw_book_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything the spread needs from the diary
pub struct BookRenderContext<'a> {
    pub page: usize,
    pub page_total: usize,
    pub turning: bool,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    /// Entry shown on the left page; `None` draws the portrait
    pub left_entry: Option<&'a DiaryEntry>,
    pub title: &'a str,
    pub content: &'a str,
    pub focus: DraftField,
    pub draft_date: NaiveDate,
    pub editing: Option<EntryId>,
    pub unsaved: bool,
    pub status_message: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Draw the open book
pub fn draw_book_screen(
    frame: &mut Frame,
    area: Rect,
    book: &mut BookComponent,
    ctx: &BookRenderContext,
) -> Result<()> {
    let layout = book_layout(area);
    book.prev_area = layout.prev_nav;
    book.next_area = layout.next_nav;

    render_nav(frame, layout.prev_nav, "←", ctx.can_go_prev);
    render_nav(frame, layout.next_nav, "→", ctx.can_go_next);

    match ctx.left_entry {
        Some(entry) => render_left_entry(frame, layout.left_page, entry, ctx.turning),
        None => render_portrait(frame, layout.left_page, ctx.turning),
    }
    render_draft_page(frame, layout.right_page, ctx);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, ctx);
    Ok(())
}

fn page_block(turning: bool) -> Block<'static> {
    let border = if turning { FADED } else { INK };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(PAPER).fg(INK))
}

fn render_nav(frame: &mut Frame, area: Rect, arrow: &str, enabled: bool) {
    let text = if enabled { arrow } else { " " };
    let mid = area.height / 2;
    let mut lines = vec![Line::from(""); mid as usize];
    lines.push(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_portrait(frame: &mut Frame, area: Rect, turning: bool) {
    let portrait = [
        "  /\\_/\\    ",
        " ( o.o )   ",
        "  > ^ <    ",
        " /     \\   ",
        "(_|   |_)  ",
    ];

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Charlie's Diary",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(portrait.iter().map(|l| Line::from(*l)));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(page_block(turning));
    frame.render_widget(paragraph, area);
}

fn render_left_entry(frame: &mut Frame, area: Rect, entry: &DiaryEntry, turning: bool) {
    let heading = if entry.title.is_empty() {
        "Diary"
    } else {
        entry.title.as_str()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            heading.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("─".repeat(heading.width())),
        Line::from(Span::styled(
            entry.formatted_date(),
            Style::default().fg(FADED),
        )),
        Line::from(""),
    ];
    lines.extend(entry.content.lines().map(|l| {
        Line::from(Span::styled(
            l.to_string(),
            Style::default().fg(FADED).add_modifier(Modifier::ITALIC),
        ))
    }));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(page_block(turning));
    frame.render_widget(paragraph, area);
}

fn render_draft_page(frame: &mut Frame, area: Rect, ctx: &BookRenderContext) {
    let block = page_block(ctx.turning);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let page = page_layout(inner);
    let focused = Style::default().fg(INK).add_modifier(Modifier::BOLD);
    let unfocused = Style::default().fg(FADED);

    // Title field
    let title_focused = ctx.focus == DraftField::Title;
    let title_text = if ctx.title.is_empty() && !title_focused {
        Span::styled("Title...", unfocused.add_modifier(Modifier::ITALIC))
    } else {
        let cursor = if title_focused { "_" } else { "" };
        Span::styled(format!("{}{}", ctx.title, cursor), focused)
    };
    let title = Paragraph::new(Line::from(title_text)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(if title_focused { focused } else { unfocused })
            .title_bottom(
                Line::from(format!(" {}/{} ", ctx.title.chars().count(), MAX_TITLE_LENGTH))
                    .alignment(Alignment::Right),
            ),
    );
    frame.render_widget(title, page.title);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format_page_date(ctx.draft_date),
            Style::default().fg(FADED),
        ))),
        page.date,
    );

    // Content field
    let content_focused = ctx.focus == DraftField::Content;
    let content = if ctx.content.is_empty() && !content_focused {
        Paragraph::new(Line::from(Span::styled(
            "Write a memory for Charlie...",
            unfocused.add_modifier(Modifier::ITALIC),
        )))
    } else {
        let cursor = if content_focused { "_" } else { "" };
        let text = format!("{}{}", ctx.content, cursor);
        let style = if content_focused {
            Style::default().fg(INK)
        } else {
            unfocused
        };
        Paragraph::new(
            text.split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), style)))
                .collect::<Vec<_>>(),
        )
        .wrap(Wrap { trim: false })
    };
    frame.render_widget(content, page.content);

    // Footer: counter, actions, page number
    let save_label = if ctx.editing.is_some() {
        "Update page"
    } else {
        "Save"
    };
    let mut actions = vec![
        Span::styled(
            format!("{}/{}", ctx.content.chars().count(), MAX_CONTENT_LENGTH),
            Style::default().fg(FADED),
        ),
        Span::raw("   "),
        Span::styled(
            " ^S ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(save_label),
    ];
    if ctx.editing.is_some() {
        actions.push(Span::raw("  "));
        actions.push(Span::styled(
            " ^D ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        actions.push(Span::raw("Delete"));
    }
    if ctx.unsaved {
        actions.push(Span::styled("  ●", Style::default().fg(Color::Yellow)));
    }

    let footer = vec![
        Line::from(actions),
        Line::from(Span::styled(
            format!("Page {} of {}", ctx.page + 1, ctx.page_total),
            Style::default().fg(FADED),
        ))
        .alignment(Alignment::Right),
    ];
    frame.render_widget(Paragraph::new(footer), page.footer);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &BookRenderContext) {
    let line = if let Some(error) = ctx.error {
        Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::White).bg(Color::Red),
        ))
    } else if let Some(message) = ctx.status_message {
        Line::from(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &BookRenderContext) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Esc ", key_style),
        Span::raw("Close "),
        Span::styled(" Tab ", key_style),
        Span::raw("Title/Content "),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::raw("Turn page "),
        Span::styled(" ^S ", key_style),
        Span::raw("Save "),
    ];
    if ctx.editing.is_some() {
        spans.push(Span::styled(" ^D ", key_style));
        spans.push(Span::raw("Delete "));
    }
    spans.push(Span::styled(" F1 ", key_style));
    spans.push(Span::raw("Help"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
