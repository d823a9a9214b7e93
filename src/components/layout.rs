//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the open book screen
pub struct BookLayout {
    pub prev_nav: Rect,
    pub left_page: Rect,
    pub right_page: Rect,
    pub next_nav: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Areas inside the editable right page
pub struct PageLayout {
    pub title: Rect,
    pub date: Rect,
    pub content: Rect,
    pub footer: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Split the screen into the two-page spread with navigation gutters
pub fn book_layout(area: Rect) -> BookLayout {
    // Vertical: spread + status line + help bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(4),
        ])
        .split(rows[0]);

    BookLayout {
        prev_nav: columns[0],
        left_page: columns[1],
        right_page: columns[2],
        next_nav: columns[3],
        status: rows[1],
        help: rows[2],
    }
}

/// Split the inside of a page into header, body and footer
pub fn page_layout(inner: Rect) -> PageLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    PageLayout {
        title: rows[0],
        date: rows[1],
        content: rows[2],
        footer: rows[3],
    }
}

/// Whether the point (`column`, `row`) falls inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_popup(area, 40, 8);
        assert_eq!(popup, Rect::new(20, 8, 40, 8));

        let small = centered_popup(Rect::new(0, 0, 30, 5), 40, 8);
        assert_eq!(small.width, 30);
        assert_eq!(small.height, 5);
    }

    #[test]
    fn test_book_layout_splits_pages_evenly() {
        let layout = book_layout(Rect::new(0, 0, 108, 30));
        assert_eq!(layout.prev_nav.width, 4);
        assert_eq!(layout.next_nav.width, 4);
        assert_eq!(layout.left_page.width, layout.right_page.width);
        assert_eq!(layout.help.height, 3);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 4));
        assert!(!contains(area, 6, 4));
        assert!(!contains(area, 2, 5));
    }
}
