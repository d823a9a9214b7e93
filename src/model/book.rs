//! Book navigator - open/close state, page index and page-turn timing
//!
//! Page 0 is the portrait page, pages `1..=N` show entries `0..N`, and page
//! `N + 1` is the blank page for a new entry. Opening the book and turning a
//! page are deferred transitions: they are scheduled with a due time and
//! committed by `poll` once the clock passes it. Pending transitions can be
//! cancelled, and new navigation is refused while one is in flight.

use chrono::{Duration, NaiveDateTime};

/// A value that becomes available once its due time has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    due: NaiveDateTime,
    value: T,
}

impl<T> Deferred<T> {
    /// A delay too long to represent is due never
    pub fn new(now: NaiveDateTime, delay: Duration, value: T) -> Self {
        Self {
            due: now.checked_add_signed(delay).unwrap_or(NaiveDateTime::MAX),
            value,
        }
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        now >= self.due
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Whether the book is shut, opening, or open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookState {
    Closed,
    Opening(Deferred<()>),
    Open,
}

/// A transition committed by `Book::poll`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookEvent {
    /// The opening delay elapsed; the book is now open
    Opened,
    /// A page turn finished on this page index
    Turned(usize),
}

/// Navigator state for the book
#[derive(Debug, Clone)]
pub struct Book {
    state: BookState,
    page: usize,
    turn: Option<Deferred<usize>>,
    open_delay: Duration,
    turn_delay: Duration,
}

impl Book {
    pub fn new(open_delay: Duration, turn_delay: Duration) -> Self {
        Self {
            state: BookState::Closed,
            page: 0,
            turn: None,
            open_delay,
            turn_delay,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == BookState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == BookState::Closed
    }

    pub fn is_opening(&self) -> bool {
        matches!(self.state, BookState::Opening(_))
    }

    /// A page turn is in flight
    pub fn is_turning(&self) -> bool {
        self.turn.is_some()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Highest reachable page for `entry_count` entries (the new-entry page)
    pub fn last_page(entry_count: usize) -> usize {
        entry_count + 1
    }

    /// Total shown in the page counter
    pub fn page_total(&self, entry_count: usize) -> usize {
        (entry_count + 1).max(self.page + 1)
    }

    /// Start opening a closed book
    pub fn open(&mut self, now: NaiveDateTime) -> bool {
        if !self.is_closed() {
            return false;
        }
        self.state = BookState::Opening(Deferred::new(now, self.open_delay, ()));
        true
    }

    /// Shut the book, cancelling any pending transition
    pub fn close(&mut self) {
        self.state = BookState::Closed;
        self.turn = None;
    }

    pub fn can_go_next(&self, entry_count: usize) -> bool {
        self.is_open() && !self.is_turning() && self.page < Self::last_page(entry_count)
    }

    pub fn can_go_prev(&self) -> bool {
        self.is_open() && !self.is_turning() && self.page > 0
    }

    /// Schedule a turn to the next page
    pub fn next(&mut self, now: NaiveDateTime, entry_count: usize) -> bool {
        if !self.can_go_next(entry_count) {
            return false;
        }
        self.turn = Some(Deferred::new(now, self.turn_delay, self.page + 1));
        true
    }

    /// Schedule a turn to the previous page
    pub fn prev(&mut self, now: NaiveDateTime) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.turn = Some(Deferred::new(now, self.turn_delay, self.page - 1));
        true
    }

    /// Commit whichever deferred transition is due
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<BookEvent> {
        if let BookState::Opening(pending) = &self.state {
            if pending.is_due(now) {
                self.state = BookState::Open;
                return Some(BookEvent::Opened);
            }
            return None;
        }

        if self.turn.as_ref().is_some_and(|t| t.is_due(now)) {
            let page = self.turn.take().map(Deferred::into_value)?;
            self.page = page;
            return Some(BookEvent::Turned(page));
        }

        None
    }

    /// Drop a pending page turn without committing it
    pub fn cancel_turn(&mut self) {
        self.turn = None;
    }

    /// Pull the page index back into range after the entry list shrank
    pub fn clamp(&mut self, entry_count: usize) {
        if entry_count == 0 {
            self.page = 0;
        } else if self.page > entry_count {
            self.page = entry_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    fn open_book() -> Book {
        let mut book = Book::new(ms(1000), ms(300));
        book.open(t0());
        book.poll(t0() + ms(1000));
        book
    }

    #[test]
    fn test_opening_waits_for_delay() {
        let mut book = Book::new(ms(1000), ms(300));
        assert!(book.open(t0()));
        assert!(book.is_opening());

        assert_eq!(book.poll(t0() + ms(999)), None);
        assert_eq!(book.poll(t0() + ms(1000)), Some(BookEvent::Opened));
        assert!(book.is_open());
        assert!(!book.open(t0()));
    }

    #[test]
    fn test_turn_commits_after_delay() {
        let mut book = open_book();
        let now = t0() + ms(2000);

        assert!(book.next(now, 3));
        assert!(book.is_turning());
        assert_eq!(book.page(), 0);

        assert_eq!(book.poll(now + ms(100)), None);
        assert_eq!(book.poll(now + ms(300)), Some(BookEvent::Turned(1)));
        assert_eq!(book.page(), 1);
        assert!(!book.is_turning());
    }

    #[test]
    fn test_navigation_refused_while_turning() {
        let mut book = open_book();
        let now = t0() + ms(2000);

        assert!(book.next(now, 3));
        assert!(!book.next(now, 3));
        assert!(!book.prev(now));

        book.poll(now + ms(300));
        assert_eq!(book.page(), 1);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut book = open_book();
        assert!(!book.can_go_prev());

        book.set_page(Book::last_page(2));
        assert!(!book.can_go_next(2));
        assert!(book.can_go_prev());
    }

    #[test]
    fn test_close_cancels_pending_turn() {
        let mut book = open_book();
        let now = t0() + ms(2000);
        book.next(now, 3);

        book.close();
        assert!(book.is_closed());
        assert_eq!(book.poll(now + ms(1000)), None);
        assert_eq!(book.page(), 0);
    }

    #[test]
    fn test_close_cancels_opening() {
        let mut book = Book::new(ms(1000), ms(300));
        book.open(t0());
        book.close();

        assert_eq!(book.poll(t0() + ms(5000)), None);
        assert!(book.is_closed());
    }

    #[test]
    fn test_clamp() {
        let mut book = open_book();
        book.set_page(4);
        book.clamp(2);
        assert_eq!(book.page(), 2);

        book.clamp(0);
        assert_eq!(book.page(), 0);

        book.set_page(1);
        book.clamp(3);
        assert_eq!(book.page(), 1);
    }

    #[test]
    fn test_page_total() {
        let mut book = open_book();
        assert_eq!(book.page_total(3), 4);
        book.set_page(4);
        assert_eq!(book.page_total(3), 5);
    }
}
