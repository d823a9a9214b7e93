//! Terminal User Interface management
//!
//! Raw mode, the alternate screen and mouse capture live here, along with
//! the event poll that doubles as the diary's clock tick.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    ops::{Deref, DerefMut},
    time::{Duration, Instant},
};

/// Terminal wrapper for managing the TUI lifecycle
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long to wait for input before the loop ticks
    pub tick_rate: Duration,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
        })
    }

    /// Set the tick rate for event polling
    ///
    /// Page turns and the cover animation only advance on ticks, so this
    /// bounds how late a transition can land.
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Enter the alternate screen and enable raw mode
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Leave the alternate screen and disable raw mode; also runs on Drop
    pub fn exit(&mut self) -> Result<()> {
        if !terminal::is_raw_mode_enabled()? {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;
        Ok(())
    }

    /// Poll for the next event, waiting at most `timeout`
    ///
    /// Returns `None` when nothing arrived in time. Key release and repeat
    /// events are dropped so each keystroke types once.
    pub fn next_event(&self, timeout: Duration) -> Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let event = event::read()?;
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
        }
        Ok(Some(event))
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

/// Schedules `Action::Tick` by elapsed time, so a steady stream of input
/// cannot hold the tick back
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    rate: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(rate: Duration, now: Instant) -> Self {
        Self { rate, last: now }
    }

    /// How long to wait for input before the next tick is due
    pub fn timeout(&self, now: Instant) -> Duration {
        self.rate.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Whether a tick is due; starts the next period when it is
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) < self.rate {
            return false;
        }
        self.last = now;
        true
    }
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
