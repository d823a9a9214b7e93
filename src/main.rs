//! pawprints - a book-like diary for the terminal
//!
//! Entry point: parses the command line, sets up file logging, and runs
//! the Component event loop.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::{Ticker, Tui};
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// A diary that reads like a book
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// File holding the diary entries
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,

    /// File to write logs to
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `pawprints=trace` (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write the effective configuration to ~/.pawprints/config.json and exit
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(path) = self.data_file {
            config.storage_path = Some(path);
        }
        if let Some(path) = self.log_file {
            config.log_path = Some(path);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = config.effective_log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!(path = %log_path.display(), "Logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let init_config = cli.init_config;

    let mut config = Config::load();
    cli.apply(&mut config);

    if init_config {
        config.save()?;
        if let Some(dir) = Config::config_dir() {
            println!("Wrote {}", dir.join("config.json").display());
        }
        return Ok(());
    }

    init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting pawprints");

    let mut app = App::new(&config);
    app.init()?;

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!(error = %format!("{:#}", err), "Exited with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("Goodbye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    let mut ticker = Ticker::new(tui.tick_rate, Instant::now());

    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "Draw failed");
            }
        })?;

        if let Some(event) = tui.next_event(ticker.timeout(Instant::now()))? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }

        if ticker.is_due(Instant::now()) {
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
