// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Subtitle rating TUI.
//!
//! A terminal tool for reviewing subtitle lines in several languages against
//! a batch of audio clips, rating each line and saving the ratings to a plain
//! text file.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, the review session
//!   and UI rendering.
//! * A **Task Worker** reads and writes files so the UI never blocks on the
//!   filesystem.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and the worker is handled via `std::sync::mpsc` channels.

mod cli;
mod codec;
mod commander;
mod components;
mod config;
mod error;
mod events;
mod logging;
mod model;
mod render;
mod session;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::info;

use crate::{
    cli::Args,
    commander::{Command, Commander},
    components::ReviewTableState,
    config::AppConfig,
    events::{AppEvent, process_events},
    render::Status,
    session::ReviewSession,
    tasks::AppTask,
    theme::Theme,
};

const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub session: ReviewSession,
    pub review_table: ReviewTableState,
    pub commander: Commander,

    pub status: Option<Status>,

    /// Where `save` writes when given no path.
    pub save_path: PathBuf,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>, save_path: Option<PathBuf>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let session = ReviewSession::new(config.languages.clone(), config.rating_mode, config.import_format);
        let save_path = save_path.unwrap_or_else(|| config.ratings_path());

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            session,
            review_table: ReviewTableState::new(),
            commander: Commander::new(),
            status: None,
            save_path,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load_config();

    let _log_guard = logging::init_tracing(&config.log_level, config::config_dir().as_deref());
    info!(languages = config.languages.len(), mode = ?config.rating_mode, "Starting");

    let (task_tx, task_rx) = mpsc::channel();

    let save_path = args.save_to.clone();
    let mut app = App::new(config, task_tx, save_path);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx, args);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`]. It is best-effort
/// and does not return a result, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process file reads and writes.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// Files named on the command line are then queued as load commands, and
/// control passes to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
    args: Args,
) -> Result<()> {
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    // Translate raw key presses to application events. A resize only needs a
    // redraw, which a tick triggers.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(event::Event::Resize(..)) => AppEvent::Tick,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx_keys.send(event).is_err() {
                break;
            }
        }
    });

    // Periodic tick, effectively the minimum frame rate of the UI.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    for command in startup_commands(args) {
        app.event_tx.send(AppEvent::RunCommand(command))?;
    }

    process_events(terminal, app)
}

/// Converts the files named on the command line into load commands.
fn startup_commands(args: Args) -> Vec<Command> {
    let mut commands: Vec<Command> = args
        .texts
        .into_iter()
        .map(|(language, path)| Command::LoadText {
            language,
            path: Some(path),
        })
        .collect();

    if let Some(dir) = args.audio {
        commands.push(Command::LoadAudio(Some(dir)));
    }

    if let Some(path) = args.ratings {
        commands.push(Command::LoadRatings(Some(path)));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_loads_texts_then_audio_then_ratings() {
        let args = Args::try_parse_from(["subrate", "--ratings", "r.txt", "--text", "en=en.txt", "--audio", "clips"]).unwrap();

        assert_eq!(
            startup_commands(args),
            vec![
                Command::LoadText {
                    language: "en".into(),
                    path: Some(PathBuf::from("en.txt")),
                },
                Command::LoadAudio(Some(PathBuf::from("clips"))),
                Command::LoadRatings(Some(PathBuf::from("r.txt"))),
            ]
        );
    }

    #[test]
    fn save_path_defaults_to_the_configured_ratings_file() {
        let (task_tx, _task_rx) = mpsc::channel();
        let app = App::new(AppConfig::default(), task_tx, None);

        assert_eq!(app.save_path, PathBuf::from("ratings.txt"));
    }
}
