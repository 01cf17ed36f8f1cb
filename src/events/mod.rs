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

//! Application events and the main event loop.
//!
//! Every input the application reacts to arrives as an [`AppEvent`] on a
//! single channel: key presses from the input thread, periodic ticks, parsed
//! commands from the command line, and results from the task worker. The
//! event loop applies each one to the [`App`] state and redraws.

mod handlers;
use handlers::*;

use std::{io::Stdout, path::PathBuf};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    commander::Command,
    components::ReviewTableAction,
    model::{AudioClip, band},
    render::{Status, draw},
    session::LoadToken,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    RunCommand(Command),

    TextTrackRead { token: LoadToken, path: PathBuf, content: String },
    AudioDirectoryScanned { token: LoadToken, dir: PathBuf, clips: Vec<AudioClip> },
    RatingsRead { token: LoadToken, path: PathBuf, text: String },
    RatingsWritten { path: PathBuf, rows: usize },

    Tick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        handle_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Applies a single event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::RunCommand(command) => handle_command(app, command)?,
        AppEvent::TextTrackRead { token, path, content } => handle_text_track_read(app, token, path, content),
        AppEvent::AudioDirectoryScanned { token, dir, clips } => handle_audio_directory_scanned(app, token, dir, clips),
        AppEvent::RatingsRead { token, path, text } => handle_ratings_read(app, token, path, text),
        AppEvent::RatingsWritten { path, rows } => handle_ratings_written(app, path, rows),
        AppEvent::Error(message) => handle_error(app, message),
        AppEvent::Tick | AppEvent::ExitApplication => handle_tick(app),
    }
    Ok(())
}

/// Routes a key press.
///
/// The command line takes every key while it is active. Otherwise global
/// keys are checked first, and the rest go to the review table.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx) {
        return Ok(());
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::RunCommand(Command::SaveRatings(None)))?;
        }

        _ => {
            let action = app.review_table.as_widget(&app.session).process_event(&event);
            if let Some(action) = action {
                apply_table_action(app, action);
            }
        }
    }

    Ok(())
}

fn apply_table_action(app: &mut App, action: ReviewTableAction) {
    let Some(row) = app.review_table.selected_row() else {
        return;
    };
    let dimension = app.review_table.dimension();

    match action {
        ReviewTableAction::SetRating(rating) => app.session.set_rating(dimension, row, rating),
        ReviewTableAction::StepRating(delta) => app.session.adjust_rating(dimension, row, delta),
    }

    let rating = app.session.rating(dimension, row);
    app.status = Some(Status::info(format!(
        "Line {} rated {} ({})",
        row + 1,
        rating,
        band::classify(rating).label()
    )));
}

#[cfg(test)]
mod tests {
    use std::{path::Path, sync::mpsc};

    use super::*;
    use crate::{
        config::AppConfig,
        model::{TrackKind, rating::Rating},
        session::LoadTarget,
        tasks::AppTask,
    };

    fn app() -> (App, mpsc::Receiver<AppTask>) {
        let (task_tx, task_rx) = mpsc::channel();
        let app = App::new(AppConfig::default(), task_tx, Some(PathBuf::from("out/ratings.txt")));
        (app, task_rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn load_english(app: &mut App, content: &str) {
        let token = app.session.begin_load(LoadTarget::Track(TrackKind::Text("en".into())));
        handle_event(
            app,
            AppEvent::TextTrackRead {
                token,
                path: PathBuf::from("en.txt"),
                content: content.to_string(),
            },
        )
        .unwrap();
    }

    #[test]
    fn digit_keys_rate_the_selected_row() {
        let (mut app, _task_rx) = app();
        load_english(&mut app, "one\ntwo\nthree");
        app.review_table.as_widget(&app.session).sync_selection();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Char('+'));

        assert_eq!(app.session.rating(0, 1), Rating::clamped(9));
        assert_eq!(app.session.rating(0, 0), Rating::UNRATED);
        assert_eq!(app.status, Some(Status::info("Line 2 rated 9 (excellent)")));
    }

    #[test]
    fn colon_opens_the_command_line_and_swallows_keys() {
        let (mut app, _task_rx) = app();
        load_english(&mut app, "one");
        app.review_table.as_widget(&app.session).sync_selection();

        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('5'));

        assert!(app.commander.active());
        assert_eq!(app.session.rating(0, 0), Rating::UNRATED);
    }

    #[test]
    fn q_requests_exit() {
        let (mut app, _task_rx) = app();
        press(&mut app, KeyCode::Char('q'));

        assert!(matches!(app.event_rx.try_recv(), Ok(AppEvent::ExitApplication)));
    }

    #[test]
    fn load_commands_queue_tasks_with_fresh_tokens() {
        let (mut app, task_rx) = app();

        handle_event(
            &mut app,
            AppEvent::RunCommand(Command::LoadText {
                language: "ja".into(),
                path: Some(PathBuf::from("ja.txt")),
            }),
        )
        .unwrap();

        match task_rx.try_recv() {
            Ok(AppTask::ReadTextTrack { token, path }) => {
                assert_eq!(path, Path::new("ja.txt"));
                assert!(app.session.is_current(&token));
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn load_without_a_path_does_nothing() {
        let (mut app, task_rx) = app();

        handle_event(&mut app, AppEvent::RunCommand(Command::LoadAudio(None))).unwrap();
        handle_event(&mut app, AppEvent::RunCommand(Command::LoadRatings(None))).unwrap();

        assert!(task_rx.try_recv().is_err());
        assert!(app.status.is_none());
    }

    #[test]
    fn unknown_language_is_reported() {
        let (mut app, task_rx) = app();

        handle_event(
            &mut app,
            AppEvent::RunCommand(Command::LoadText {
                language: "xx".into(),
                path: Some(PathBuf::from("xx.txt")),
            }),
        )
        .unwrap();

        assert!(task_rx.try_recv().is_err());
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn stale_text_read_is_ignored() {
        let (mut app, _task_rx) = app();
        let target = LoadTarget::Track(TrackKind::Text("en".into()));
        let stale = app.session.begin_load(target.clone());
        let current = app.session.begin_load(target);

        for (token, content) in [(current, "new"), (stale, "old\nold")] {
            handle_event(
                &mut app,
                AppEvent::TextTrackRead {
                    token,
                    path: PathBuf::from("en.txt"),
                    content: content.to_string(),
                },
            )
            .unwrap();
        }

        assert_eq!(app.session.tracks().text_track("en"), ["new"]);
    }

    #[test]
    fn save_encodes_ratings_to_the_default_path() {
        let (mut app, task_rx) = app();
        app.session.set_rating(0, 1, Rating::clamped(7));

        handle_event(&mut app, AppEvent::RunCommand(Command::SaveRatings(None))).unwrap();

        match task_rx.try_recv() {
            Ok(AppTask::WriteRatings { path, body }) => {
                assert_eq!(path, Path::new("out/ratings.txt"));
                assert_eq!(body, "0\n7");
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn rate_and_goto_commands_act_on_the_selection() {
        let (mut app, _task_rx) = app();
        load_english(&mut app, "a\nb\nc\nd");

        handle_event(&mut app, AppEvent::RunCommand(Command::Goto(2))).unwrap();
        handle_event(&mut app, AppEvent::RunCommand(Command::Rate(Rating::clamped(4)))).unwrap();

        assert_eq!(app.review_table.selected_row(), Some(2));
        assert_eq!(app.session.rating(0, 2), Rating::clamped(4));
    }

    #[test]
    fn worker_errors_become_error_status() {
        let (mut app, _task_rx) = app();
        handle_event(&mut app, AppEvent::Error("Failed to read 'x'".into())).unwrap();

        assert_eq!(app.status, Some(Status::error("Failed to read 'x'")));
    }
}
