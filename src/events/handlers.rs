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

//! Handlers for commands and background task results.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    App,
    commander::Command,
    components::ReviewTableAction,
    events::{AppEvent, apply_table_action},
    model::{AudioClip, TrackKind},
    render::Status,
    session::{LoadTarget, LoadToken},
    tasks::AppTask,
};

pub(super) fn handle_command(app: &mut App, command: Command) -> Result<()> {
    debug!(?command, "Running command");

    match command {
        Command::LoadText { language, path } => {
            let Some(label) = app.session.language(&language).map(|l| l.label.clone()) else {
                app.status = Some(Status::error(format!("Unknown language '{}'", language)));
                return Ok(());
            };
            let Some(path) = path else {
                return Ok(());
            };
            let token = app.session.begin_load(LoadTarget::Track(TrackKind::Text(language)));
            app.status = Some(Status::info(format!("Loading {} from {}", label, path.display())));
            app.task_tx.send(AppTask::ReadTextTrack { token, path })?;
        }

        Command::LoadAudio(Some(dir)) => {
            let token = app.session.begin_load(LoadTarget::Track(TrackKind::Audio));
            app.status = Some(Status::info(format!("Scanning {}", dir.display())));
            app.task_tx.send(AppTask::ScanAudioDirectory { token, dir })?;
        }

        Command::LoadRatings(Some(path)) => {
            let token = app.session.begin_load(LoadTarget::Ratings);
            app.status = Some(Status::info(format!("Loading ratings from {}", path.display())));
            app.task_tx.send(AppTask::ReadRatings { token, path })?;
        }

        Command::LoadAudio(None) | Command::LoadRatings(None) => {}

        Command::SaveRatings(path) => {
            let path = path.unwrap_or_else(|| app.save_path.clone());
            let body = app.session.encode_ratings();
            app.task_tx.send(AppTask::WriteRatings { path, body })?;
        }

        Command::ClearRatings => {
            app.session.clear_ratings();
            app.status = Some(Status::info("Ratings cleared"));
        }

        Command::Rate(rating) => {
            if app.review_table.selected_row().is_some() {
                apply_table_action(app, ReviewTableAction::SetRating(rating));
            } else {
                app.status = Some(Status::error("No line selected"));
            }
        }

        Command::Goto(row) => app.review_table.as_widget(&app.session).goto(row),

        Command::Quit => app.event_tx.send(AppEvent::ExitApplication)?,
    }

    Ok(())
}

pub(super) fn handle_text_track_read(app: &mut App, token: LoadToken, path: PathBuf, content: String) {
    if !app.session.complete_text_load(&token, &content) {
        return;
    }

    if let LoadTarget::Track(TrackKind::Text(code)) = token.target() {
        let label = app.session.language(code).map_or(code.as_str(), |l| l.label.as_str());
        let lines = app.session.tracks().text_track(code).len();
        app.status = Some(Status::info(format!("Loaded {} {} lines from {}", lines, label, path.display())));
    }
}

pub(super) fn handle_audio_directory_scanned(app: &mut App, token: LoadToken, dir: PathBuf, clips: Vec<AudioClip>) {
    let count = clips.len();
    if app.session.complete_audio_load(&token, clips) {
        app.status = Some(Status::info(format!("Loaded {} audio clips from {}", count, dir.display())));
    }
}

pub(super) fn handle_ratings_read(app: &mut App, token: LoadToken, path: PathBuf, text: String) {
    if app.session.complete_ratings_load(&token, &text) {
        app.status = Some(Status::info(format!("Loaded ratings from {}", path.display())));
    }
}

pub(super) fn handle_ratings_written(app: &mut App, path: PathBuf, rows: usize) {
    app.status = Some(Status::info(format!("Saved {} ratings to {}", rows, path.display())));
}

pub(super) fn handle_error(app: &mut App, message: String) {
    info!(%message, "Reporting error");
    app.status = Some(Status::error(message));
}

pub(super) fn handle_tick(_app: &mut App) {}
