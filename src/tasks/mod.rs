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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to keep file access off
//! the main UI thread. It provides a dedicated worker loop that translates
//! [`AppTask`] requests into filesystem operations and broadcasts the results
//! back to the application via [`AppEvent`]s.
//!
//! Reads carry the [`LoadToken`] they were requested with and echo it back
//! with the result, so the session can tell a current completion from a
//! superseded one. The worker never touches the session itself.

mod files;
mod handlers;

use anyhow::Result;
use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};
use tracing::{debug, warn};

use crate::{config::AppConfig, events::AppEvent, session::LoadToken};

#[derive(Debug)]
pub(crate) enum AppTask {
    ReadTextTrack { token: LoadToken, path: PathBuf },
    ScanAudioDirectory { token: LoadToken, dir: PathBuf },
    ReadRatings { token: LoadToken, path: PathBuf },
    WriteRatings { path: PathBuf, body: String },
}

/// Spawns a background thread to process application tasks.
///
/// The worker enters a blocking loop, listening for incoming [`AppTask`]s
/// until the sending side of the channel is dropped.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(config: &AppConfig, task_rx: Receiver<AppTask>, event_tx: Sender<AppEvent>) {
    let audio_extensions = config.audio_extensions.clone();

    thread::spawn(move || {
        let ctx = TaskContext {
            audio_extensions: &audio_extensions,
            event_tx: &event_tx,
        };

        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &ctx) {
                warn!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }

        debug!("Task worker finished");
    });
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    audio_extensions: &'a [String],
    event_tx: &'a Sender<AppEvent>,
}

/// Orchestrates the execution of a single task.
///
/// This function implements the logic for each task and sends the result back
/// through the application event channel.
fn handle_task(task: AppTask, ctx: &TaskContext) -> Result<()> {
    debug!(?task, "Handling task");

    match task {
        AppTask::ReadTextTrack { token, path } => handlers::read_text_track(ctx, token, path),
        AppTask::ScanAudioDirectory { token, dir } => handlers::scan_audio_directory(ctx, token, dir),
        AppTask::ReadRatings { token, path } => handlers::read_ratings(ctx, token, path),
        AppTask::WriteRatings { path, body } => handlers::write_ratings(ctx, path, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, sync::mpsc};

    use tempfile::tempdir;

    use crate::{
        model::TrackKind,
        session::{LoadTarget, ReviewSession},
    };

    fn token(target: LoadTarget) -> LoadToken {
        let mut session = ReviewSession::new(vec![], Default::default(), Default::default());
        session.begin_load(target)
    }

    fn run(task: AppTask) -> (Result<()>, Vec<AppEvent>) {
        let (event_tx, event_rx) = mpsc::channel();
        let extensions = vec!["wav".to_string()];
        let ctx = TaskContext {
            audio_extensions: &extensions,
            event_tx: &event_tx,
        };

        let result = handle_task(task, &ctx);
        drop(event_tx);

        (result, event_rx.iter().collect())
    }

    #[test]
    fn text_read_echoes_token_and_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.txt");
        fs::write(&path, "a\nb").unwrap();

        let sent = token(LoadTarget::Track(TrackKind::Text("en".into())));
        let (result, events) = run(AppTask::ReadTextTrack {
            token: sent.clone(),
            path: path.clone(),
        });

        assert!(result.is_ok());
        match events.as_slice() {
            [AppEvent::TextTrackRead { token, path: read, content }] => {
                assert_eq!(token, &sent);
                assert_eq!(read, &path);
                assert_eq!(content, "a\nb");
            }
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn failed_read_sends_no_completion() {
        let dir = tempdir().unwrap();

        let (result, events) = run(AppTask::ReadRatings {
            token: token(LoadTarget::Ratings),
            path: dir.path().join("missing.txt"),
        });

        assert!(result.is_err());
        assert!(events.is_empty());
    }

    #[test]
    fn audio_scan_reports_clips() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("2.wav"), b"").unwrap();
        fs::write(dir.path().join("1.wav"), b"").unwrap();

        let (result, events) = run(AppTask::ScanAudioDirectory {
            token: token(LoadTarget::Track(TrackKind::Audio)),
            dir: dir.path().to_path_buf(),
        });

        assert!(result.is_ok());
        match events.as_slice() {
            [AppEvent::AudioDirectoryScanned { clips, .. }] => assert_eq!(clips.len(), 2),
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn write_reports_saved_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.txt");

        let (result, events) = run(AppTask::WriteRatings {
            path: path.clone(),
            body: "1\n2\n3".to_string(),
        });

        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n3");
        assert!(matches!(events.as_slice(), [AppEvent::RatingsWritten { .. }]));
    }
}
