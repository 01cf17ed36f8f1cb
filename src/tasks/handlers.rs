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

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{
    events::AppEvent,
    session::LoadToken,
    tasks::{TaskContext, files},
};

pub(super) fn read_text_track(ctx: &TaskContext, token: LoadToken, path: PathBuf) -> Result<()> {
    let content = files::read_text(&path)?;
    ctx.event_tx.send(AppEvent::TextTrackRead { token, path, content })?;

    Ok(())
}

pub(super) fn scan_audio_directory(ctx: &TaskContext, token: LoadToken, dir: PathBuf) -> Result<()> {
    let clips = files::list_audio_clips(&dir, ctx.audio_extensions)?;
    ctx.event_tx.send(AppEvent::AudioDirectoryScanned { token, dir, clips })?;

    Ok(())
}

pub(super) fn read_ratings(ctx: &TaskContext, token: LoadToken, path: PathBuf) -> Result<()> {
    let text = files::read_text(&path)?;
    ctx.event_tx.send(AppEvent::RatingsRead { token, path, text })?;

    Ok(())
}

pub(super) fn write_ratings(ctx: &TaskContext, path: PathBuf, body: String) -> Result<()> {
    files::write_atomic(&path, &body)?;

    let rows = if body.is_empty() { 0 } else { body.split('\n').count() };
    info!(path = %path.display(), rows, "Ratings saved");

    ctx.event_tx.send(AppEvent::RatingsWritten { path, rows })?;

    Ok(())
}
