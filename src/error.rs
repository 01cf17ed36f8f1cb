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

//! File access errors.
//!
//! Every failure here leaves the session untouched; the application reports
//! it on the status line and carries on.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("Failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to list audio directory '{path}': {source}")]
    ListDirectory {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Not a directory: '{0}'")]
    NotADirectory(PathBuf),
}
