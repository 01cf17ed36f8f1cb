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

//! Domain models and core data structures.
//!
//! This module defines the central entities of a review session: the
//! languages being reviewed, the kinds of track that can be loaded, the audio
//! clip references, and the ratings attached to each line.
//!
//! # Organization
//!
//! * [`track`]: The track store, holding every independently loaded track.
//! * [`rating`]: Range-checked ratings and the per-dimension rating store.
//! * [`band`]: Classification of ratings into review bands.
//! * [`alignment`]: Ordinal alignment of tracks and ratings into rows.

pub(crate) mod alignment;
pub(crate) mod band;
pub(crate) mod rating;
pub(crate) mod track;

use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// A subtitle language, identified by a short code such as `en`.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub(crate) struct Language {
    pub(crate) code: String,
    pub(crate) label: String,
}

impl Language {
    pub(crate) fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// The kind of a loaded track.
///
/// There is exactly one audio track and one text track per configured
/// language.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) enum TrackKind {
    Audio,
    Text(String),
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Text(code) => write!(f, "text:{}", code),
        }
    }
}

/// An opaque reference to an audio clip on disk.
///
/// The clip content is never decoded, only ordered by name and displayed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct AudioClip {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
}

impl AudioClip {
    pub(crate) fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}
