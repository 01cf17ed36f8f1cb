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

//! Ordinal alignment of tracks and ratings.
//!
//! Tracks are loaded at different times from unrelated sources and share no
//! key, so lines are matched purely by position: row `i` is the `i`-th item
//! of every track. Alignment is computed on every read and never cached, so
//! it always reflects the latest loads and edits.
//!
//! The row count is the longest of every loaded track and every rating
//! sequence. Tracks shorter than that project an explicit [`Cell::Absent`]
//! instead of failing.

use crate::model::{
    AudioClip, TrackKind,
    rating::RatingStore,
    track::{TrackStore, TrackView},
};

/// One field of a projected row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Cell<'a> {
    Clip(&'a AudioClip),
    Text(&'a str),
    Absent,
}

impl Cell<'_> {
    pub(crate) fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }
}

/// The fields of a single row, one per known track kind, in kind order.
#[derive(Debug)]
pub(crate) struct RowProjection<'a> {
    pub(crate) index: usize,
    pub(crate) cells: Vec<(TrackKind, Cell<'a>)>,
}

impl<'a> RowProjection<'a> {
    pub(crate) fn cell(&self, kind: &TrackKind) -> Cell<'a> {
        self.cells
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, cell)| *cell)
            .unwrap_or(Cell::Absent)
    }
}

/// Number of rows spanned by all loaded tracks and rating sequences.
pub(crate) fn unified_row_count(tracks: &TrackStore, ratings: &RatingStore) -> usize {
    tracks.longest_track().max(ratings.longest_sequence())
}

/// Projects row `index` across every kind in `kinds`.
///
/// Total over every index: a track shorter than `index + 1` yields
/// [`Cell::Absent`] for its field regardless of the other tracks.
pub(crate) fn project_row<'a>(
    tracks: &'a TrackStore,
    kinds: &[TrackKind],
    index: usize,
) -> RowProjection<'a> {
    let cells = kinds
        .iter()
        .map(|kind| {
            let cell = match tracks.track(kind) {
                TrackView::Audio(clips) => clips.get(index).map_or(Cell::Absent, Cell::Clip),
                TrackView::Text(lines) => lines
                    .get(index)
                    .map_or(Cell::Absent, |line| Cell::Text(line.as_str())),
            };
            (kind.clone(), cell)
        })
        .collect();

    RowProjection { index, cells }
}
