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

//! Review session state.
//!
//! A [`ReviewSession`] owns everything a review works on: the loaded tracks,
//! the ratings, and the bookkeeping that keeps asynchronous loads honest.
//!
//! # Loads
//!
//! Files are read on the task worker, so a load is split in two: the caller
//! asks for a [`LoadToken`] with [`ReviewSession::begin_load`] when the read
//! is requested, and hands it back with the content when the read completes.
//! Each new request for the same target supersedes the previous one; a
//! completion carrying a superseded token is discarded, so a slow stale read
//! can never overwrite a newer load. Until a completion is applied the
//! session keeps its prior state.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    codec::{self, ImportFormat},
    model::{
        AudioClip, Language, TrackKind,
        alignment::{self, RowProjection},
        band::{self, Band},
        rating::{Rating, RatingDimension, RatingMode, RatingStore},
        track::TrackStore,
    },
};

/// What a load replaces.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) enum LoadTarget {
    Track(TrackKind),
    Ratings,
}

/// Identifies one requested load of a target.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct LoadToken {
    target: LoadTarget,
    generation: u64,
}

impl LoadToken {
    pub(crate) fn target(&self) -> &LoadTarget {
        &self.target
    }
}

pub(crate) struct ReviewSession {
    languages: Vec<Language>,
    kinds: Vec<TrackKind>,
    dimensions: Vec<RatingDimension>,
    import_format: ImportFormat,

    tracks: TrackStore,
    ratings: RatingStore,

    generations: HashMap<LoadTarget, u64>,
}

impl ReviewSession {
    pub(crate) fn new(languages: Vec<Language>, mode: RatingMode, import_format: ImportFormat) -> Self {
        let kinds = std::iter::once(TrackKind::Audio)
            .chain(languages.iter().map(|l| TrackKind::Text(l.code.clone())))
            .collect();
        let dimensions = mode.dimensions(&languages);

        Self {
            ratings: RatingStore::new(dimensions.clone()),
            languages,
            kinds,
            dimensions,
            import_format,
            tracks: TrackStore::new(),
            generations: HashMap::new(),
        }
    }

    pub(crate) fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub(crate) fn language(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// Every known track kind: audio first, then languages in order.
    pub(crate) fn kinds(&self) -> &[TrackKind] {
        &self.kinds
    }

    pub(crate) fn tracks(&self) -> &TrackStore {
        &self.tracks
    }

    pub(crate) fn ratings(&self) -> &RatingStore {
        &self.ratings
    }

    /// Starts a load of `target`, superseding any load still in flight.
    pub(crate) fn begin_load(&mut self, target: LoadTarget) -> LoadToken {
        let generation = self.generations.entry(target.clone()).or_insert(0);
        *generation += 1;

        debug!(load = ?target, generation = *generation, "Load requested");

        LoadToken {
            target,
            generation: *generation,
        }
    }

    pub(crate) fn is_current(&self, token: &LoadToken) -> bool {
        self.generations.get(&token.target) == Some(&token.generation)
    }

    /// Applies a completed text track read, returning whether it was applied.
    pub(crate) fn complete_text_load(&mut self, token: &LoadToken, content: &str) -> bool {
        let LoadTarget::Track(TrackKind::Text(language)) = &token.target else {
            debug!(?token, "Text content delivered for a non-text load");
            return false;
        };
        if !self.accept(token) {
            return false;
        }

        self.tracks.load_text_track(language, content);
        info!(language = language.as_str(), rows = self.row_count(), "Text track loaded");

        true
    }

    /// Applies a completed audio directory scan, returning whether it was
    /// applied.
    pub(crate) fn complete_audio_load(&mut self, token: &LoadToken, clips: Vec<AudioClip>) -> bool {
        if token.target != LoadTarget::Track(TrackKind::Audio) || !self.accept(token) {
            return false;
        }

        self.tracks.load_audio_batch(clips);
        info!(clips = self.tracks.audio_track().len(), rows = self.row_count(), "Audio batch loaded");

        true
    }

    /// Replaces the ratings with a completed ratings file read, returning
    /// whether it was applied.
    ///
    /// The file format follows the configured import policy. Single-sequence
    /// files are padded to the longest loaded track.
    pub(crate) fn complete_ratings_load(&mut self, token: &LoadToken, text: &str) -> bool {
        if token.target != LoadTarget::Ratings || !self.accept(token) {
            return false;
        }

        let format = self.import_format.resolve(text, self.dimensions.len());
        let min_rows = self.tracks.longest_track();
        self.ratings = codec::decode(text, format, self.dimensions.clone(), min_rows);

        info!(?format, rows = self.ratings.longest_sequence(), "Ratings loaded");

        true
    }

    fn accept(&self, token: &LoadToken) -> bool {
        let current = self.is_current(token);
        if !current {
            info!(load = ?token.target, generation = token.generation, "Discarding stale load");
        }
        current
    }

    pub(crate) fn row_count(&self) -> usize {
        alignment::unified_row_count(&self.tracks, &self.ratings)
    }

    pub(crate) fn project_row(&self, index: usize) -> RowProjection<'_> {
        alignment::project_row(&self.tracks, &self.kinds, index)
    }

    pub(crate) fn rating(&self, dimension: usize, row: usize) -> Rating {
        self.ratings.rating(dimension, row)
    }

    pub(crate) fn set_rating(&mut self, dimension: usize, row: usize, rating: Rating) {
        self.ratings.set_rating(dimension, row, rating);
    }

    /// Steps a rating by `delta`. A step that leaves the rating unchanged
    /// stores nothing, so it never grows a sequence.
    pub(crate) fn adjust_rating(&mut self, dimension: usize, row: usize, delta: i64) {
        let current = self.ratings.rating(dimension, row);
        let rating = current.offset(delta);
        if rating != current {
            self.ratings.set_rating(dimension, row, rating);
        }
    }

    pub(crate) fn clear_ratings(&mut self) {
        self.ratings.clear_all();
        info!("Ratings cleared");
    }

    /// The band a language cell of `row` is shown in.
    pub(crate) fn language_band(&self, row: usize, language: &str) -> Band {
        let dimension = self.ratings.dimension_for_language(language);
        band::classify(self.ratings.rating(dimension, row))
    }

    pub(crate) fn encode_ratings(&self) -> String {
        codec::encode(&self.ratings)
    }
}
