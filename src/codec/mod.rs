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

//! Rating persistence codec.
//!
//! Converts a [`RatingStore`] to and from a flat text file. Two shapes are
//! supported:
//!
//! * **Single-sequence**: one integer per line, in row order, with line
//!   breaks between entries and none after the last.
//! * **Multi-sequence**: one line per row holding every dimension's rating in
//!   dimension order, joined by `,` with no spaces. A rating missing from a
//!   shorter sequence is written as an empty field so later columns keep
//!   their position.
//!
//! No header row is written or expected; column meaning comes from the
//! configured dimension order alone.
//!
//! Decoding never fails. Unparseable or missing fields decode as unrated and
//! every field is clamped into `[0, 10]` on its own.

use serde::{Deserialize, Serialize};

use crate::model::rating::{Rating, RatingDimension, RatingStore};

const FIELD_DELIMITER: char = ',';
const ROW_DELIMITER: char = '\n';

/// A wire shape of the ratings file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum RatingFormat {
    Single,
    Multi,
}

impl RatingFormat {
    /// The format written for a store with `dimensions` rated dimensions.
    pub(crate) fn for_dimensions(dimensions: usize) -> Self {
        if dimensions > 1 {
            RatingFormat::Multi
        } else {
            RatingFormat::Single
        }
    }

    /// Guesses the format from file content: any comma means multi-sequence.
    ///
    /// A single-row file rated in one dimension is indistinguishable between
    /// the two shapes, and is treated as single-sequence.
    pub(crate) fn detect(text: &str) -> Self {
        if text.contains(FIELD_DELIMITER) {
            RatingFormat::Multi
        } else {
            RatingFormat::Single
        }
    }
}

/// How the format of an imported ratings file is chosen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ImportFormat {
    /// Same format the current rating layout exports.
    #[default]
    Layout,
    /// Sniff the content with [`RatingFormat::detect`].
    Detect,
    Single,
    Multi,
}

impl ImportFormat {
    pub(crate) fn resolve(self, text: &str, dimensions: usize) -> RatingFormat {
        match self {
            ImportFormat::Layout => RatingFormat::for_dimensions(dimensions),
            ImportFormat::Detect => RatingFormat::detect(text),
            ImportFormat::Single => RatingFormat::Single,
            ImportFormat::Multi => RatingFormat::Multi,
        }
    }
}

/// Encodes the store, choosing the format from its dimension count.
///
/// Exactly one line is written per entry of the longest rating sequence;
/// rows that only exist in the loaded tracks are not written.
pub(crate) fn encode(store: &RatingStore) -> String {
    match RatingFormat::for_dimensions(store.dimension_count()) {
        RatingFormat::Single => encode_single(store),
        RatingFormat::Multi => encode_multi(store),
    }
}

fn encode_single(store: &RatingStore) -> String {
    store
        .sequence(0)
        .iter()
        .map(Rating::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn encode_multi(store: &RatingStore) -> String {
    let dimensions = store.dimension_count();

    (0..store.longest_sequence())
        .map(|row| {
            (0..dimensions)
                .map(|dimension| {
                    store
                        .sequence(dimension)
                        .get(row)
                        .map(Rating::to_string)
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes `text` into a new store with the given dimensions.
///
/// For the single-sequence format every line is a row, including a trailing
/// empty line, and every sequence is padded with unrated entries up to
/// `min_rows` so rows of the loaded tracks are never left undefined. Other
/// dimensions, if any, hold nothing beyond that padding.
///
/// For the multi-sequence format a single trailing line break does not start
/// a new row. Each line is split on commas; missing trailing fields decode as
/// unrated and surplus fields are ignored.
pub(crate) fn decode(
    text: &str,
    format: RatingFormat,
    dimensions: Vec<RatingDimension>,
    min_rows: usize,
) -> RatingStore {
    match format {
        RatingFormat::Single => decode_single(text, dimensions, min_rows),
        RatingFormat::Multi => decode_multi(text, dimensions),
    }
}

fn decode_single(text: &str, dimensions: Vec<RatingDimension>, min_rows: usize) -> RatingStore {
    let values: Vec<Rating> = text.split(ROW_DELIMITER).map(Rating::parse).collect();

    let mut sequences: Vec<(RatingDimension, Vec<Rating>)> =
        dimensions.into_iter().map(|d| (d, vec![])).collect();
    match sequences.first_mut() {
        Some((_, first)) => *first = values,
        None => sequences.push((RatingDimension::unified(), values)),
    }

    let mut store = RatingStore::from_sequences(sequences);
    store.initialize_for_row_count(min_rows);
    store
}

fn decode_multi(text: &str, dimensions: Vec<RatingDimension>) -> RatingStore {
    let text = text.strip_suffix(ROW_DELIMITER).unwrap_or(text);

    let rows: Vec<Vec<&str>> = if text.is_empty() {
        vec![]
    } else {
        text.split(ROW_DELIMITER)
            .map(|line| line.split(FIELD_DELIMITER).collect())
            .collect()
    };

    let dimensions = if dimensions.is_empty() {
        vec![RatingDimension::unified()]
    } else {
        dimensions
    };

    let sequences = dimensions
        .into_iter()
        .enumerate()
        .map(|(column, dimension)| {
            let values = rows
                .iter()
                .map(|fields| fields.get(column).map_or(Rating::UNRATED, |f| Rating::parse(f)))
                .collect();
            (dimension, values)
        })
        .collect();

    RatingStore::from_sequences(sequences)
}
