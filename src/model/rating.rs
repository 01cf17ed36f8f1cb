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

//! Ratings and the rating store.
//!
//! A [`Rating`] is an integer guaranteed to lie in `[0, 10]`; every way of
//! building one clamps into that range, so the store can never hold an
//! out-of-range value.
//!
//! The [`RatingStore`] holds one rating sequence per rated dimension. A
//! dimension is either a single unified rating for the whole line, or one
//! rating per language, depending on the configured [`RatingMode`].
//! Sequences are sized independently of the loaded tracks and grow lazily:
//! reading past the end of a sequence yields an unrated `0` without storing
//! anything.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::Language;

pub(crate) const MIN_RATING: u8 = 0;
pub(crate) const MAX_RATING: u8 = 10;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Rating(u8);

impl Rating {
    pub(crate) const UNRATED: Rating = Rating(MIN_RATING);

    /// Builds a rating from any integer, clamping into `[0, 10]`.
    pub(crate) fn clamped(value: i64) -> Self {
        // Lossless, the clamp guarantees the value fits in a u8
        Self(value.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8)
    }

    /// Parses a rating from free text, never failing.
    ///
    /// Leading whitespace and an optional sign are accepted, followed by
    /// decimal digits, or hexadecimal digits after a `0x` prefix; anything
    /// after the digits is ignored, so `"7/10"` is `7`, `"3.9"` is `3` and
    /// `"0x1A"` is 26 before clamping. Text without leading digits, including the
    /// empty string, is unrated. The result is clamped into `[0, 10]`.
    pub(crate) fn parse(text: &str) -> Self {
        Self::clamped(parse_integer(text).unwrap_or(0))
    }

    pub(crate) fn value(self) -> u8 {
        self.0
    }

    /// Steps the rating by `delta`, saturating at the range bounds.
    pub(crate) fn offset(self, delta: i64) -> Self {
        Self::clamped(i64::from(self.0).saturating_add(delta))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].chars().fold(0i64, |acc, c| {
        let digit = c.to_digit(radix).map_or(0, i64::from);
        acc.saturating_mul(i64::from(radix)).saturating_add(digit)
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// How lines are rated.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum RatingMode {
    /// A single rating per line, shared by every language.
    #[default]
    Unified,
    /// An independent rating per line for each language.
    PerLanguage,
}

/// A rated dimension, one column of ratings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct RatingDimension {
    pub(crate) key: String,
    pub(crate) label: String,
    /// The language this dimension rates, if it is language specific.
    pub(crate) language: Option<String>,
}

impl RatingDimension {
    pub(crate) fn unified() -> Self {
        Self {
            key: "rating".to_string(),
            label: "Rating".to_string(),
            language: None,
        }
    }

    pub(crate) fn for_language(language: &Language) -> Self {
        Self {
            key: language.code.clone(),
            label: format!("{} Rating", language.label),
            language: Some(language.code.clone()),
        }
    }
}

impl RatingMode {
    /// Builds the rated dimensions for this mode, always at least one.
    ///
    /// Per-language dimensions follow the configured language order, which is
    /// also the column order of the multi-sequence file format.
    pub(crate) fn dimensions(self, languages: &[Language]) -> Vec<RatingDimension> {
        match self {
            RatingMode::PerLanguage if !languages.is_empty() => {
                languages.iter().map(RatingDimension::for_language).collect()
            }
            _ => vec![RatingDimension::unified()],
        }
    }
}

#[derive(Debug, Clone)]
struct RatingSequence {
    dimension: RatingDimension,
    values: Vec<Rating>,
}

#[derive(Debug, Clone)]
pub(crate) struct RatingStore {
    sequences: Vec<RatingSequence>,
}

impl RatingStore {
    /// Creates an empty store with a sequence per dimension.
    ///
    /// An empty dimension list falls back to a single unified dimension.
    pub(crate) fn new(dimensions: Vec<RatingDimension>) -> Self {
        Self::from_sequences(dimensions.into_iter().map(|d| (d, vec![])).collect())
    }

    pub(crate) fn from_sequences(sequences: Vec<(RatingDimension, Vec<Rating>)>) -> Self {
        let mut sequences: Vec<RatingSequence> = sequences
            .into_iter()
            .map(|(dimension, values)| RatingSequence { dimension, values })
            .collect();

        if sequences.is_empty() {
            sequences.push(RatingSequence {
                dimension: RatingDimension::unified(),
                values: vec![],
            });
        }

        Self { sequences }
    }

    pub(crate) fn dimensions(&self) -> impl Iterator<Item = &RatingDimension> {
        self.sequences.iter().map(|s| &s.dimension)
    }

    pub(crate) fn dimension_count(&self) -> usize {
        self.sequences.len()
    }

    /// Finds the dimension that rates `language`.
    ///
    /// When there is no language-specific dimension the first dimension is
    /// used, so in unified mode every language shares the one rating.
    pub(crate) fn dimension_for_language(&self, language: &str) -> usize {
        self.sequences
            .iter()
            .position(|s| s.dimension.language.as_deref() == Some(language))
            .unwrap_or(0)
    }

    /// Stores `rating` at `index`, growing the sequence with unrated entries
    /// if needed.
    pub(crate) fn set_rating(&mut self, dimension: usize, index: usize, rating: Rating) {
        let Some(sequence) = self.sequences.get_mut(dimension) else {
            warn!(dimension, "Ignoring rating for unknown dimension");
            return;
        };

        if index >= sequence.values.len() {
            sequence.values.resize(index + 1, Rating::UNRATED);
        }
        sequence.values[index] = rating;

        debug!(dimension = %sequence.dimension.key, index, rating = rating.value(), "Set rating");
    }

    /// Returns the rating at `index`, unrated past the end of the sequence.
    pub(crate) fn rating(&self, dimension: usize, index: usize) -> Rating {
        self.sequences
            .get(dimension)
            .and_then(|s| s.values.get(index))
            .copied()
            .unwrap_or(Rating::UNRATED)
    }

    /// Stored ratings of one dimension, without lazily defaulted entries.
    pub(crate) fn sequence(&self, dimension: usize) -> &[Rating] {
        self.sequences
            .get(dimension)
            .map(|s| s.values.as_slice())
            .unwrap_or(&[])
    }

    /// Resets every stored rating to unrated, keeping sequence lengths.
    pub(crate) fn clear_all(&mut self) {
        for sequence in self.sequences.iter_mut() {
            sequence.values.fill(Rating::UNRATED);
        }
    }

    /// Pads every sequence with unrated entries up to `rows`.
    ///
    /// Sequences already longer than `rows` are left untouched.
    pub(crate) fn initialize_for_row_count(&mut self, rows: usize) {
        for sequence in self.sequences.iter_mut() {
            if sequence.values.len() < rows {
                sequence.values.resize(rows, Rating::UNRATED);
            }
        }
    }

    /// The length of the longest stored sequence.
    pub(crate) fn longest_sequence(&self) -> usize {
        self.sequences.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages() -> Vec<Language> {
        vec![
            Language::new("zh", "Chinese"),
            Language::new("en", "English"),
            Language::new("ja", "Japanese"),
        ]
    }

    #[test]
    fn clamp_follows_min_max() {
        assert_eq!(Rating::clamped(-5).value(), 0);
        assert_eq!(Rating::clamped(15).value(), 10);
        assert_eq!(Rating::clamped(7).value(), 7);
        assert_eq!(Rating::clamped(i64::MIN).value(), 0);
        assert_eq!(Rating::clamped(i64::MAX).value(), 10);

        for v in -20..=20 {
            assert_eq!(i64::from(Rating::clamped(v).value()), v.max(0).min(10));
        }
    }

    #[test]
    fn parse_defaults_and_clamps() {
        assert_eq!(Rating::parse("12").value(), 10);
        assert_eq!(Rating::parse("-1").value(), 0);
        assert_eq!(Rating::parse("abc").value(), 0);
        assert_eq!(Rating::parse("").value(), 0);
        assert_eq!(Rating::parse("5").value(), 5);
    }

    #[test]
    fn parse_reads_leading_digits() {
        assert_eq!(Rating::parse("  7").value(), 7);
        assert_eq!(Rating::parse("3.9").value(), 3);
        assert_eq!(Rating::parse("8/10").value(), 8);
        assert_eq!(Rating::parse("6\r").value(), 6);
        assert_eq!(Rating::parse("+4").value(), 4);
        assert_eq!(Rating::parse("-").value(), 0);
        assert_eq!(Rating::parse("99999999999999999999999").value(), 10);
    }

    #[test]
    fn parse_reads_hex_prefix() {
        assert_eq!(Rating::parse("0x1A").value(), 10);
        assert_eq!(Rating::parse("0x8").value(), 8);
        assert_eq!(Rating::parse(" 0Xa").value(), 10);
        assert_eq!(Rating::parse("-0x5").value(), 0);
        assert_eq!(Rating::parse("0x").value(), 0);
        assert_eq!(Rating::parse("0xg").value(), 0);
        assert_eq!(Rating::parse("07").value(), 7);
        assert_eq!(Rating::parse("\u{feff}9").value(), 9);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(Rating::clamped(9).offset(1).value(), 10);
        assert_eq!(Rating::clamped(10).offset(1).value(), 10);
        assert_eq!(Rating::UNRATED.offset(-1).value(), 0);
    }

    #[test]
    fn unified_mode_has_one_dimension() {
        let dims = RatingMode::Unified.dimensions(&languages());
        assert_eq!(dims, vec![RatingDimension::unified()]);
    }

    #[test]
    fn per_language_mode_follows_language_order() {
        let dims = RatingMode::PerLanguage.dimensions(&languages());
        let keys: Vec<&str> = dims.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["zh", "en", "ja"]);
    }

    #[test]
    fn per_language_without_languages_falls_back_to_unified() {
        let dims = RatingMode::PerLanguage.dimensions(&[]);
        assert_eq!(dims.len(), 1);
    }

    #[test]
    fn set_rating_grows_with_unrated_gaps() {
        let mut store = RatingStore::new(vec![RatingDimension::unified()]);
        store.set_rating(0, 3, Rating::clamped(6));

        assert_eq!(store.sequence(0), [Rating(0), Rating(0), Rating(0), Rating(6)]);
    }

    #[test]
    fn reading_past_the_end_is_unrated_and_not_stored() {
        let store = RatingStore::new(vec![RatingDimension::unified()]);

        assert_eq!(store.rating(0, 42), Rating::UNRATED);
        assert_eq!(store.rating(7, 0), Rating::UNRATED);
        assert!(store.sequence(0).is_empty());
    }

    #[test]
    fn unknown_dimension_is_ignored() {
        let mut store = RatingStore::new(vec![RatingDimension::unified()]);
        store.set_rating(3, 0, Rating::clamped(5));

        assert_eq!(store.longest_sequence(), 0);
    }

    #[test]
    fn clear_all_keeps_lengths() {
        let mut store = RatingStore::new(RatingMode::PerLanguage.dimensions(&languages()));
        store.set_rating(0, 3, Rating::clamped(9));
        store.set_rating(2, 1, Rating::clamped(4));

        store.clear_all();

        assert_eq!(store.sequence(0).len(), 4);
        assert_eq!(store.sequence(1).len(), 0);
        assert_eq!(store.sequence(2).len(), 2);
        assert!(store.sequence(0).iter().all(|r| *r == Rating::UNRATED));
        assert!(store.sequence(2).iter().all(|r| *r == Rating::UNRATED));
    }

    #[test]
    fn initialize_pads_but_never_truncates() {
        let mut store = RatingStore::new(RatingMode::PerLanguage.dimensions(&languages()));
        store.set_rating(1, 5, Rating::clamped(2));

        store.initialize_for_row_count(3);

        assert_eq!(store.sequence(0).len(), 3);
        assert_eq!(store.sequence(1).len(), 6);
        assert_eq!(store.rating(1, 5).value(), 2);
    }

    #[test]
    fn dimension_for_language_falls_back_to_first() {
        let unified = RatingStore::new(RatingMode::Unified.dimensions(&languages()));
        assert_eq!(unified.dimension_for_language("ja"), 0);

        let per_language = RatingStore::new(RatingMode::PerLanguage.dimensions(&languages()));
        assert_eq!(per_language.dimension_for_language("ja"), 2);
        assert_eq!(per_language.dimension_for_language("fr"), 0);
    }

    #[test]
    fn empty_dimension_list_falls_back_to_unified() {
        let store = RatingStore::new(vec![]);
        assert_eq!(store.dimension_count(), 1);
    }
}
