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

//! Review bands.
//!
//! Ratings are grouped into qualitative bands that drive how a line is
//! emphasised in the review table.

use crate::model::rating::Rating;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Band {
    Unrated,
    Unacceptable,
    Acceptable,
    Excellent,
}

/// Classifies a rating into its review band.
///
/// * `8..=10` is excellent.
/// * `5..=7` is acceptable.
/// * `1..=4` is unacceptable.
/// * `0`, including any line never rated, is unrated.
pub(crate) fn classify(rating: Rating) -> Band {
    match rating.value() {
        8..=10 => Band::Excellent,
        5..=7 => Band::Acceptable,
        1..=4 => Band::Unacceptable,
        _ => Band::Unrated,
    }
}

impl Band {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Band::Unrated => "unrated",
            Band::Unacceptable => "unacceptable",
            Band::Acceptable => "acceptable",
            Band::Excellent => "excellent",
        }
    }
}
