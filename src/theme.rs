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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette, including the colors
//! that emphasise each review band.

use ratatui::style::Color;

use crate::model::band::Band;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) commander_bg: Color,
    pub(crate) error_colour: Color,

    pub(crate) table_line_number_fg: Color,
    pub(crate) table_audio_fg: Color,
    pub(crate) table_text_fg: Color,
    pub(crate) table_absent_fg: Color,
    pub(crate) table_highlight_bg: Color,

    pub(crate) band_excellent_fg: Color,
    pub(crate) band_acceptable_fg: Color,
    pub(crate) band_unacceptable_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            commander_colour: Color::Rgb(255, 255, 255),
            commander_bg: Color::Rgb(50, 30, 60),
            error_colour: Color::Rgb(255, 95, 95),

            table_line_number_fg: Color::Rgb(162, 161, 166),
            table_audio_fg: Color::Rgb(179, 157, 219),
            table_text_fg: Color::Rgb(255, 255, 255),
            table_absent_fg: Color::Rgb(102, 102, 102),
            table_highlight_bg: Color::Rgb(60, 60, 140),

            band_excellent_fg: Color::Rgb(120, 220, 120),
            band_acceptable_fg: Color::Rgb(255, 215, 0),
            band_unacceptable_fg: Color::Rgb(255, 95, 95),
        }
    }

    /// The text color of a cell shown in `band`.
    pub(crate) fn band_colour(&self, band: Band) -> Color {
        match band {
            Band::Excellent => self.band_excellent_fg,
            Band::Acceptable => self.band_acceptable_fg,
            Band::Unacceptable => self.band_unacceptable_fg,
            Band::Unrated => self.table_text_fg,
        }
    }

    /// Formats an RGB colour as `#rrggbb` for terminal escape sequences.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}
