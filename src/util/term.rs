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

//! Terminal background colour control.
//!
//! Uses OSC 11 and OSC 111 escape sequences, which most terminal emulators
//! understand and the rest ignore.

use std::io::{self, Write};

/// Sets the terminal background, given as `#rrggbb`, so the area outside the
/// drawn widgets matches the theme.
pub(crate) fn set_terminal_bg(hex_colour: &str) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x1b]11;{}\x07", hex_colour);
    let _ = stdout.flush();
}

/// Restores the background the terminal was configured with.
pub(crate) fn reset_terminal_bg() {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x1b]111\x07");
    let _ = stdout.flush();
}
