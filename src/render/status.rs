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

//! The status line, showing the outcome of the last load, save or command.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Padding, Paragraph},
};

use crate::theme::Theme;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Status {
    pub(crate) message: String,
    pub(crate) is_error: bool,
}

impl Status {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

pub(crate) fn draw_status(f: &mut Frame, area: Rect, status: Option<&Status>, theme: &Theme) {
    let Some(status) = status else {
        return;
    };

    let colour = if status.is_error {
        theme.error_colour
    } else {
        theme.accent_colour
    };

    f.render_widget(
        Paragraph::new(status.message.as_str())
            .style(Style::default().fg(colour))
            .block(Block::default().padding(Padding::horizontal(1))),
        area,
    );
}
