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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on every
//! terminal tick or state change to provide a reactive user interface.

mod commander;
mod status;

pub(crate) use status::Status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    App,
    model::TrackKind,
    render::{commander::draw_commander, status::draw_status},
    session::ReviewSession,
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

/// Renders the user interface to the terminal frame.
///
/// The screen is split into the track summary, the review table, a status
/// line and the command line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_summary(f, outer[0], &app.session, &app.theme);

    let table_block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));
    let table_area = table_block.inner(outer[1]);
    f.render_widget(table_block, outer[1]);

    app.review_table
        .as_widget(&app.session)
        .draw(f, table_area, &app.theme);

    draw_status(f, outer[2], app.status.as_ref(), &app.theme);

    draw_commander(f, outer[3], app);
}

/// Draws the row count and the length of every track.
fn draw_summary(f: &mut Frame, area: Rect, session: &ReviewSession, theme: &Theme) {
    let tracks = session
        .kinds()
        .iter()
        .map(|kind| {
            let label = match kind {
                TrackKind::Audio => "Audio",
                TrackKind::Text(code) => session.language(code).map_or(code.as_str(), |l| l.label.as_str()),
            };
            format!("{} {}", label, session.tracks().track(kind).len())
        })
        .collect::<Vec<_>>()
        .join("  ");

    let summary = format!("{} rows  |  {}", session.row_count(), tracks);

    f.render_widget(
        Paragraph::new(Line::from(summary))
            .style(Style::default().fg(theme.accent_colour))
            .block(Block::default().padding(Padding::horizontal(1))),
        area,
    );
}
