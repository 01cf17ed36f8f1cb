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

//! UI rendering logic for the review table.
//!
//! This module lays out one row per aligned index: the line number, the audio
//! clip, the line of each language and the ratings. Language lines are
//! coloured by the band of their rating, and a track with no entry at a row
//! shows a placeholder.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Row, Table},
};

use crate::{
    components::review_table::ReviewTable,
    model::{TrackKind, alignment, band},
    render::Render,
    theme::Theme,
};

const ABSENT: &str = "-";

// Header row plus its bottom margin
const HEADER_HEIGHT: u16 = 2;

impl Render for ReviewTable<'_> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        *self.page_rows = usize::from(area.height.saturating_sub(HEADER_HEIGHT)).max(1);
        self.sync_selection();
        self.draw_table(f, area, theme);
    }
}

impl ReviewTable<'_> {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let session = self.session;
        let absent = Style::default().fg(theme.table_absent_fg);

        let rows = (0..session.row_count()).map(|index| {
            let projection = session.project_row(index);
            let mut cells = Vec::with_capacity(projection.cells.len() + 2);

            cells.push(Cell::from(
                Line::from((index + 1).to_string())
                    .style(Style::default().fg(theme.table_line_number_fg))
                    .alignment(Alignment::Right),
            ));

            for (kind, cell) in &projection.cells {
                let line = match (kind, cell) {
                    (_, alignment::Cell::Absent) => Line::from(ABSENT).style(absent),
                    (_, alignment::Cell::Clip(clip)) => {
                        Line::from(display_text(&clip.name)).style(Style::default().fg(theme.table_audio_fg))
                    }
                    (TrackKind::Text(language), alignment::Cell::Text(text)) => {
                        let band = session.language_band(index, language);
                        Line::from(display_text(text)).style(Style::default().fg(theme.band_colour(band)))
                    }
                    (TrackKind::Audio, alignment::Cell::Text(text)) => Line::from(display_text(text)),
                };
                cells.push(Cell::from(line));
            }

            for dimension in 0..session.ratings().dimension_count() {
                let rating = session.rating(dimension, index);
                let rating_band = band::classify(rating);
                cells.push(Cell::from(
                    Line::from(rating.to_string())
                        .style(Style::default().fg(theme.band_colour(rating_band)))
                        .alignment(Alignment::Right),
                ));
            }

            Row::new(cells)
        });

        let mut widths = vec![Constraint::Length(6), Constraint::Percentage(20)];
        widths.extend(session.languages().iter().map(|_| Constraint::Fill(1)));
        widths.extend(session.ratings().dimensions().map(|d| Constraint::Length(d.label.len().clamp(6, 20) as u16)));

        let mut header = vec![
            Cell::from(Line::from("Line").alignment(Alignment::Right)),
            Cell::from("Audio"),
        ];
        header.extend(session.languages().iter().map(|l| Cell::from(l.label.clone())));
        header.extend(session.ratings().dimensions().enumerate().map(|(i, d)| {
            let style = if i == *self.dimension {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Cell::from(Line::from(d.label.clone()).style(style).alignment(Alignment::Right))
        }));

        let table = Table::new(rows, widths)
            .header(
                Row::new(header)
                    .style(Style::default().bold().fg(theme.accent_colour))
                    .bottom_margin(1),
            )
            .row_highlight_style(Style::default().bg(theme.table_highlight_bg))
            .block(Block::default());

        f.render_stateful_widget(table, area, &mut *self.table_state);
    }
}

/// Strips control characters, which would corrupt the terminal layout.
fn display_text(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        codec::ImportFormat,
        components::ReviewTableState,
        model::{
            Language,
            rating::{Rating, RatingMode},
        },
        session::{LoadTarget, ReviewSession},
    };

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(display_text("a\tb\rc"), "abc");
        assert_eq!(display_text("日本語"), "日本語");
    }

    #[test]
    fn draws_rows_with_placeholders_for_short_tracks() {
        let languages = vec![Language::new("en", "English"), Language::new("ja", "Japanese")];
        let mut session = ReviewSession::new(languages, RatingMode::Unified, ImportFormat::default());
        let token = session.begin_load(LoadTarget::Track(TrackKind::Text("en".into())));
        assert!(session.complete_text_load(&token, "hello\nworld"));
        session.set_rating(0, 1, Rating::clamped(9));

        let mut state = ReviewTableState::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                state.as_widget(&session).draw(f, area, &Theme::default());
            })
            .unwrap();

        let lines = screen(&terminal);
        assert!(lines[0].contains("English"));
        assert!(lines[0].contains("Rating"));
        assert!(lines[2].contains("hello"));
        assert!(lines[2].contains('-'));
        assert!(lines[3].contains("world"));
        assert!(lines[3].trim_end().ends_with('9'));

        assert_eq!(state.selected_row(), Some(0));
        assert_eq!(state.page_rows, 4);
    }
}
