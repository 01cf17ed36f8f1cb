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

//! Interactive review table widget and state management.
//!
//! This module provides the table listing every aligned row of the session:
//! the audio clip, the line of each language, and the ratings. It separates
//! persistent state (`ReviewTableState`) from the transient widget view
//! (`ReviewTable`), which borrows the session it displays.
//!
//! The table never mutates the session. Rating keys are reported back as a
//! [`ReviewTableAction`] for the caller to apply to the selected row and
//! dimension.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::{model::rating::Rating, session::ReviewSession};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum ReviewTableAction {
    SetRating(Rating),
    StepRating(i64),
}

pub(crate) struct ReviewTableState {
    table_state: TableState,
    dimension: usize,
    page_rows: usize,
}

impl ReviewTableState {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::new(),
            dimension: 0,
            page_rows: 1,
        }
    }

    pub(crate) fn selected_row(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// The rating dimension edited by rating keys.
    pub(crate) fn dimension(&self) -> usize {
        self.dimension
    }

    pub(crate) fn as_widget<'a>(&'a mut self, session: &'a ReviewSession) -> ReviewTable<'a> {
        ReviewTable {
            session,
            table_state: &mut self.table_state,
            dimension: &mut self.dimension,
            page_rows: &mut self.page_rows,
        }
    }
}

pub(crate) struct ReviewTable<'a> {
    session: &'a ReviewSession,
    table_state: &'a mut TableState,
    dimension: &'a mut usize,
    page_rows: &'a mut usize,
}

impl<'a> ReviewTable<'a> {
    fn row_count(&self) -> usize {
        self.session.row_count()
    }

    /// Keeps the selection on an existing row as tracks load and change
    /// length.
    pub(crate) fn sync_selection(&mut self) {
        let len = self.row_count();
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.table_state.select(selected);

        let dimensions = self.session.ratings().dimension_count();
        if *self.dimension >= dimensions {
            *self.dimension = 0;
        }
    }

    pub(crate) fn goto(&mut self, row: usize) {
        let len = self.row_count();
        if len == 0 { return; }
        self.table_state.select(Some(row.min(len - 1)));
    }

    fn goto_next(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.row_count();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_first(&mut self) {
        self.goto(0);
    }

    fn goto_last(&mut self) {
        self.goto(usize::MAX);
    }

    fn goto_forward(&mut self, rows: usize) {
        let current = self.table_state.selected().unwrap_or(0);
        self.goto(current.saturating_add(rows));
    }

    fn goto_back(&mut self, rows: usize) {
        let current = self.table_state.selected().unwrap_or(0);
        self.goto(current.saturating_sub(rows));
    }

    fn goto_page_forward(&mut self) {
        self.goto_forward(*self.page_rows);
    }

    fn goto_page_back(&mut self) {
        self.goto_back(*self.page_rows);
    }

    fn goto_half_page_forward(&mut self) {
        self.goto_forward((*self.page_rows / 2).max(1));
    }

    fn goto_half_page_back(&mut self) {
        self.goto_back((*self.page_rows / 2).max(1));
    }

    fn next_dimension(&mut self) {
        let count = self.session.ratings().dimension_count();
        *self.dimension = (*self.dimension + 1) % count;
    }

    fn previous_dimension(&mut self) {
        let count = self.session.ratings().dimension_count();
        *self.dimension = (*self.dimension + count - 1) % count;
    }
}
