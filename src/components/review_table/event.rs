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

//! Input handling for the review table.
//!
//! This module maps raw terminal keyboard events to row navigation, rating
//! dimension selection, and rating actions.

use crossterm::event::{Event, KeyCode, KeyModifiers};

use crate::{
    components::review_table::{ReviewTable, ReviewTableAction},
    model::rating::Rating,
};

impl ReviewTable<'_> {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ReviewTableAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        // Internal events
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.goto_next(),
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.goto_previous(),
            (KeyCode::Char('g'), _) | (KeyCode::Home, _) => self.goto_first(),
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => self.goto_last(),

            (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => self.goto_page_forward(),
            (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => self.goto_page_back(),
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => self.goto_half_page_forward(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.goto_half_page_back(),

            (KeyCode::Char('l'), _) | (KeyCode::Right, _) | (KeyCode::Tab, _) => self.next_dimension(),
            (KeyCode::Char('h'), _) | (KeyCode::Left, _) | (KeyCode::BackTab, _) => self.previous_dimension(),

            _ => {}
        }

        // External events that result in a rating action on the selected row
        self.table_state.selected()?;

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char(c @ '0'..='9'), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                c.to_digit(10).map(|d| ReviewTableAction::SetRating(Rating::clamped(i64::from(d))))
            }

            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Some(ReviewTableAction::StepRating(1)),
            (KeyCode::Char('-'), _) => Some(ReviewTableAction::StepRating(-1)),

            (KeyCode::Backspace, _) | (KeyCode::Delete, _) => Some(ReviewTableAction::SetRating(Rating::UNRATED)),

            _ => None,
        }
    }
}
