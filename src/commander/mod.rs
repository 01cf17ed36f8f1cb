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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component, and dispatching the corresponding
//! application event when typing is finished and a command is submitted.
//!
//! # Commands
//!
//! * `text <lang> <path>` - load the subtitle track of a language.
//! * `audio <dir>` - load every audio clip in a directory.
//! * `ratings <path>` - load a ratings file.
//! * `save [path]` - save the ratings, to the default file if no path.
//! * `clear` - reset every rating to unrated.
//! * `rate <value>` - rate the selected line.
//! * `goto <line>` - jump to a line, counting from 1.
//! * `q` - quit.
//!
//! A load command without a path selects no file and does nothing.

use std::{path::PathBuf, sync::mpsc::Sender};

use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, model::rating::Rating};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Command {
    LoadText { language: String, path: Option<PathBuf> },
    LoadAudio(Option<PathBuf>),
    LoadRatings(Option<PathBuf>),
    SaveRatings(Option<PathBuf>),
    ClearRatings,
    Rate(Rating),
    Goto(usize),
    Quit,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub(crate) enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid line number '{0}'")]
    InvalidLine(String),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Handles a terminal event, returning whether the commander consumed it.
    ///
    /// While active every key goes to the command line. When inactive only
    /// `:` is consumed, to enter command mode.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> bool {
        let Event::Key(key_event) = event else {
            return false;
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return true;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim();
                if !buffer.is_empty() {
                    let event = match parse_command(buffer) {
                        Ok(command) => AppEvent::RunCommand(command),
                        Err(e) => AppEvent::Error(e.to_string()),
                    };
                    let _ = event_tx.send(event);
                }
                self.input.reset();
                self.active = false;
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        true
    }
}

/// Parses a submitted command line.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, CommandError> {
    let buffer = buffer.trim();
    let (name, rest) = split_word(buffer);

    let command = match name {
        "q" | "quit" => Command::Quit,

        "text" => {
            let (language, path) = split_word(rest);
            if language.is_empty() {
                return Err(CommandError::Usage("text <lang> <path>"));
            }
            Command::LoadText {
                language: language.to_string(),
                path: optional_path(path),
            }
        }

        "audio" => Command::LoadAudio(optional_path(rest)),
        "ratings" => Command::LoadRatings(optional_path(rest)),
        "save" | "w" => Command::SaveRatings(optional_path(rest)),
        "clear" => Command::ClearRatings,

        "rate" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("rate <0-10>"));
            }
            Command::Rate(Rating::parse(rest))
        }

        "goto" => match rest.parse::<usize>() {
            Ok(line) if line > 0 => Command::Goto(line - 1),
            _ => return Err(CommandError::InvalidLine(rest.to_string())),
        },

        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn optional_path(text: &str) -> Option<PathBuf> {
    let text = text.trim().trim_matches('"');
    (!text.is_empty()).then(|| PathBuf::from(text))
}
