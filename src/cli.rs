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

//! Command-line arguments.
//!
//! Everything given here is loaded at startup through the same path as the
//! interactive `:` commands.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "subrate", version, about = "Review subtitle lines against audio clips and rate them")]
pub(crate) struct Args {
    /// Directory of audio clips, one clip per line.
    #[arg(long, value_name = "DIR")]
    pub(crate) audio: Option<PathBuf>,

    /// Subtitle file for a language, may be repeated.
    #[arg(long = "text", value_name = "LANG=PATH", value_parser = parse_text_arg)]
    pub(crate) texts: Vec<(String, PathBuf)>,

    /// Ratings file to load.
    #[arg(long, value_name = "PATH")]
    pub(crate) ratings: Option<PathBuf>,

    /// Where ratings are saved, instead of the configured ratings file.
    #[arg(long, value_name = "PATH")]
    pub(crate) save_to: Option<PathBuf>,
}

fn parse_text_arg(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((language, path)) if !language.is_empty() && !path.is_empty() => {
            Ok((language.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected LANG=PATH, got '{}'", arg)),
    }
}
