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

//! Application configuration.
//!
//! This module manages the application configuration file: the languages
//! under review and their column order, how lines are rated, how ratings
//! files are read and written, and the logging level.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    codec::ImportFormat,
    model::{Language, rating::RatingMode},
};

const CONFIG_NAME: &str = "subrate";

const DEFAULT_RATINGS_FILE: &str = "ratings.txt";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    pub(crate) languages: Vec<Language>,
    pub(crate) rating_mode: RatingMode,
    pub(crate) import_format: ImportFormat,
    pub(crate) audio_extensions: Vec<String>,
    pub(crate) ratings_file: String,
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            languages: vec![
                Language::new("zh", "Chinese"),
                Language::new("en", "English"),
                Language::new("ja", "Japanese"),
            ],
            rating_mode: RatingMode::Unified,
            import_format: ImportFormat::Layout,
            audio_extensions: vec!["wav".to_string()],
            ratings_file: DEFAULT_RATINGS_FILE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Where ratings are saved when no explicit path is given.
    pub(crate) fn ratings_path(&self) -> PathBuf {
        PathBuf::from(&self.ratings_file)
    }
}

pub(crate) fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

/// Directory holding the configuration file, also used for log files.
pub(crate) fn config_dir() -> Option<PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
}
