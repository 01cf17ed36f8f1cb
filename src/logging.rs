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

//! Diagnostic logging.
//!
//! The terminal belongs to the UI, so log output goes to a file next to the
//! configuration file instead of stderr. The filter honours `RUST_LOG` and
//! falls back to the configured level.

use std::{fs, path::Path};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "subrate.log";

/// Installs the global subscriber writing to `log_dir`.
///
/// Returns the guard that flushes buffered output on drop; it must be held
/// for the lifetime of the application. Returns `None`, leaving logging
/// disabled, if there is no usable log directory.
pub(crate) fn init_tracing(default_level: &str, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let log_dir = log_dir?;
    fs::create_dir_all(log_dir).ok()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(default_level)));

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .ok()?;

    Some(guard)
}

fn filter_directive(level: &str) -> &str {
    match level.trim() {
        "" => "info",
        level => level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_level_falls_back_to_info() {
        assert_eq!(filter_directive(""), "info");
        assert_eq!(filter_directive("  "), "info");
        assert_eq!(filter_directive("debug"), "debug");
    }

    #[test]
    fn no_directory_disables_logging() {
        assert!(init_tracing("info", None).is_none());
    }
}
