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

//! Filesystem access for the task worker.
//!
//! Text tracks and rating files are read whole as UTF-8. Audio batches are
//! the audio files directly inside a directory; nested directories are not
//! descended into and the clip content is never opened.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::{error::LoadError, model::AudioClip};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a whole file as text.
///
/// Invalid UTF-8 sequences become U+FFFD rather than failing the read, and a
/// leading byte order mark is dropped.
pub(crate) fn read_text(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text).to_string())
}

/// Lists the audio clips in `dir` whose extension is one of `extensions`,
/// compared case-insensitively.
///
/// The listing order is whatever the filesystem returns; ordering by name is
/// left to the track store.
pub(crate) fn list_audio_clips(dir: &Path, extensions: &[String]) -> Result<Vec<AudioClip>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut clips = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| LoadError::ListDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if !matches {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        clips.push(AudioClip::new(name, path));
    }

    debug!(dir = %dir.display(), clips = clips.len(), "Listed audio directory");

    Ok(clips)
}

/// Writes `body` to `path` atomically.
///
/// The content goes to a temporary sibling file first which is then renamed
/// over the target, so a failed save never leaves a truncated ratings file.
pub(crate) fn write_atomic(path: &Path, body: &str) -> Result<(), LoadError> {
    let temp_path = temp_path_for(path);

    let write_error = |source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = fs::write(&temp_path, body) {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(source));
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        write_error(source)
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn wav() -> Vec<String> {
        vec!["wav".to_string()]
    }

    #[test]
    fn read_text_returns_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.txt");
        fs::write(&path, "hello\nworld\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "hello\nworld\n");
    }

    #[test]
    fn read_text_replaces_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.txt");
        fs::write(&path, b"7\n8\n\xe9\n5").unwrap();

        let text = read_text(&path).unwrap();
        assert_eq!(text, "7\n8\n\u{fffd}\n5");

        let store = crate::codec::decode(
            &text,
            crate::codec::RatingFormat::Single,
            crate::model::rating::RatingMode::Unified.dimensions(&[]),
            0,
        );
        let values: Vec<u8> = store.sequence(0).iter().map(|r| r.value()).collect();
        assert_eq!(values, [7, 8, 0, 5]);
    }

    #[test]
    fn read_text_drops_byte_order_mark() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.txt");
        fs::write(&path, b"\xef\xbb\xbf7\n8").unwrap();

        assert_eq!(read_text(&path).unwrap(), "7\n8");
    }

    #[test]
    fn read_text_keeps_inner_byte_order_marks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.txt");
        fs::write(&path, "a\n\u{feff}b").unwrap();

        assert_eq!(read_text(&path).unwrap(), "a\n\u{feff}b");
    }

    #[test]
    fn read_text_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("missing.txt")).unwrap_err();

        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn lists_only_matching_top_level_clips() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.wav"), b"").unwrap();
        fs::write(dir.path().join("a.WAV"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.wav"), b"").unwrap();

        let mut names: Vec<String> = list_audio_clips(dir.path(), &wav())
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();

        assert_eq!(names, ["a.WAV", "b.wav"]);
    }

    #[test]
    fn listing_a_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.wav");
        fs::write(&path, b"").unwrap();

        assert!(matches!(
            list_audio_clips(&path, &wav()),
            Err(LoadError::NotADirectory(_))
        ));
    }

    #[test]
    fn write_atomic_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.txt");
        fs::write(&path, "old").unwrap();

        write_atomic(&path, "1\n2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2");
        assert!(!dir.path().join("ratings.txt.tmp").exists());
    }

    #[test]
    fn write_atomic_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("ratings.txt");

        assert!(matches!(write_atomic(&path, "1"), Err(LoadError::Write { .. })));
    }
}
