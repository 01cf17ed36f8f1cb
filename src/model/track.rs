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

//! Track store.
//!
//! Holds the currently loaded tracks: one text track per language and a
//! single audio track. Each track is loaded and replaced independently, with
//! no constraint between the lengths of different tracks.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{AudioClip, TrackKind};

#[derive(Debug, Default)]
pub(crate) struct TrackStore {
    text: HashMap<String, Vec<String>>,
    audio: Vec<AudioClip>,
}

/// A borrowed view of a single track.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TrackView<'a> {
    Audio(&'a [AudioClip]),
    Text(&'a [String]),
}

impl TrackView<'_> {
    pub(crate) fn len(&self) -> usize {
        match self {
            TrackView::Audio(clips) => clips.len(),
            TrackView::Text(lines) => lines.len(),
        }
    }
}

impl TrackStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the text track for `language` with the lines of `content`.
    ///
    /// Lines are split on `\n` only. Carriage returns and trailing whitespace
    /// are kept verbatim, and content ending in a line break yields a final
    /// empty line. Empty content yields a single empty line.
    pub(crate) fn load_text_track(&mut self, language: &str, content: &str) {
        let lines: Vec<String> = content.split('\n').map(String::from).collect();

        debug!(language, lines = lines.len(), "Loaded text track");

        self.text.insert(language.to_string(), lines);
    }

    /// Replaces the audio track with `clips`, ordered by file name.
    ///
    /// The ordering is a plain lexicographic string comparison, so `clip10`
    /// sorts before `clip2`.
    pub(crate) fn load_audio_batch(&mut self, mut clips: Vec<AudioClip>) {
        clips.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(clips = clips.len(), "Loaded audio batch");

        self.audio = clips;
    }

    /// Returns the current track of the given kind, empty if never loaded.
    pub(crate) fn track(&self, kind: &TrackKind) -> TrackView<'_> {
        match kind {
            TrackKind::Audio => TrackView::Audio(&self.audio),
            TrackKind::Text(code) => {
                TrackView::Text(self.text.get(code).map(Vec::as_slice).unwrap_or(&[]))
            }
        }
    }

    pub(crate) fn text_track(&self, language: &str) -> &[String] {
        self.text.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn audio_track(&self) -> &[AudioClip] {
        &self.audio
    }

    /// The length of the longest loaded track, 0 if nothing is loaded.
    pub(crate) fn longest_track(&self) -> usize {
        self.text
            .values()
            .map(Vec::len)
            .chain(std::iter::once(self.audio.len()))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str) -> AudioClip {
        AudioClip::new(name, format!("/clips/{}", name))
    }

    #[test]
    fn text_track_keeps_trailing_empty_line() {
        let mut store = TrackStore::new();
        store.load_text_track("en", "one\ntwo\n");

        assert_eq!(store.text_track("en"), ["one", "two", ""]);
    }

    #[test]
    fn text_track_preserves_carriage_returns() {
        let mut store = TrackStore::new();
        store.load_text_track("en", "one\r\ntwo  \r\n");

        assert_eq!(store.text_track("en"), ["one\r", "two  \r", ""]);
    }

    #[test]
    fn empty_content_yields_single_empty_line() {
        let mut store = TrackStore::new();
        store.load_text_track("ja", "");

        assert_eq!(store.text_track("ja"), [""]);
        assert_eq!(store.track(&TrackKind::Text("ja".into())).len(), 1);
    }

    #[test]
    fn reload_replaces_previous_track() {
        let mut store = TrackStore::new();
        store.load_text_track("zh", "a\nb\nc");
        store.load_text_track("zh", "d");

        assert_eq!(store.text_track("zh"), ["d"]);
    }

    #[test]
    fn unknown_track_is_empty() {
        let store = TrackStore::new();

        assert!(store.text_track("fr").is_empty());
        assert_eq!(store.track(&TrackKind::Audio).len(), 0);
        assert_eq!(store.longest_track(), 0);
    }

    #[test]
    fn audio_batch_is_sorted_by_name() {
        let mut store = TrackStore::new();
        store.load_audio_batch(vec![clip("b.wav"), clip("a.wav"), clip("c.wav")]);

        let names: Vec<&str> = store.audio_track().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a.wav", "b.wav", "c.wav"]);
    }

    #[test]
    fn audio_sort_is_lexicographic_not_numeric() {
        let mut store = TrackStore::new();
        store.load_audio_batch(vec![clip("clip2.wav"), clip("clip10.wav"), clip("clip1.wav")]);

        let names: Vec<&str> = store.audio_track().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["clip1.wav", "clip10.wav", "clip2.wav"]);
    }

    #[test]
    fn audio_batch_replaces_previous_batch() {
        let mut store = TrackStore::new();
        store.load_audio_batch(vec![clip("a.wav"), clip("b.wav")]);
        store.load_audio_batch(vec![clip("z.wav")]);

        assert_eq!(store.audio_track().len(), 1);
        assert_eq!(store.audio_track()[0].name, "z.wav");
    }

    #[test]
    fn longest_track_spans_all_kinds() {
        let mut store = TrackStore::new();
        store.load_text_track("en", "a\nb");
        store.load_text_track("ja", "a\nb\nc\nd");
        store.load_audio_batch(vec![clip("a.wav")]);

        assert_eq!(store.longest_track(), 4);
    }
}
