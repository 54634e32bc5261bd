//! The playback queue: an ordered list of tracks and the cursor into it.
//!
//! Only the engine holds one. The cursor is kept in `0..len` whenever the
//! queue is non-empty and is reported as `None` otherwise.

use std::sync::Arc;

use crate::library::Track;

#[derive(Debug, Default)]
pub struct PlaybackQueue {
    tracks: Vec<Arc<Track>>,
    cursor: usize,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents and put the cursor on the first track.
    pub(crate) fn replace(&mut self, tracks: Vec<Arc<Track>>) {
        self.tracks = tracks;
        self.cursor = 0;
    }

    pub(crate) fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = 0;
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.cursor)
    }

    pub fn current(&self) -> Option<&Arc<Track>> {
        self.tracks.get(self.cursor)
    }

    /// Move forward one track, wrapping to the start after the last one.
    pub(crate) fn advance(&mut self) -> bool {
        if self.tracks.is_empty() {
            return false;
        }
        self.cursor = if self.cursor + 1 >= self.tracks.len() {
            0
        } else {
            self.cursor + 1
        };
        true
    }

    /// Move back one track. Does nothing at the first track.
    pub(crate) fn step_back(&mut self) -> bool {
        if self.tracks.is_empty() || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }
}
