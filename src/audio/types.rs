//! Audio-related small types.
//!
//! Transport state and the outcome of a "previous" press.

/// Transport state of the playback engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "STOPPED",
            PlaybackState::Playing => "PLAYING",
            PlaybackState::Paused => "PAUSED",
        }
    }
}

/// What `previous()` ended up doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipBack {
    /// The current track started over; the cursor did not move.
    RestartedCurrent,
    /// The cursor moved one track back.
    MovedBack,
}
