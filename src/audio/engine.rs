//! The playback engine: queue, transport state and volume.
//!
//! One instance per session, owned by the runtime and driven synchronously.
//! Backend faults never escape an operation: the engine logs them and keeps
//! going in simulated mode, where state and timing are tracked but no audio
//! is produced.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::AudioSettings;
use crate::error::{Error, Result};
use crate::library::{MediaItem, Track};

use super::backend::{AudioBackend, BackendFault};
use super::clock::Clock;
use super::queue::PlaybackQueue;
use super::types::{PlaybackState, SkipBack};

pub struct PlaybackEngine {
    queue: PlaybackQueue,
    state: PlaybackState,
    volume: f32,
    /// The current track has no real audio behind it.
    simulated: bool,
    started_at: Option<Instant>,
    paused_at: Option<Instant>,
    /// Time spent paused since the current track started.
    paused_for: Duration,
    restart_threshold: Duration,
    backend: Box<dyn AudioBackend>,
    clock: Box<dyn Clock>,
}

impl PlaybackEngine {
    pub fn new(
        mut backend: Box<dyn AudioBackend>,
        clock: Box<dyn Clock>,
        settings: &AudioSettings,
    ) -> Self {
        let volume = settings.initial_volume.clamp(0.0, 1.0);
        backend.set_volume(volume);
        Self {
            queue: PlaybackQueue::new(),
            state: PlaybackState::Stopped,
            volume,
            simulated: false,
            started_at: None,
            paused_at: None,
            paused_for: Duration::ZERO,
            restart_threshold: Duration::from_secs_f64(settings.restart_threshold_secs.max(0.0)),
            backend,
            clock,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn cursor(&self) -> Option<usize> {
        self.queue.cursor()
    }

    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.queue.current()
    }

    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    /// Replace the queue with `item`'s tracks and start the first one.
    ///
    /// Whatever was playing is stopped and dropped even when `item` turns out
    /// to be empty; in that case the engine stays `Stopped` with an empty
    /// queue and the error is returned.
    pub fn load<'a>(&mut self, item: impl Into<MediaItem<'a>>) -> Result<()> {
        let item = item.into();
        self.stop();
        self.queue.clear();
        self.started_at = None;

        let tracks = match item.expand() {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(source = item.title(), error = %e, "nothing to load");
                return Err(e);
            }
        };

        info!(source = item.title(), tracks = tracks.len(), "queue loaded");
        self.queue.replace(tracks);
        self.play_current();
        Ok(())
    }

    fn play_current(&mut self) {
        let Some(track) = self.queue.current().cloned() else {
            return;
        };

        self.backend.stop();
        self.started_at = Some(self.clock.now());
        self.paused_at = None;
        self.paused_for = Duration::ZERO;

        match self.start_backend(&track) {
            Ok(()) => {
                self.simulated = false;
                info!(title = %track.title, artist = %track.artist, "playing");
            }
            Err(e @ (BackendFault::Unavailable(_) | BackendFault::MissingFile(_))) => {
                self.simulated = true;
                warn!(title = %track.title, error = %e, "no audio for track, simulating");
            }
            Err(e) => {
                self.simulated = true;
                warn!(title = %track.title, error = %e, "backend rejected track, simulating");
            }
        }
        self.state = PlaybackState::Playing;
    }

    fn start_backend(&mut self, track: &Track) -> std::result::Result<(), BackendFault> {
        if !self.backend.is_available() {
            return Err(BackendFault::Unavailable("no output device".to_string()));
        }
        if !track.path.exists() {
            return Err(BackendFault::MissingFile(track.path.clone()));
        }
        self.backend.load_file(&track.path)?;
        self.backend.play();
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        if !self.simulated {
            self.backend.pause();
        }
        self.state = PlaybackState::Paused;
        self.paused_at = Some(self.clock.now());
        info!("paused");
    }

    pub fn resume(&mut self) {
        if self.state != PlaybackState::Paused {
            return;
        }
        if !self.simulated {
            self.backend.resume();
        }
        self.state = PlaybackState::Playing;
        if let Some(at) = self.paused_at.take() {
            self.paused_for += self.clock.now().saturating_duration_since(at);
        }
        info!("resumed");
    }

    /// Play/pause toggle for the command surface. From `Stopped` it replays
    /// the track under the cursor.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.resume(),
            PlaybackState::Stopped => self.play_current(),
        }
    }

    /// Stop output. The queue and cursor are kept.
    pub fn stop(&mut self) {
        self.backend.stop();
        if self.state != PlaybackState::Stopped {
            info!("stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Advance one track, looping back to the first after the last.
    pub fn next(&mut self) {
        if self.queue.advance() {
            self.play_current();
        }
    }

    /// Step back one track, or restart the current one when it has been
    /// playing for longer than the restart threshold (or is the first).
    /// Returns `None` on an empty queue.
    pub fn previous(&mut self) -> Option<SkipBack> {
        if self.queue.is_empty() {
            return None;
        }

        let elapsed = self.elapsed();
        debug!(elapsed_secs = elapsed.as_secs_f64(), "previous requested");

        let outcome = if elapsed <= self.restart_threshold && self.queue.step_back() {
            SkipBack::MovedBack
        } else {
            SkipBack::RestartedCurrent
        };
        self.play_current();
        Some(outcome)
    }

    /// How long the current track has been playing: the backend's position
    /// while it reports real output, otherwise time since the track started.
    pub fn elapsed(&self) -> Duration {
        if !self.simulated && self.backend.is_active() {
            return self.backend.position();
        }
        self.started_at
            .map(|t| self.clock.now().saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// Playing time of the current track for display. Unlike [`elapsed`],
    /// this holds still while paused.
    ///
    /// [`elapsed`]: PlaybackEngine::elapsed
    pub fn play_time(&self) -> Duration {
        if !self.simulated && (self.backend.is_active() || self.state == PlaybackState::Paused) {
            return self.backend.position();
        }
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };
        let until = self.paused_at.unwrap_or_else(|| self.clock.now());
        until
            .saturating_duration_since(started)
            .saturating_sub(self.paused_for)
    }

    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&level) {
            warn!(volume = level, "volume out of range");
            return Err(Error::InvalidVolume(level));
        }
        self.volume = level;
        self.backend.set_volume(level);
        info!(percent = (level * 100.0).round() as u32, "volume set");
        Ok(())
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.backend.stop();
    }
}
