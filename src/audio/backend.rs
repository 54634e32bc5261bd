//! The audio output seam.
//!
//! The engine only talks to `dyn AudioBackend`. `select_backend` picks the
//! rodio adapter when an output device can be opened and the silent
//! [`NullBackend`] otherwise.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::AudioSettings;

use super::rodio_backend::RodioBackend;

/// Backend-side failures. The engine logs these and falls back to simulated
/// playback; they never reach a caller.
#[derive(Error, Debug)]
pub enum BackendFault {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("audio file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Operations the engine issues against an output device. Every call returns
/// immediately; progress is polled through `is_active` / `position`.
pub trait AudioBackend {
    fn init(&mut self) -> Result<(), BackendFault>;
    /// Whether `init` succeeded and files can be loaded.
    fn is_available(&self) -> bool;
    /// Prepare `path` for playback (paused), replacing whatever was loaded.
    fn load_file(&mut self, path: &Path) -> Result<(), BackendFault>;
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    fn set_volume(&mut self, level: f32);
    /// True while audio is actually coming out (not paused, not finished).
    fn is_active(&self) -> bool;
    /// Playback position of the loaded file.
    fn position(&self) -> Duration;
}

/// A backend with no device. Used when audio is disabled or cannot start.
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn init(&mut self) -> Result<(), BackendFault> {
        Err(BackendFault::Unavailable("no audio backend".to_string()))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn load_file(&mut self, _path: &Path) -> Result<(), BackendFault> {
        Err(BackendFault::Unavailable("no audio backend".to_string()))
    }

    fn play(&mut self) {}

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn stop(&mut self) {}

    fn set_volume(&mut self, _level: f32) {}

    fn is_active(&self) -> bool {
        false
    }

    fn position(&self) -> Duration {
        Duration::ZERO
    }
}

/// Pick the backend for this session.
pub fn select_backend(settings: &AudioSettings) -> Box<dyn AudioBackend> {
    if settings.simulate_only {
        info!("audio disabled by configuration, using simulated playback");
        return Box::new(NullBackend);
    }

    let mut rodio = RodioBackend::new();
    match rodio.init() {
        Ok(()) => {
            info!("audio output opened");
            Box::new(rodio)
        }
        Err(e) => {
            warn!(error = %e, "falling back to simulated playback");
            Box::new(NullBackend)
        }
    }
}
