//! Playback: the engine, its queue and the audio backends it drives.

mod backend;
mod clock;
mod engine;
mod queue;
mod rodio_backend;
mod types;

pub use backend::{NullBackend, select_backend};
pub use clock::SystemClock;
#[cfg(test)]
pub use clock::ManualClock;
pub use engine::PlaybackEngine;
pub use types::{PlaybackState, SkipBack};

#[cfg(test)]
mod tests;
