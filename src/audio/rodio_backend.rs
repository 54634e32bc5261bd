//! `AudioBackend` on top of `rodio`.
//!
//! One `OutputStream` for the session and a fresh paused `Sink` per loaded
//! file. Sinks play on rodio's mixer thread, so every call here returns
//! immediately.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::backend::{AudioBackend, BackendFault};

pub struct RodioBackend {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioBackend {
    pub fn new() -> Self {
        Self {
            stream: None,
            sink: None,
            volume: 1.0,
        }
    }
}

impl AudioBackend for RodioBackend {
    fn init(&mut self) -> Result<(), BackendFault> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| BackendFault::Unavailable(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land on top of the UI.
        stream.log_on_drop(false);
        self.stream = Some(stream);
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.stream.is_some()
    }

    fn load_file(&mut self, path: &Path) -> Result<(), BackendFault> {
        let Some(stream) = self.stream.as_ref() else {
            return Err(BackendFault::Unavailable("output stream not opened".to_string()));
        };

        let file = File::open(path).map_err(|source| BackendFault::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| BackendFault::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();

        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        Ok(())
    }

    fn play(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn resume(&mut self) {
        self.play();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(level);
        }
    }

    fn is_active(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|s| !s.is_paused() && !s.empty())
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, |s| s.get_pos())
    }
}
