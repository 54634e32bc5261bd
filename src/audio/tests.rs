use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::backend::{AudioBackend, BackendFault, NullBackend};
use super::clock::ManualClock;
use super::engine::PlaybackEngine;
use super::queue::PlaybackQueue;
use super::types::{PlaybackState, SkipBack};
use crate::config::AudioSettings;
use crate::error::Error;
use crate::library::{Album, MediaItem, Playlist, Track};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Resume,
    Stop,
    Volume(f32),
}

#[derive(Debug, Default)]
struct FakeState {
    available: bool,
    reject_loads: bool,
    active: bool,
    position: Duration,
    calls: Vec<Call>,
}

/// Records every call; its behavior is steered through the shared state.
#[derive(Clone, Default)]
struct FakeBackend(Rc<RefCell<FakeState>>);

impl FakeBackend {
    fn available() -> Self {
        let fake = Self::default();
        fake.0.borrow_mut().available = true;
        fake
    }

    fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    fn loads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Load(_)))
            .count()
    }

    fn clear_calls(&self) {
        self.0.borrow_mut().calls.clear();
    }

    fn record(&self, call: Call) {
        self.0.borrow_mut().calls.push(call);
    }
}

impl AudioBackend for FakeBackend {
    fn init(&mut self) -> Result<(), BackendFault> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.0.borrow().available
    }

    fn load_file(&mut self, path: &Path) -> Result<(), BackendFault> {
        self.record(Call::Load(path.to_path_buf()));
        if self.0.borrow().reject_loads {
            return Err(BackendFault::Decode {
                path: path.to_path_buf(),
                reason: "garbage".to_string(),
            });
        }
        Ok(())
    }

    fn play(&mut self) {
        self.record(Call::Play);
    }

    fn pause(&mut self) {
        self.record(Call::Pause);
    }

    fn resume(&mut self) {
        self.record(Call::Resume);
    }

    fn stop(&mut self) {
        self.record(Call::Stop);
    }

    fn set_volume(&mut self, level: f32) {
        self.record(Call::Volume(level));
    }

    fn is_active(&self) -> bool {
        self.0.borrow().active
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }
}

fn track_at(title: &str, secs: u64, path: impl Into<PathBuf>) -> Arc<Track> {
    Arc::new(Track::new(
        title,
        "Artist",
        "Album",
        "Pop",
        path,
        Duration::from_secs(secs),
    ))
}

/// A(294s), B(354s), C(233s) with paths that do not exist.
fn abc() -> Vec<Arc<Track>> {
    vec![
        track_at("A", 294, "/nonexistent/a.mp3"),
        track_at("B", 354, "/nonexistent/b.mp3"),
        track_at("C", 233, "/nonexistent/c.mp3"),
    ]
}

fn playlist(tracks: &[Arc<Track>]) -> Playlist {
    let mut pl = Playlist::new("Mix Verano", "test");
    for t in tracks {
        pl.add_track(Arc::clone(t));
    }
    pl
}

fn engine_with(backend: Box<dyn AudioBackend>) -> (PlaybackEngine, ManualClock) {
    let clock = ManualClock::new();
    let engine = PlaybackEngine::new(backend, Box::new(clock.clone()), &AudioSettings::default());
    (engine, clock)
}

fn simulated_engine() -> (PlaybackEngine, ManualClock) {
    engine_with(Box::new(NullBackend))
}

fn current_title(engine: &PlaybackEngine) -> String {
    engine.current_track().map(|t| t.title.clone()).unwrap_or_default()
}

// --- queue ---

#[test]
fn empty_queue_has_no_cursor() {
    let mut q = PlaybackQueue::new();
    assert_eq!(q.cursor(), None);
    assert!(q.current().is_none());
    assert!(!q.advance());
    assert!(!q.step_back());
}

#[test]
fn queue_advance_wraps_and_step_back_stops_at_zero() {
    let mut q = PlaybackQueue::new();
    q.replace(abc());
    assert_eq!(q.cursor(), Some(0));
    assert!(!q.step_back());

    q.advance();
    q.advance();
    assert_eq!(q.cursor(), Some(2));
    q.advance();
    assert_eq!(q.cursor(), Some(0));

    q.clear();
    assert_eq!(q.cursor(), None);
}

// --- load ---

#[test]
fn new_engine_is_stopped_with_configured_volume() {
    let fake = FakeBackend::available();
    let (engine, _) = engine_with(Box::new(fake.clone()));
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert!(engine.queue().is_empty());
    assert_eq!(engine.cursor(), None);
    assert_eq!(engine.volume(), 0.5);
    assert_eq!(fake.calls(), vec![Call::Volume(0.5)]);
}

#[test]
fn loading_three_track_playlist_plays_first_in_order() {
    let tracks = abc();
    let pl = playlist(&tracks);
    let (mut engine, _) = simulated_engine();

    engine.load(&pl).unwrap();

    assert_eq!(engine.cursor(), Some(0));
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(engine.queue().tracks(), pl.tracks());
    assert_eq!(current_title(&engine), "A");
}

#[test]
fn loading_single_track_queues_just_that_track() {
    let tracks = abc();
    let (mut engine, _) = simulated_engine();

    engine.load(&tracks[1]).unwrap();
    assert_eq!(engine.queue().len(), 1);
    assert_eq!(current_title(&engine), "B");
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn loading_album_queues_its_tracks() {
    let album = Album::new("Thriller", "MJ", abc()).unwrap();
    let (mut engine, _) = simulated_engine();

    engine.load(MediaItem::Album(&album)).unwrap();
    assert_eq!(engine.queue().len(), 3);
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn loading_empty_playlist_reports_and_never_plays() {
    let (mut engine, _) = simulated_engine();
    let empty = Playlist::new("Nothing", "");

    assert_eq!(
        engine.load(&empty),
        Err(Error::EmptyCollection("Nothing".to_string()))
    );
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert!(engine.queue().is_empty());
    assert_eq!(engine.cursor(), None);
}

#[test]
fn loading_empty_playlist_drops_what_was_playing() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    let pl = playlist(&abc());
    engine.load(&pl).unwrap();
    fake.clear_calls();

    assert!(engine.load(&Playlist::new("Nothing", "")).is_err());
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert!(engine.queue().is_empty());
    assert!(engine.current_track().is_none());
    assert!(fake.calls().contains(&Call::Stop));
}

#[test]
fn reload_replaces_queue() {
    let tracks = abc();
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&tracks)).unwrap();
    engine.next();

    engine.load(&tracks[2]).unwrap();
    assert_eq!(engine.queue().len(), 1);
    assert_eq!(engine.cursor(), Some(0));
    assert_eq!(current_title(&engine), "C");
}

// --- backend fallback ---

#[test]
fn null_backend_plays_in_simulated_mode() {
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    assert!(engine.is_simulated());
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn missing_file_simulates_without_touching_backend_load() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));

    engine.load(&playlist(&abc())).unwrap();
    assert!(engine.is_simulated());
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(fake.loads(), 0);
}

#[test]
fn existing_file_plays_through_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.mp3");
    std::fs::write(&path, b"audio").unwrap();

    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    fake.clear_calls();

    engine.load(&track_at("A", 10, &path)).unwrap();
    assert!(!engine.is_simulated());
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(
        fake.calls(),
        vec![Call::Stop, Call::Stop, Call::Load(path), Call::Play]
    );
}

#[test]
fn backend_rejection_falls_back_to_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mp3");
    std::fs::write(&path, b"not audio").unwrap();

    let fake = FakeBackend::available();
    fake.0.borrow_mut().reject_loads = true;
    let (mut engine, _) = engine_with(Box::new(fake.clone()));

    assert!(engine.load(&track_at("Broken", 10, &path)).is_ok());
    assert!(engine.is_simulated());
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(fake.loads(), 1);
    assert!(!fake.calls().contains(&Call::Play));
}

#[test]
fn simulated_pause_and_resume_skip_the_backend() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    engine.load(&playlist(&abc())).unwrap();
    fake.clear_calls();

    engine.pause();
    assert_eq!(engine.state(), PlaybackState::Paused);
    engine.resume();
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert!(fake.calls().is_empty());
}

#[test]
fn real_pause_and_resume_reach_the_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.mp3");
    std::fs::write(&path, b"audio").unwrap();

    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    engine.load(&track_at("A", 10, &path)).unwrap();
    fake.clear_calls();

    engine.pause();
    engine.resume();
    assert_eq!(fake.calls(), vec![Call::Pause, Call::Resume]);
}

// --- transport ---

#[test]
fn pause_when_stopped_is_noop() {
    let (mut engine, _) = simulated_engine();
    engine.pause();
    assert_eq!(engine.state(), PlaybackState::Stopped);
}

#[test]
fn resume_when_playing_is_noop() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    engine.load(&playlist(&abc())).unwrap();
    fake.clear_calls();

    engine.resume();
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert!(fake.calls().is_empty());
}

#[test]
fn pause_twice_stays_paused() {
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.pause();
    engine.pause();
    assert_eq!(engine.state(), PlaybackState::Paused);
}

#[test]
fn stop_keeps_queue_and_cursor() {
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.next();

    engine.stop();
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert_eq!(engine.queue().len(), 3);
    assert_eq!(engine.cursor(), Some(1));

    engine.resume();
    assert_eq!(engine.state(), PlaybackState::Stopped);
}

#[test]
fn toggle_cycles_and_replays_after_stop() {
    let (mut engine, _) = simulated_engine();
    engine.toggle();
    assert_eq!(engine.state(), PlaybackState::Stopped);

    engine.load(&playlist(&abc())).unwrap();
    engine.toggle();
    assert_eq!(engine.state(), PlaybackState::Paused);
    engine.toggle();
    assert_eq!(engine.state(), PlaybackState::Playing);

    engine.next();
    engine.stop();
    engine.toggle();
    assert_eq!(engine.state(), PlaybackState::Playing);
    assert_eq!(current_title(&engine), "B");
}

#[test]
fn next_walks_the_queue_and_loops() {
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();

    engine.next();
    assert_eq!(engine.cursor(), Some(1));
    assert_eq!(current_title(&engine), "B");
    engine.next();
    assert_eq!(engine.cursor(), Some(2));
    assert_eq!(current_title(&engine), "C");
    engine.next();
    assert_eq!(engine.cursor(), Some(0));
    assert_eq!(current_title(&engine), "A");
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn next_len_times_returns_to_start() {
    for len in 1..=5 {
        let tracks: Vec<Arc<Track>> = (0..len)
            .map(|i| track_at(&format!("T{i}"), 10, format!("/nonexistent/{i}.mp3")))
            .collect();
        let (mut engine, _) = simulated_engine();
        engine.load(&playlist(&tracks)).unwrap();

        for _ in 0..len {
            engine.next();
        }
        assert_eq!(engine.cursor(), Some(0), "queue of {len}");
    }
}

#[test]
fn next_on_empty_queue_stays_stopped() {
    let (mut engine, _) = simulated_engine();
    engine.next();
    assert_eq!(engine.state(), PlaybackState::Stopped);
    assert_eq!(engine.previous(), None);
    assert_eq!(engine.state(), PlaybackState::Stopped);
}

#[test]
fn next_from_paused_starts_playing() {
    let (mut engine, _) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.pause();
    engine.next();
    assert_eq!(engine.state(), PlaybackState::Playing);
}

// --- previous ---

#[test]
fn previous_right_after_start_steps_back() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.next();
    engine.next();
    assert_eq!(engine.cursor(), Some(2));

    clock.advance(Duration::from_secs(2));
    assert_eq!(engine.previous(), Some(SkipBack::MovedBack));
    assert_eq!(engine.cursor(), Some(1));
    assert_eq!(engine.state(), PlaybackState::Playing);
}

#[test]
fn previous_after_threshold_restarts_current() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.next();

    clock.advance(Duration::from_secs(7));
    assert_eq!(engine.previous(), Some(SkipBack::RestartedCurrent));
    assert_eq!(engine.cursor(), Some(1));
    assert_eq!(engine.elapsed(), Duration::ZERO);
}

#[test]
fn previous_after_six_seconds_restarts_same_track() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.next();
    clock.advance(Duration::from_secs(6));

    engine.previous();
    assert_eq!(engine.cursor(), Some(1));
    assert_eq!(current_title(&engine), "B");
}

#[test]
fn previous_at_exactly_threshold_still_steps_back() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    engine.next();
    clock.advance(Duration::from_secs(5));

    assert_eq!(engine.previous(), Some(SkipBack::MovedBack));
    assert_eq!(engine.cursor(), Some(0));
}

#[test]
fn previous_on_first_track_restarts_it() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();
    clock.advance(Duration::from_secs(1));

    assert_eq!(engine.previous(), Some(SkipBack::RestartedCurrent));
    assert_eq!(engine.cursor(), Some(0));
    assert_eq!(engine.elapsed(), Duration::ZERO);
}

#[test]
fn previous_prefers_backend_position_while_active() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    std::fs::write(&a, b"audio").unwrap();
    std::fs::write(&b, b"audio").unwrap();
    let tracks = vec![track_at("A", 100, &a), track_at("B", 100, &b)];

    let fake = FakeBackend::available();
    let (mut engine, clock) = engine_with(Box::new(fake.clone()));
    engine.load(&playlist(&tracks)).unwrap();
    engine.next();

    // Wall clock says 1s, the backend says 30s of audio went out.
    clock.advance(Duration::from_secs(1));
    {
        let mut state = fake.0.borrow_mut();
        state.active = true;
        state.position = Duration::from_secs(30);
    }
    assert_eq!(engine.elapsed(), Duration::from_secs(30));
    assert_eq!(engine.previous(), Some(SkipBack::RestartedCurrent));
    assert_eq!(engine.cursor(), Some(1));
}

#[test]
fn previous_uses_wall_clock_when_backend_inactive() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    std::fs::write(&a, b"audio").unwrap();
    std::fs::write(&b, b"audio").unwrap();
    let tracks = vec![track_at("A", 100, &a), track_at("B", 100, &b)];

    let fake = FakeBackend::available();
    let (mut engine, clock) = engine_with(Box::new(fake.clone()));
    engine.load(&playlist(&tracks)).unwrap();
    engine.next();

    fake.0.borrow_mut().position = Duration::from_secs(30);
    clock.advance(Duration::from_secs(2));
    assert_eq!(engine.elapsed(), Duration::from_secs(2));
    assert_eq!(engine.previous(), Some(SkipBack::MovedBack));
    assert_eq!(engine.cursor(), Some(0));
}

#[test]
fn play_time_holds_still_while_paused() {
    let (mut engine, clock) = simulated_engine();
    engine.load(&playlist(&abc())).unwrap();

    clock.advance(Duration::from_secs(3));
    engine.pause();
    clock.advance(Duration::from_secs(10));
    assert_eq!(engine.play_time(), Duration::from_secs(3));
    // The restart rule still counts the paused stretch.
    assert_eq!(engine.elapsed(), Duration::from_secs(13));

    engine.resume();
    clock.advance(Duration::from_secs(2));
    assert_eq!(engine.play_time(), Duration::from_secs(5));

    engine.next();
    assert_eq!(engine.play_time(), Duration::ZERO);
}

#[test]
fn play_time_reads_the_backend_while_paused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.mp3");
    std::fs::write(&path, b"audio").unwrap();

    let fake = FakeBackend::available();
    let (mut engine, clock) = engine_with(Box::new(fake.clone()));
    engine.load(&track_at("A", 100, &path)).unwrap();
    engine.pause();

    fake.0.borrow_mut().position = Duration::from_secs(42);
    clock.advance(Duration::from_secs(60));
    assert_eq!(engine.play_time(), Duration::from_secs(42));
}

#[test]
fn custom_threshold_is_honored() {
    let settings = AudioSettings {
        restart_threshold_secs: 1.0,
        ..AudioSettings::default()
    };
    let clock = ManualClock::new();
    let mut engine = PlaybackEngine::new(Box::new(NullBackend), Box::new(clock.clone()), &settings);
    engine.load(&playlist(&abc())).unwrap();
    engine.next();

    clock.advance(Duration::from_secs(2));
    assert_eq!(engine.previous(), Some(SkipBack::RestartedCurrent));
}

// --- volume ---

#[test]
fn valid_volume_reads_back() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    for level in [0.0, 0.25, 0.5, 1.0] {
        engine.set_volume(level).unwrap();
        assert_eq!(engine.volume(), level);
    }
    assert!(fake.calls().contains(&Call::Volume(0.25)));
}

#[test]
fn out_of_range_volume_is_rejected_and_unchanged() {
    let fake = FakeBackend::available();
    let (mut engine, _) = engine_with(Box::new(fake.clone()));
    engine.set_volume(0.3).unwrap();
    fake.clear_calls();

    for level in [-0.1, 1.01, 5.0, f32::NAN] {
        let err = engine.set_volume(level).unwrap_err();
        assert!(matches!(err, Error::InvalidVolume(_)));
        assert_eq!(engine.volume(), 0.3);
    }
    assert!(fake.calls().is_empty());
}

#[test]
fn volume_works_without_a_backend() {
    let (mut engine, _) = simulated_engine();
    engine.set_volume(0.9).unwrap();
    assert_eq!(engine.volume(), 0.9);
}

#[test]
fn dropping_the_engine_stops_the_backend() {
    let fake = FakeBackend::available();
    let (engine, _) = engine_with(Box::new(fake.clone()));
    fake.clear_calls();
    drop(engine);
    assert_eq!(fake.calls(), vec![Call::Stop]);
}
