//! Player-screen commands: key bindings and how each one drives the engine.

use crossterm::event::KeyCode;

use crate::audio::{PlaybackEngine, SkipBack};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerCmd {
    TogglePause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    Stop,
    /// Leave the player screen; playback keeps going.
    Back,
}

pub fn command_for_key(code: KeyCode) -> Option<PlayerCmd> {
    match code {
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            Some(PlayerCmd::TogglePause)
        }
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Some(PlayerCmd::Next),
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => Some(PlayerCmd::Previous),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Some(PlayerCmd::VolumeUp),
        KeyCode::Char('-') | KeyCode::Down => Some(PlayerCmd::VolumeDown),
        KeyCode::Char('s') => Some(PlayerCmd::Stop),
        KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Esc => Some(PlayerCmd::Back),
        _ => None,
    }
}

// Hundredths, so repeated steps of 0.1 land exactly on 1.0 instead of 1.0000001.
fn stepped(volume: f32, delta: f32) -> f32 {
    ((volume + delta) * 100.0).round() / 100.0
}

/// Run `cmd` against `engine` and describe what happened for the status line.
pub fn apply(engine: &mut PlaybackEngine, cmd: PlayerCmd, volume_step: f32) -> Option<String> {
    match cmd {
        PlayerCmd::TogglePause => {
            engine.toggle();
            Some(engine.state().label().to_lowercase())
        }
        PlayerCmd::Next => {
            let len = engine.queue().len();
            let on_last = engine.cursor().is_some_and(|c| c + 1 == len);
            engine.next();
            match (len, on_last) {
                (0, _) => Some("queue is empty".to_string()),
                (1, _) => Some("restarted track".to_string()),
                (_, true) => Some("end of queue, back to the start".to_string()),
                (_, false) => Some("next track".to_string()),
            }
        }
        PlayerCmd::Previous => match engine.previous() {
            Some(SkipBack::MovedBack) => Some("previous track".to_string()),
            Some(SkipBack::RestartedCurrent) => Some("restarted track".to_string()),
            None => Some("queue is empty".to_string()),
        },
        PlayerCmd::VolumeUp | PlayerCmd::VolumeDown => {
            let delta = if cmd == PlayerCmd::VolumeUp {
                volume_step
            } else {
                -volume_step
            };
            match engine.set_volume(stepped(engine.volume(), delta)) {
                Ok(()) => Some(format!("volume {}%", (engine.volume() * 100.0).round())),
                Err(e) => Some(e.to_string()),
            }
        }
        PlayerCmd::Stop => {
            engine.stop();
            Some("stopped".to_string())
        }
        PlayerCmd::Back => None,
    }
}
