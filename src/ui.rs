//! UI rendering for the player screen.
//!
//! The login and menu screens are plain text; only the player is drawn with
//! `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::audio::{PlaybackEngine, PlaybackState};
use crate::config::ControlsSettings;

const CONTROLS: [(&str, &str); 5] = [
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("+/-", "volume"),
    ("s", "stop"),
    ("q", "back to menu"),
];

fn controls_text(volume_step: f32) -> String {
    CONTROLS
        .iter()
        .map(|(key, what)| {
            if *key == "+/-" {
                format!("[{key}] {what} ±{}%", (volume_step * 100.0).round())
            } else {
                format!("[{key}] {what}")
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn padded() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Text for the "now playing" box.
pub fn now_playing_text(engine: &PlaybackEngine) -> String {
    let mut state = engine.state().label().to_string();
    if engine.is_simulated() && engine.state() != PlaybackState::Stopped {
        state.push_str(" (simulated)");
    }

    let Some(track) = engine.current_track() else {
        return format!("{state}\nNothing loaded");
    };

    let elapsed = engine.play_time().min(track.duration);
    format!(
        "{state}\n{} - {}\nAlbum: {}\n{} / {}",
        track.title,
        track.artist,
        track.album,
        format_mmss(elapsed),
        format_mmss(track.duration)
    )
}

/// Render the player screen: now playing, volume, queue, status and controls.
pub fn draw_player(
    frame: &mut Frame,
    engine: &PlaybackEngine,
    status: &str,
    controls: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new("console media library")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spotipy ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now_playing = Paragraph::new(now_playing_text(engine))
        .block(Block::bordered().padding(padded()).title(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    let volume = engine.volume().clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::bordered().title(" volume "))
        .ratio(f64::from(volume))
        .label(format!("{}%", (volume * 100.0).round()));
    frame.render_widget(gauge, chunks[2]);

    // Queue
    {
        let items: Vec<ListItem> = engine
            .queue()
            .tracks()
            .iter()
            .map(|t| ListItem::new(format!("{} [{}]", t.display(), format_mmss(t.duration))))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" queue "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(engine.cursor());
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let status_par = Paragraph::new(status.to_string())
        .italic()
        .block(Block::bordered().padding(padded()).title(" status "));
    frame.render_widget(status_par, chunks[4]);

    let footer = Paragraph::new(controls_text(controls.volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(padded()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}
