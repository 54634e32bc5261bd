use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::audio::PlaybackEngine;
use crate::config::ControlsSettings;
use crate::ui;

use super::commands::{self, PlayerCmd};
use super::session::{PlayerView, SessionResult};

/// Full-screen player drawn on the alternate screen until the user backs out.
pub struct TerminalPlayer {
    controls: ControlsSettings,
}

impl TerminalPlayer {
    pub fn new(controls: ControlsSettings) -> Self {
        Self { controls }
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        engine: &mut PlaybackEngine,
    ) -> SessionResult<()> {
        let mut status = String::from("playing");
        let poll = Duration::from_millis(self.controls.poll_ms.max(1));

        loop {
            terminal.draw(|f| ui::draw_player(f, engine, &status, &self.controls))?;

            if !event::poll(poll)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(cmd) = commands::command_for_key(key.code) else {
                continue;
            };
            debug!(?cmd, "player command");
            if cmd == PlayerCmd::Back {
                return Ok(());
            }
            if let Some(message) = commands::apply(engine, cmd, self.controls.volume_step) {
                status = message;
            }
        }
    }
}

impl PlayerView for TerminalPlayer {
    fn show(&mut self, engine: &mut PlaybackEngine) -> SessionResult<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let run_result = self.event_loop(&mut terminal, engine);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        run_result
    }
}
