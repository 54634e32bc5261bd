use std::env;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::accounts::UserDirectory;
use crate::audio::{PlaybackEngine, SystemClock, select_backend};
use crate::config;
use crate::library::{Catalog, scan};
use crate::logging;

mod commands;
mod console;
mod player_screen;
mod session;
mod settings;


use console::Console;
use player_screen::TerminalPlayer;
use session::Session;

/// Demo songs first, then whatever the music directory holds.
fn build_catalog(dir: Option<PathBuf>, library: &config::LibrarySettings) -> Catalog {
    let mut catalog = if library.include_demo_catalog {
        Catalog::demo()
    } else {
        Catalog::new()
    };

    if let Some(dir) = dir {
        if dir.is_dir() {
            catalog.add_tracks(scan(&dir, library));
        } else {
            warn!(dir = %dir.display(), "music directory not found, skipping scan");
        }
    }
    catalog
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let _log_guard = logging::init(&settings.logging)?;

    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.music_dir.clone());

    let catalog = build_catalog(dir, &settings.library);
    if catalog.is_empty() {
        warn!("catalog is empty");
    }
    let users = UserDirectory::demo(&catalog);
    info!(
        tracks = catalog.tracks().len(),
        albums = catalog.albums().len(),
        users = users.users().len(),
        "library ready"
    );

    let backend = select_backend(&settings.audio);
    let mut engine = PlaybackEngine::new(backend, Box::new(SystemClock), &settings.audio);

    let stdin = std::io::stdin();
    let console = Console::new(stdin.lock(), std::io::stdout());
    let player = TerminalPlayer::new(settings.controls.clone());

    let result = Session::new(console, catalog, users, &mut engine, player).run();
    info!("session finished");
    result
}
