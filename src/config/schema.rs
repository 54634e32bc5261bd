use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/spotipy/config.toml` or `~/.config/spotipy/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPOTIPY__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied when the engine starts (0.0 - 1.0).
    pub initial_volume: f32,
    /// Never open an output device; every track plays in simulated mode.
    pub simulate_only: bool,
    /// "Previous" restarts the current track once it has played longer than this.
    pub restart_threshold_secs: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            simulate_only: false,
            restart_threshold_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Amount `+` / `-` change the volume by.
    pub volume_step: f32,
    /// How often the player screen polls for keys and redraws (milliseconds).
    pub poll_ms: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step: 0.1,
            poll_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned into the catalog. The first CLI argument wins over this.
    pub music_dir: Option<PathBuf>,
    /// Whether the built-in demo songs are part of the catalog.
    pub include_demo_catalog: bool,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: None,
            include_demo_catalog: true,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for the daily rolling log file.
    pub directory: PathBuf,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".logs"),
            filter: "spotipy=info".to_string(),
        }
    }
}
