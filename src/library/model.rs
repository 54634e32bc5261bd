//! Media items: tracks, playlists and albums, plus the `MediaItem` union the
//! playback engine expands into a queue.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};

/// A single playable song. Immutable once built; shared as `Arc<Track>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub path: PathBuf,
    pub duration: Duration,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        genre: impl Into<String>,
        path: impl Into<PathBuf>,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
            path: path.into(),
            duration,
        }
    }

    /// "Title - Artist", as shown in menus.
    pub fn display(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.title, self.duration.as_secs())
    }
}

/// A user-owned, editable list of tracks.
///
/// `duration` is maintained incrementally by [`Playlist::add_track`] and
/// [`Playlist::remove_track`] and always equals the sum of its tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    title: String,
    description: String,
    tracks: Vec<Arc<Track>>,
    duration: Duration,
}

impl Playlist {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tracks: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn add_track(&mut self, track: Arc<Track>) {
        self.duration += track.duration;
        self.tracks.push(track);
    }

    /// Remove the first track equal to `track`. Returns the removed entry.
    pub fn remove_track(&mut self, track: &Track) -> Option<Arc<Track>> {
        let pos = self.tracks.iter().position(|t| t.as_ref() == track)?;
        let removed = self.tracks.remove(pos);
        self.duration = self.duration.saturating_sub(removed.duration);
        Some(removed)
    }

    pub fn expand(&self) -> Result<Vec<Arc<Track>>> {
        if self.tracks.is_empty() {
            return Err(Error::EmptyCollection(self.title.clone()));
        }
        Ok(self.tracks.clone())
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} tracks, {}s)",
            self.title,
            self.tracks.len(),
            self.duration.as_secs()
        )
    }
}

/// A fixed release. Tracks and duration are set at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    title: String,
    artist: String,
    tracks: Vec<Arc<Track>>,
    duration: Duration,
}

impl Album {
    /// Build an album; an empty track list is a data-integrity error.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        tracks: Vec<Arc<Track>>,
    ) -> Result<Self> {
        let title = title.into();
        if tracks.is_empty() {
            return Err(Error::EmptyCollection(title));
        }
        let duration = tracks.iter().map(|t| t.duration).sum();
        Ok(Self {
            title,
            artist: artist.into(),
            tracks,
            duration,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn expand(&self) -> Result<Vec<Arc<Track>>> {
        if self.tracks.is_empty() {
            return Err(Error::EmptyCollection(self.title.clone()));
        }
        Ok(self.tracks.clone())
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}s)",
            self.title,
            self.artist,
            self.duration.as_secs()
        )
    }
}

/// Anything that can be handed to the playback engine.
#[derive(Debug, Clone, Copy)]
pub enum MediaItem<'a> {
    Track(&'a Arc<Track>),
    Playlist(&'a Playlist),
    Album(&'a Album),
}

impl MediaItem<'_> {
    pub fn title(&self) -> &str {
        match self {
            MediaItem::Track(t) => &t.title,
            MediaItem::Playlist(p) => p.title(),
            MediaItem::Album(a) => a.title(),
        }
    }

    /// The ordered tracks this item contributes to a queue.
    pub fn expand(&self) -> Result<Vec<Arc<Track>>> {
        match self {
            MediaItem::Track(t) => Ok(vec![Arc::clone(t)]),
            MediaItem::Playlist(p) => p.expand(),
            MediaItem::Album(a) => a.expand(),
        }
    }
}

impl<'a> From<&'a Arc<Track>> for MediaItem<'a> {
    fn from(track: &'a Arc<Track>) -> Self {
        MediaItem::Track(track)
    }
}

impl<'a> From<&'a Playlist> for MediaItem<'a> {
    fn from(playlist: &'a Playlist) -> Self {
        MediaItem::Playlist(playlist)
    }
}

impl<'a> From<&'a Album> for MediaItem<'a> {
    fn from(album: &'a Album) -> Self {
        MediaItem::Album(album)
    }
}
