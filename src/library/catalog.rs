use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

use super::model::{Album, Track};

/// The in-memory catalog every user browses.
#[derive(Debug, Default)]
pub struct Catalog {
    tracks: Vec<Arc<Track>>,
    albums: Vec<Album>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three songs the demo ships with. Their files usually do not exist,
    /// so they play in simulated mode.
    pub fn demo() -> Self {
        let mut catalog = Self::new();
        catalog.add_tracks([
            Track::new(
                "Billie Jean",
                "Michael Jackson",
                "Thriller",
                "Pop",
                "assets/01 Enter Pharloom.mp3",
                Duration::from_secs(294),
            ),
            Track::new(
                "Bohemian Rhapsody",
                "Queen",
                "A Night at the Opera",
                "Rock",
                "assets/musica/bohemian.mp3",
                Duration::from_secs(354),
            ),
            Track::new(
                "Shape of You",
                "Ed Sheeran",
                "Divide",
                "Pop",
                "assets/musica/shape.mp3",
                Duration::from_secs(233),
            ),
        ]);
        catalog
    }

    /// Append tracks and rebuild the album list.
    pub fn add_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks.into_iter().map(Arc::new));
        self.regroup_albums();
    }

    // Albums are keyed by (artist, album name) in first-seen order.
    fn regroup_albums(&mut self) {
        let mut groups: Vec<((String, String), Vec<Arc<Track>>)> = Vec::new();
        for track in &self.tracks {
            let key = (track.artist.clone(), track.album.clone());
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(Arc::clone(track)),
                None => groups.push((key, vec![Arc::clone(track)])),
            }
        }

        self.albums = groups
            .into_iter()
            .filter_map(|((artist, title), members)| match Album::new(title, artist, members) {
                Ok(album) => Some(album),
                Err(e) => {
                    warn!(error = %e, "skipping album");
                    None
                }
            })
            .collect();
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn track(&self, index: usize) -> Result<&Arc<Track>> {
        self.tracks.get(index).ok_or(Error::TrackNotFound(index))
    }

    pub fn album(&self, index: usize) -> Result<&Album> {
        self.albums.get(index).ok_or(Error::AlbumNotFound(index))
    }

    pub fn total_duration(&self) -> Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
