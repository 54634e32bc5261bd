//! Music library: media item types, the in-memory catalog and the
//! filesystem scanner that feeds it.

mod catalog;
mod model;
mod scan;

pub use catalog::Catalog;
pub use model::{Album, MediaItem, Playlist, Track};
pub use scan::scan;
