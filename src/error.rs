//! Caller-facing error type shared by the library, accounts and engine.
//!
//! Backend faults are not part of this enum: the playback
//! engine absorbs them (see `audio::BackendFault`).

use thiserror::Error;

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A playlist or album with no tracks was asked to expand.
    #[error("'{0}' has no tracks to play")]
    EmptyCollection(String),

    /// Volume outside `[0.0, 1.0]`.
    #[error("volume must be between 0.0 and 1.0 (got {0})")]
    InvalidVolume(f32),

    #[error("no account registered for {0}")]
    UserNotFound(String),

    #[error("wrong password for {0}")]
    WrongPassword(String),

    #[error("account {0} has been suspended by an administrator")]
    AccountBlocked(String),

    #[error("an account for {0} is already registered")]
    AlreadyRegistered(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("track #{0} is not in the catalog")]
    TrackNotFound(usize),

    #[error("playlist #{0} does not exist")]
    PlaylistNotFound(usize),

    #[error("album #{0} does not exist")]
    AlbumNotFound(usize),
}

impl Error {
    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }
}
