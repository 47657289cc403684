//! Error types for the playback session core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Upload attempted while the playlist is at its cap
    #[error("Only {max} files can be loaded at once")]
    PlaylistFull { max: usize },

    #[error("Marker slot {0} does not exist (valid slots are 1-5)")]
    InvalidSlot(usize),

    #[error("No file at playlist position {0}")]
    NoSuchFile(usize),

    /// The media-playback collaborator failed
    #[error("Playback backend error: {0}")]
    Backend(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
