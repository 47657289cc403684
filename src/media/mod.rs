//! Seam to the external media-playback collaborator.
//!
//! The session never decodes audio. It talks to a [`MediaBackend`] that can
//! load a source, play, pause, seek and change volume or rate, and that reports
//! back through [`MediaEvent`]s which the session consumes in emission order.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A user-selected file: display name, byte size and where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Build from a path on disk, reading its size from the file system.
    pub fn from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(format!("{} is not a file", path.display()).into());
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string();
        Ok(Self::new(name, meta.len(), path))
    }
}

/// A playable resource created by the backend for one file.
///
/// Handles are exclusively owned by the session and must be handed back with
/// [`MediaBackend::release`] once the file is replaced, removed or the session
/// ends.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MediaHandle {
    id: Uuid,
}

impl MediaHandle {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for MediaHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Notifications emitted by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The loaded source is ready and its duration (seconds) is known
    MetadataReady { duration: f32 },
    /// Playback position advanced (seconds)
    PositionAdvanced(f32),
    /// Playback reached the end of the source
    Ended,
    /// The backend could not decode or play the source
    Failed(String),
}

pub trait MediaBackend {
    /// Create a playable resource for `file`.
    fn open(&mut self, file: &MediaFile) -> Result<MediaHandle, Box<dyn Error>>;

    /// Free the resource behind `handle`.
    fn release(&mut self, handle: MediaHandle);

    /// Make `handle` the current source, paused at position 0.
    fn load(&mut self, handle: &MediaHandle) -> Result<(), Box<dyn Error>>;

    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, seconds: f32);

    /// Output gain in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);

    /// Playback rate multiplier.
    fn set_speed(&mut self, speed: f32);

    /// Drain pending notifications, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
