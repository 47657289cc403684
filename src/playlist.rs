//! Bounded list of loaded files and the index of the one being played.

use crate::error::{SessionError, SessionResult};
use crate::media::{MediaFile, MediaHandle};

#[derive(Debug)]
pub struct PlaylistEntry {
    pub file: MediaFile,
    pub handle: MediaHandle,
}

#[derive(Debug)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
    current: Option<usize>,
    max: usize,
}

impl Playlist {
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: None,
            max: max.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&PlaylistEntry> {
        self.current.and_then(|i| self.entries.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn files(&self) -> impl Iterator<Item = &MediaFile> {
        self.entries.iter().map(|entry| &entry.file)
    }

    /// Check the cap before asking the backend for a handle.
    pub fn ensure_room(&self) -> SessionResult<()> {
        if self.is_full() {
            Err(SessionError::PlaylistFull { max: self.max })
        } else {
            Ok(())
        }
    }

    /// Append an entry, returning its index. The first entry becomes current.
    pub fn push(&mut self, entry: PlaylistEntry) -> SessionResult<usize> {
        self.ensure_room()?;
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        if self.current.is_none() {
            self.current = Some(index);
        }
        Ok(index)
    }

    /// Swap the entry at `index`, returning the one it replaced.
    pub fn replace(&mut self, index: usize, entry: PlaylistEntry) -> SessionResult<PlaylistEntry> {
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(SessionError::NoSuchFile(index))?;
        Ok(std::mem::replace(slot, entry))
    }

    /// Remove the entry at `index`, keeping `current` pointing at a valid entry.
    pub fn remove(&mut self, index: usize) -> SessionResult<PlaylistEntry> {
        if index >= self.entries.len() {
            return Err(SessionError::NoSuchFile(index));
        }
        let removed = self.entries.remove(index);
        if let Some(current) = self.current {
            if self.entries.is_empty() {
                self.current = None;
            } else if index < current {
                self.current = Some(current - 1);
            } else if current >= self.entries.len() {
                self.current = Some(self.entries.len() - 1);
            }
        }
        Ok(removed)
    }

    pub fn next_index(&self) -> Option<usize> {
        let current = self.current?;
        if self.entries.len() < 2 {
            return None;
        }
        Some((current + 1) % self.entries.len())
    }

    pub fn prev_index(&self) -> Option<usize> {
        let current = self.current?;
        if self.entries.len() < 2 {
            return None;
        }
        Some(if current > 0 {
            current - 1
        } else {
            self.entries.len() - 1
        })
    }

    pub fn set_current(&mut self, index: usize) -> SessionResult<()> {
        if index >= self.entries.len() {
            return Err(SessionError::NoSuchFile(index));
        }
        self.current = Some(index);
        Ok(())
    }

    /// Take every entry out, leaving the playlist empty.
    pub fn drain(&mut self) -> Vec<PlaylistEntry> {
        self.current = None;
        std::mem::take(&mut self.entries)
    }
}
