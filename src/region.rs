//! The A-B loop region used for repeat practice.
//!
//! A region is a playback window `[a, b]` measured in seconds. Marker A always
//! sits strictly before marker B; edits that would cross the markers are
//! clamped so the two stay at least [`MIN_MARKER_SEPARATION`] apart.

use crate::constants::MIN_MARKER_SEPARATION;

/// Which end of the region an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopRegion {
    pub a: f32,
    pub b: f32,
}

impl LoopRegion {
    /// Region covering the whole track.
    pub fn full(duration: f32) -> Self {
        Self {
            a: 0.0,
            b: duration.max(0.0),
        }
    }

    pub fn length(&self) -> f32 {
        self.b - self.a
    }

    /// Move marker A, never closer than the minimum separation to B.
    pub fn drag_a(&mut self, seconds: f32) {
        self.a = seconds.min(self.b - MIN_MARKER_SEPARATION).max(0.0);
    }

    /// Move marker B, never closer than the minimum separation to A.
    pub fn drag_b(&mut self, seconds: f32) {
        self.b = seconds.max(self.a + MIN_MARKER_SEPARATION);
    }

    pub fn drag(&mut self, marker: Marker, seconds: f32) {
        match marker {
            Marker::A => self.drag_a(seconds),
            Marker::B => self.drag_b(seconds),
        }
    }

    /// Half-open membership: a position sitting on B counts as outside.
    pub fn contains(&self, position: f32) -> bool {
        position >= self.a && position < self.b
    }

    pub fn clamp(&self, position: f32) -> f32 {
        position.clamp(self.a, self.b)
    }

    /// Fit a region recalled from another track into `[0, duration]`.
    ///
    /// Falls back to the full track when nothing of the region survives.
    pub fn clamped_to(&self, duration: f32) -> Self {
        let b = self.b.min(duration);
        let a = self.a.min(b - MIN_MARKER_SEPARATION).max(0.0);
        if a < b {
            Self { a, b }
        } else {
            Self::full(duration)
        }
    }
}
