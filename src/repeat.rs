//! Loop/repeat state machine for the A-B region.
//!
//! The controller only decides. Every playback position report is turned into
//! a [`LoopAction`] that the session applies to the media backend, which keeps
//! the transitions testable without any audio.

use log::{debug, info};

use crate::region::LoopRegion;

/// Loop-count policy applied when playback reaches marker B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    X5,
    X10,
    Infinite,
}

impl RepeatMode {
    /// Number of passes before playback stops, `None` for unbounded or off.
    pub fn limit(self) -> Option<u32> {
        match self {
            RepeatMode::X5 => Some(5),
            RepeatMode::X10 => Some(10),
            RepeatMode::Off | RepeatMode::Infinite => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::X5 => "x5",
            RepeatMode::X10 => "x10",
            RepeatMode::Infinite => "Inf",
        }
    }
}

/// What the session must do after a position report
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopAction {
    /// Nothing to do
    Continue,
    /// Seek back to marker A and keep playing
    Rewind { to: f32 },
    /// Pause and park the playhead on marker B
    Stop { at: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct RepeatController {
    mode: RepeatMode,
    count: u32,
}

impl RepeatController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> RepeatMode {
        self.mode
    }

    /// Completed passes; only meaningful for the counted modes.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Select a mode button. Selecting the active mode again turns repeat off.
    pub fn select(&mut self, mode: RepeatMode) {
        self.mode = if self.mode == mode {
            RepeatMode::Off
        } else {
            mode
        };
        self.count = 0;
        info!("Repeat mode: {}", self.mode.label());
    }

    /// A marker moved. Counted modes start over; other modes are unaffected.
    pub fn on_region_changed(&mut self) {
        if self.mode.limit().is_some() && self.count != 0 {
            debug!("Region changed, repeat count reset from {}", self.count);
            self.count = 0;
        }
    }

    pub fn on_position(&mut self, position: f32, region: &LoopRegion) -> LoopAction {
        if position < region.b {
            return LoopAction::Continue;
        }

        match self.mode {
            RepeatMode::Infinite => LoopAction::Rewind { to: region.a },
            RepeatMode::Off => LoopAction::Stop { at: region.b },
            RepeatMode::X5 | RepeatMode::X10 => {
                let max = self.mode.limit().unwrap_or(1);
                if self.count + 1 >= max {
                    info!("Repeat {} finished after {} passes", self.mode.label(), max);
                    self.mode = RepeatMode::Off;
                    self.count = 0;
                    LoopAction::Stop { at: region.b }
                } else {
                    self.count += 1;
                    debug!("Repeat pass {}/{}", self.count, max);
                    LoopAction::Rewind { to: region.a }
                }
            }
        }
    }
}
