//! Rotating hints for the tips banner.
//!
//! Every `interval` the banner goes blank for [`HIDDEN_PHASE`], then shows the
//! next tip. The rotator is a pure function of the time elapsed since it was
//! started, so callers pass the current [`Instant`] explicitly.

use std::time::{Duration, Instant};

use crate::constants::TIPS;

/// How long the banner stays blank before each switch
pub const HIDDEN_PHASE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct TipRotator {
    tips: &'static [&'static str],
    interval: Duration,
    started: Instant,
}

impl TipRotator {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self::with_tips(TIPS, interval, now)
    }

    pub fn with_tips(tips: &'static [&'static str], interval: Duration, now: Instant) -> Self {
        Self {
            tips,
            interval: interval.max(HIDDEN_PHASE * 2),
            started: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Index of the tip shown (or about to be shown) at `now`.
    pub fn index_at(&self, now: Instant) -> usize {
        if self.tips.is_empty() {
            return 0;
        }
        let (cycles, phase) = self.cycle_at(now);
        let switches = if phase >= HIDDEN_PHASE {
            cycles
        } else {
            cycles.saturating_sub(1)
        };
        (switches % self.tips.len() as u128) as usize
    }

    /// Tip to draw at `now`, `None` while the banner is blank.
    pub fn current(&self, now: Instant) -> Option<&'static str> {
        let (cycles, phase) = self.cycle_at(now);
        if cycles > 0 && phase < HIDDEN_PHASE {
            return None;
        }
        self.tips.get(self.index_at(now)).copied()
    }

    /// Completed intervals and the time into the current one.
    fn cycle_at(&self, now: Instant) -> (u128, Duration) {
        let elapsed = now.saturating_duration_since(self.started);
        let interval_ms = self.interval.as_millis().max(1);
        let elapsed_ms = elapsed.as_millis();
        let cycles = elapsed_ms / interval_ms;
        let phase = Duration::from_millis((elapsed_ms % interval_ms) as u64);
        (cycles, phase)
    }
}
