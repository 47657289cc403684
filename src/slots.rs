//! Five save/recall slots for loop regions.
//!
//! While a slot is selected, every user edit of the region is written into it.
//! Selecting a different slot recalls its region if it holds one, or claims it
//! with the current region if it is empty.

use log::debug;

use crate::constants::SLOT_COUNT;
use crate::error::{SessionError, SessionResult};
use crate::region::LoopRegion;

/// A 1-based slot number in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn new(number: usize) -> SessionResult<Self> {
        if (1..=SLOT_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SessionError::InvalidSlot(number))
        }
    }

    pub fn number(self) -> usize {
        self.0
    }

    fn offset(self) -> usize {
        self.0 - 1
    }

    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (1..=SLOT_COUNT).map(SlotIndex)
    }
}

impl TryFrom<usize> for SlotIndex {
    type Error = SessionError;

    fn try_from(number: usize) -> SessionResult<Self> {
        Self::new(number)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkerSlots {
    slots: [Option<LoopRegion>; SLOT_COUNT],
    selected: Option<SlotIndex>,
}

impl MarkerSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<SlotIndex> {
        self.selected
    }

    pub fn get(&self, index: SlotIndex) -> Option<LoopRegion> {
        self.slots[index.offset()]
    }

    pub fn is_populated(&self, index: SlotIndex) -> bool {
        self.get(index).is_some()
    }

    /// Select `index`, returning the region to restore when one was saved there.
    ///
    /// Reselecting the current slot changes nothing.
    pub fn select(&mut self, index: SlotIndex, current: LoopRegion) -> Option<LoopRegion> {
        if self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);

        match self.slots[index.offset()] {
            Some(saved) => {
                debug!("Recalled slot {}: {:.0}-{:.0}", index.number(), saved.a, saved.b);
                Some(saved)
            }
            None => {
                self.slots[index.offset()] = Some(current);
                None
            }
        }
    }

    /// Save the region into the selected slot, if any.
    pub fn record(&mut self, region: LoopRegion) {
        if let Some(index) = self.selected {
            self.slots[index.offset()] = Some(region);
        }
    }

    pub fn clear(&mut self, index: SlotIndex) {
        self.slots[index.offset()] = None;
        if self.selected == Some(index) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: usize) -> SlotIndex {
        SlotIndex::new(n).unwrap()
    }

    #[test]
    fn test_slot_index_bounds() {
        assert!(SlotIndex::new(0).is_err());
        assert!(SlotIndex::new(6).is_err());
        assert_eq!(SlotIndex::try_from(5).unwrap().number(), 5);
        assert_eq!(SlotIndex::all().count(), 5);
    }

    #[test]
    fn test_record_without_selection_is_ignored() {
        let mut slots = MarkerSlots::new();
        slots.record(LoopRegion { a: 1.0, b: 2.0 });
        assert!(SlotIndex::all().all(|i| !slots.is_populated(i)));
    }

    #[test]
    fn test_round_trip() {
        let mut slots = MarkerSlots::new();
        let full = LoopRegion::full(100.0);
        let practice = LoopRegion { a: 5.0, b: 50.0 };

        assert_eq!(slots.select(slot(2), full), None);
        slots.record(practice);

        // Empty slot is claimed with the current region, nothing to restore
        assert_eq!(slots.select(slot(3), practice), None);
        assert_eq!(slots.get(slot(3)), Some(practice));

        slots.record(LoopRegion { a: 60.0, b: 70.0 });
        assert_eq!(slots.select(slot(2), LoopRegion { a: 60.0, b: 70.0 }), Some(practice));
        assert_eq!(slots.selected(), Some(slot(2)));
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut slots = MarkerSlots::new();
        let region = LoopRegion { a: 5.0, b: 50.0 };
        slots.select(slot(1), region);
        assert_eq!(slots.select(slot(1), LoopRegion::full(10.0)), None);
        assert_eq!(slots.get(slot(1)), Some(region));
    }

    #[test]
    fn test_clear_deselects() {
        let mut slots = MarkerSlots::new();
        slots.select(slot(4), LoopRegion::full(10.0));
        slots.clear(slot(4));
        assert!(!slots.is_populated(slot(4)));
        assert_eq!(slots.selected(), None);
    }
}
