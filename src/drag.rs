//! Pointer-drag gestures over fixed-size tracks.
//!
//! A gesture starts with a pointer-down inside a control, keeps producing
//! values for every pointer move (wherever the pointer goes) and ends on
//! pointer-up. The mappings are plain functions of the pointer position and
//! the control's bounding box, so any toolkit can feed synthetic pointer
//! sequences into [`DragController`].

use log::debug;

use crate::constants::{SPEED_MAX, SPEED_MIN, VOLUME_MAX};

/// Bounding box of a control, in the same units as [`Pointer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, pointer: Pointer) -> bool {
        pointer.x >= self.left
            && pointer.x <= self.left + self.width
            && pointer.y >= self.top
            && pointer.y <= self.top + self.height
    }

    /// Horizontal position as a fraction of the width, clamped to `0.0..=1.0`.
    fn fraction_x(&self, x: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        ((x - self.left) / self.width).clamp(0.0, 1.0)
    }

    /// Vertical position as a percentage from the bottom edge (top = 100).
    fn percent_from_bottom(&self, y: f32) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (100.0 - ((y - self.top) / self.height) * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Volume in percent for a vertical pointer position (top = 100, bottom = 0).
pub fn volume_at(bounds: &Bounds, y: f32) -> u8 {
    (bounds.percent_from_bottom(y).round() as u8).min(VOLUME_MAX)
}

/// Playback speed for a vertical pointer position, rounded to one decimal.
pub fn speed_at(bounds: &Bounds, y: f32) -> f32 {
    let speed = SPEED_MIN + (bounds.percent_from_bottom(y) / 100.0) * (SPEED_MAX - SPEED_MIN);
    (speed * 10.0).round() / 10.0
}

/// Track time for a horizontal pointer position.
pub fn time_at(bounds: &Bounds, x: f32, duration: f32) -> f32 {
    bounds.fraction_x(x) * duration.max(0.0)
}

/// Track time for a marker handle, snapped to whole seconds.
pub fn marker_time_at(bounds: &Bounds, x: f32, duration: f32) -> f32 {
    time_at(bounds, x, duration).round()
}

/// Control being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Volume,
    Speed,
    MarkerA,
    MarkerB,
    Seek,
}

/// A value produced by a gesture, ready for the session to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragValue {
    Volume(u8),
    Speed(f32),
    MarkerA(f32),
    MarkerB(f32),
    Seek(f32),
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    target: DragTarget,
    bounds: Bounds,
}

/// The single active gesture, if any.
///
/// Only one gesture runs at a time: beginning a new one ends the previous
/// gesture first.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<Gesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<DragTarget> {
        self.active.map(|gesture| gesture.target)
    }

    pub fn is_dragging(&self, target: DragTarget) -> bool {
        self.active() == Some(target)
    }

    /// Start a gesture. Returns the first value, or `None` when the pointer is
    /// outside the control.
    pub fn begin(
        &mut self,
        target: DragTarget,
        bounds: Bounds,
        pointer: Pointer,
        duration: f32,
    ) -> Option<DragValue> {
        if !bounds.contains(pointer) {
            return None;
        }
        if let Some(previous) = self.active.take() {
            debug!("Drag {:?} superseded by {:?}", previous.target, target);
        }
        debug!("Drag {target:?} started");
        self.active = Some(Gesture { target, bounds });
        self.update(pointer, duration)
    }

    /// Feed a pointer move. The pointer may be anywhere on screen.
    pub fn update(&self, pointer: Pointer, duration: f32) -> Option<DragValue> {
        let gesture = self.active?;
        let bounds = &gesture.bounds;
        let value = match gesture.target {
            DragTarget::Volume => DragValue::Volume(volume_at(bounds, pointer.y)),
            DragTarget::Speed => DragValue::Speed(speed_at(bounds, pointer.y)),
            DragTarget::MarkerA => DragValue::MarkerA(marker_time_at(bounds, pointer.x, duration)),
            DragTarget::MarkerB => DragValue::MarkerB(marker_time_at(bounds, pointer.x, duration)),
            DragTarget::Seek => DragValue::Seek(time_at(bounds, pointer.x, duration)),
        };
        Some(value)
    }

    /// The control moved or resized mid-gesture.
    pub fn rebind(&mut self, target: DragTarget, bounds: Bounds) {
        if let Some(gesture) = self.active.as_mut()
            && gesture.target == target
        {
            gesture.bounds = bounds;
        }
    }

    pub fn end(&mut self) -> Option<DragTarget> {
        let ended = self.active.take().map(|gesture| gesture.target);
        if let Some(target) = ended {
            debug!("Drag {target:?} ended");
        }
        ended
    }
}
