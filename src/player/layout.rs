//! Screen layout of the player card.
//!
//! Drawing and mouse hit-testing use the same [`CardLayout`], so a click lands
//! on exactly what was drawn in the previous frame.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use abrepeat::constants::SLOT_COUNT;
use abrepeat::drag::{Bounds, DragTarget};
use abrepeat::region::{LoopRegion, Marker};
use abrepeat::repeat::RepeatMode;

/// Clickable buttons on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Previous,
    StepBack,
    PlayPause,
    StepForward,
    Next,
    SetA,
    All,
    SetB,
    Repeat(RepeatMode),
    Slot(usize),
}

pub const TRANSPORT: [Button; 5] = [
    Button::Previous,
    Button::StepBack,
    Button::PlayPause,
    Button::StepForward,
    Button::Next,
];

pub const REGION_BUTTONS: [Button; 3] = [Button::SetA, Button::All, Button::SetB];

pub const REPEAT_BUTTONS: [Button; 3] = [
    Button::Repeat(RepeatMode::X5),
    Button::Repeat(RepeatMode::X10),
    Button::Repeat(RepeatMode::Infinite),
];

/// What a mouse-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Button(Button),
    Drag(DragTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub card: Rect,
    pub file: Rect,
    pub clock: Rect,
    /// Single row the playhead moves along
    pub track: Rect,
    /// Row below the track holding the A and B handles
    pub handles: Rect,
    pub labels: Rect,
    pub transport: [Rect; 5],
    pub region_buttons: [Rect; 3],
    pub repeat_buttons: [Rect; 3],
    /// Inside of the volume gauge, top row = 100
    pub volume: Rect,
    /// Inside of the speed gauge, top row = 3.0
    pub speed: Rect,
    pub volume_frame: Rect,
    pub speed_frame: Rect,
    pub slots: [Rect; SLOT_COUNT],
    pub tips: Rect,
    pub status: Rect,
}

fn split_even<const N: usize>(area: Rect) -> [Rect; N] {
    let constraints = vec![Constraint::Ratio(1, N as u32); N];
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    std::array::from_fn(|i| chunks[i])
}

fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Drag bounds of a cell rectangle: the first column/row maps to the low end,
/// the last one to the high end.
pub fn to_bounds(rect: Rect) -> Bounds {
    Bounds::new(
        rect.x as f32,
        rect.y as f32,
        rect.width.saturating_sub(1) as f32,
        rect.height.saturating_sub(1) as f32,
    )
}

impl CardLayout {
    pub fn new(area: Rect) -> Self {
        let card = area;
        let body = inner(card);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // file
                Constraint::Length(1), // clock
                Constraint::Length(1), // spacer
                Constraint::Length(1), // track
                Constraint::Length(1), // handles
                Constraint::Length(1), // labels
                Constraint::Length(3), // transport
                Constraint::Length(3), // region + repeat
                Constraint::Min(5),    // gauges
                Constraint::Length(3), // slots
                Constraint::Length(1), // tips
                Constraint::Length(1), // status
            ])
            .split(body);

        let track_row = rows[3].inner(ratatui::layout::Margin::new(1, 0));
        let handles = rows[4].inner(ratatui::layout::Margin::new(1, 0));
        let labels = rows[5].inner(ratatui::layout::Margin::new(1, 0));

        let [region_area, repeat_area] = split_even::<2>(rows[7]);
        let [volume_frame, speed_frame] = split_even::<2>(rows[8]);

        Self {
            card,
            file: rows[0],
            clock: rows[1],
            track: track_row,
            handles,
            labels,
            transport: split_even::<5>(rows[6]),
            region_buttons: split_even::<3>(region_area),
            repeat_buttons: split_even::<3>(repeat_area),
            volume: inner(volume_frame),
            speed: inner(speed_frame),
            volume_frame,
            speed_frame,
            slots: split_even::<SLOT_COUNT>(rows[9]),
            tips: rows[10],
            status: rows[11],
        }
    }

    /// Reference box for a drag target.
    pub fn bounds_for(&self, target: DragTarget) -> Bounds {
        match target {
            DragTarget::Volume => to_bounds(self.volume),
            DragTarget::Speed => to_bounds(self.speed),
            DragTarget::Seek => to_bounds(self.track),
            DragTarget::MarkerA | DragTarget::MarkerB => to_bounds(self.handles),
        }
    }

    /// Column of a time on the track.
    pub fn column_at(&self, seconds: f32, duration: f32) -> u16 {
        if duration <= 0.0 || self.track.width == 0 {
            return self.track.x;
        }
        let span = self.track.width.saturating_sub(1) as f32;
        let offset = ((seconds / duration).clamp(0.0, 1.0) * span).round() as u16;
        self.track.x + offset
    }

    /// Marker handle nearest to `column`, if one is close enough to grab.
    fn handle_at(&self, column: u16, region: LoopRegion, duration: f32) -> Option<Marker> {
        let a = self.column_at(region.a, duration);
        let b = self.column_at(region.b, duration);
        let dist_a = column.abs_diff(a);
        let dist_b = column.abs_diff(b);
        let (marker, dist) = if dist_a <= dist_b {
            (Marker::A, dist_a)
        } else {
            (Marker::B, dist_b)
        };
        (dist <= 1).then_some(marker)
    }

    pub fn hit(&self, column: u16, row: u16, region: LoopRegion, duration: f32) -> Option<Hit> {
        if contains(self.track, column, row) {
            return Some(Hit::Drag(DragTarget::Seek));
        }
        if contains(self.handles, column, row) {
            return self
                .handle_at(column, region, duration)
                .map(|marker| match marker {
                    Marker::A => Hit::Drag(DragTarget::MarkerA),
                    Marker::B => Hit::Drag(DragTarget::MarkerB),
                });
        }
        if contains(self.volume_frame, column, row) {
            return Some(Hit::Drag(DragTarget::Volume));
        }
        if contains(self.speed_frame, column, row) {
            return Some(Hit::Drag(DragTarget::Speed));
        }

        let buttons = self
            .transport
            .iter()
            .zip(TRANSPORT)
            .chain(self.region_buttons.iter().zip(REGION_BUTTONS))
            .chain(self.repeat_buttons.iter().zip(REPEAT_BUTTONS))
            .chain(
                self.slots
                    .iter()
                    .enumerate()
                    .map(|(i, rect)| (rect, Button::Slot(i + 1))),
            );
        for (rect, button) in buttons {
            if contains(*rect, column, row) {
                return Some(Hit::Button(button));
            }
        }
        None
    }
}
