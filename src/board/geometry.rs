//! Drag and resize geometry: pointer deltas to slot deltas to new intervals

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::slots::SlotGrid;

/// Pixel size of one grid cell as rendered by the front end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub slot_width_px: f64,
    pub row_height_px: f64,
}

impl GridMetrics {
    pub fn new(slot_width_px: f64, row_height_px: f64) -> Self {
        Self {
            slot_width_px,
            row_height_px,
        }
    }

    /// Horizontal pixel delta rounded to the nearest whole slot.
    pub fn slot_delta(&self, dx: f64) -> i64 {
        snap_units(dx, self.slot_width_px)
    }

    /// Vertical pixel delta rounded to the nearest whole row.
    pub fn row_delta(&self, dy: f64) -> i64 {
        snap_units(dy, self.row_height_px)
    }
}

fn snap_units(delta: f64, unit: f64) -> i64 {
    if !delta.is_finite() || !unit.is_finite() || unit <= 0.0 {
        return 0;
    }
    (delta / unit).round() as i64
}

/// Meaning of a vertical move on the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAxis {
    /// Rows are not draggable targets (day view)
    #[default]
    Fixed,
    /// Each row is a calendar day (month view)
    Days,
    /// Each row is an owner (all-employee and equipment views)
    Owners,
}

/// Interval edge grabbed by a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Start,
    End,
}

/// Uncommitted preview of a drag or resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ghost {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Owner rows moved on a `RowAxis::Owners` view, zero otherwise
    pub row_delta: i64,
}

impl Ghost {
    pub fn unchanged(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            row_delta: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Time covered by `slots` grid slots, `None` when out of range.
fn slot_shift(grid: SlotGrid, slots: i64) -> Option<Duration> {
    grid.slot_duration()
        .num_seconds()
        .checked_mul(slots)
        .and_then(Duration::try_seconds)
}

/// Preview of moving `[start, end)` by a pointer delta. Duration is kept.
///
/// A delta that would leave the representable range yields an unmoved ghost.
pub fn move_ghost(
    grid: SlotGrid,
    metrics: &GridMetrics,
    axis: RowAxis,
    start: NaiveDateTime,
    end: NaiveDateTime,
    dx: f64,
    dy: f64,
) -> Ghost {
    let rows = metrics.row_delta(dy);
    let (day_shift, row_delta) = match axis {
        RowAxis::Fixed => (Some(Duration::zero()), 0),
        RowAxis::Days => (Duration::try_days(rows), 0),
        RowAxis::Owners => (Some(Duration::zero()), rows),
    };

    let moved = slot_shift(grid, metrics.slot_delta(dx))
        .zip(day_shift)
        .and_then(|(shift, day_shift)| shift.checked_add(&day_shift))
        .and_then(|offset| {
            Some((
                start.checked_add_signed(offset)?,
                end.checked_add_signed(offset)?,
            ))
        });

    match moved {
        Some((start, end)) => Ghost {
            start,
            end,
            row_delta,
        },
        None => Ghost::unchanged(start, end),
    }
}

/// Preview of dragging one edge of `[start, end)` horizontally.
///
/// The result is never shorter than one slot and never inverted.
pub fn resize_ghost(
    grid: SlotGrid,
    metrics: &GridMetrics,
    edge: Edge,
    start: NaiveDateTime,
    end: NaiveDateTime,
    dx: f64,
) -> Ghost {
    let min = grid.slot_duration();
    let shift = slot_shift(grid, metrics.slot_delta(dx));

    match edge {
        Edge::Start => {
            let latest = end - min;
            let moved = shift
                .and_then(|shift| start.checked_add_signed(shift))
                .unwrap_or(start);
            Ghost::unchanged(moved.min(latest), end)
        }
        Edge::End => {
            let earliest = start + min;
            let moved = shift
                .and_then(|shift| end.checked_add_signed(shift))
                .unwrap_or(end);
            Ghost::unchanged(start, moved.max(earliest))
        }
    }
}
