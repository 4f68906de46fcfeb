//! Pointer interaction state machine for the board grid
//!
//! A front end feeds raw pointer events into [`Interaction::apply`] and
//! renders whatever [`Interaction::ghost`] or [`Interaction::selection`]
//! currently report. Network writes only ever come out of the reducer as a
//! [`Command`] on release, so intermediate positions are never persisted.

use std::ops::Range;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::geometry::{move_ghost, resize_ghost, Edge, Ghost, GridMetrics, RowAxis};
use super::slots::SlotGrid;

/// One cell of the grid: a row (owner or day) and a slot within the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub slot: u32,
}

/// The booking under the pointer when a drag or resize starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRef {
    pub id: i64,
    pub row: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// View parameters the reducer needs to turn pixels into time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridContext {
    pub grid: SlotGrid,
    pub metrics: GridMetrics,
    pub axis: RowAxis,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    PressCell(Cell),
    PressBooking { booking: BookingRef, x: f64, y: f64 },
    PressEdge { booking: BookingRef, edge: Edge, x: f64 },
    PointerMove { x: f64, y: f64, cell: Option<Cell> },
    Release,
    Cancel,
}

/// Work for the caller once a gesture completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Open the create form for an empty range (end slot exclusive)
    CreateRange {
        row: usize,
        start_slot: u32,
        end_slot: u32,
    },
    /// Persist a moved or resized booking
    Commit {
        booking_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        row_delta: i64,
    },
    /// The booking was clicked without moving
    Open { booking_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Selecting {
        anchor: Cell,
        current: Cell,
    },
    Dragging {
        booking: BookingRef,
        origin: (f64, f64),
        ghost: Ghost,
    },
    Resizing {
        booking: BookingRef,
        edge: Edge,
        origin_x: f64,
        ghost: Ghost,
    },
}

impl Interaction {
    /// Advance the state machine by one event.
    pub fn apply(&mut self, event: PointerEvent, ctx: &GridContext) -> Option<Command> {
        let (next, command) = std::mem::take(self).step(event, ctx);
        *self = next;
        command
    }

    fn step(self, event: PointerEvent, ctx: &GridContext) -> (Self, Option<Command>) {
        use PointerEvent as E;

        match (self, event) {
            (_, E::Cancel) => (Self::Idle, None),

            (Self::Idle, E::PressCell(cell)) => (
                Self::Selecting {
                    anchor: cell,
                    current: cell,
                },
                None,
            ),
            (Self::Idle, E::PressBooking { booking, x, y }) => (
                Self::Dragging {
                    booking,
                    origin: (x, y),
                    ghost: Ghost::unchanged(booking.start, booking.end),
                },
                None,
            ),
            (Self::Idle, E::PressEdge { booking, edge, x }) => (
                Self::Resizing {
                    booking,
                    edge,
                    origin_x: x,
                    ghost: Ghost::unchanged(booking.start, booking.end),
                },
                None,
            ),

            (Self::Selecting { anchor, current }, E::PointerMove { cell, .. }) => {
                // Selection stays on the anchor row
                let current = cell
                    .map(|c| Cell {
                        row: anchor.row,
                        slot: c.slot.min(ctx.grid.slots_per_day() - 1),
                    })
                    .unwrap_or(current);
                (Self::Selecting { anchor, current }, None)
            }
            (Self::Selecting { anchor, current }, E::Release) => {
                let range = selected_slots(anchor, current);
                let command = Command::CreateRange {
                    row: anchor.row,
                    start_slot: range.start,
                    end_slot: range.end,
                };
                (Self::Idle, Some(command))
            }

            (Self::Dragging { booking, origin, .. }, E::PointerMove { x, y, .. }) => {
                let ghost = move_ghost(
                    ctx.grid,
                    &ctx.metrics,
                    ctx.axis,
                    booking.start,
                    booking.end,
                    x - origin.0,
                    y - origin.1,
                );
                (
                    Self::Dragging {
                        booking,
                        origin,
                        ghost,
                    },
                    None,
                )
            }
            (Self::Dragging { booking, ghost, .. }, E::Release) => {
                (Self::Idle, Some(finish(&booking, ghost)))
            }

            (
                Self::Resizing {
                    booking,
                    edge,
                    origin_x,
                    ..
                },
                E::PointerMove { x, .. },
            ) => {
                let ghost = resize_ghost(
                    ctx.grid,
                    &ctx.metrics,
                    edge,
                    booking.start,
                    booking.end,
                    x - origin_x,
                );
                (
                    Self::Resizing {
                        booking,
                        edge,
                        origin_x,
                        ghost,
                    },
                    None,
                )
            }
            (Self::Resizing { booking, ghost, .. }, E::Release) => {
                (Self::Idle, Some(finish(&booking, ghost)))
            }

            // Anything else is not meaningful in the current state
            (state, _) => (state, None),
        }
    }

    /// Preview to draw while dragging or resizing
    pub fn ghost(&self) -> Option<&Ghost> {
        match self {
            Self::Dragging { ghost, .. } | Self::Resizing { ghost, .. } => Some(ghost),
            _ => None,
        }
    }

    /// Row and slot range currently highlighted by a cell selection
    pub fn selection(&self) -> Option<(usize, Range<u32>)> {
        match self {
            Self::Selecting { anchor, current } => {
                Some((anchor.row, selected_slots(*anchor, *current)))
            }
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

fn selected_slots(anchor: Cell, current: Cell) -> Range<u32> {
    let (lo, hi) = if anchor.slot <= current.slot {
        (anchor.slot, current.slot)
    } else {
        (current.slot, anchor.slot)
    };
    lo..hi + 1
}

fn finish(booking: &BookingRef, ghost: Ghost) -> Command {
    if ghost.start == booking.start && ghost.end == booking.end && ghost.row_delta == 0 {
        return Command::Open {
            booking_id: booking.id,
        };
    }
    Command::Commit {
        booking_id: booking.id,
        start: ghost.start,
        end: ghost.end,
        row_delta: ghost.row_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ctx(axis: RowAxis) -> GridContext {
        GridContext {
            grid: SlotGrid::QUARTER_HOUR,
            metrics: GridMetrics::new(10.0, 30.0),
            axis,
        }
    }

    fn booking() -> BookingRef {
        BookingRef {
            id: 7,
            row: 2,
            start: at(9, 0),
            end: at(10, 0),
        }
    }

    #[test]
    fn test_selection_creates_normalized_range() {
        let ctx = ctx(RowAxis::Fixed);
        let mut state = Interaction::default();

        assert!(state.apply(PointerEvent::PressCell(Cell { row: 1, slot: 40 }), &ctx).is_none());
        state.apply(
            PointerEvent::PointerMove {
                x: 0.0,
                y: 0.0,
                cell: Some(Cell { row: 3, slot: 36 }),
            },
            &ctx,
        );
        assert_eq!(state.selection(), Some((1, 36..41)));

        let command = state.apply(PointerEvent::Release, &ctx);
        assert_eq!(
            command,
            Some(Command::CreateRange {
                row: 1,
                start_slot: 36,
                end_slot: 41
            })
        );
        assert!(state.is_idle());
    }

    #[test]
    fn test_drag_commits_only_on_release() {
        let ctx = ctx(RowAxis::Owners);
        let mut state = Interaction::default();

        state.apply(
            PointerEvent::PressBooking {
                booking: booking(),
                x: 100.0,
                y: 50.0,
            },
            &ctx,
        );
        for x in [110.0, 120.0, 130.0] {
            let command = state.apply(
                PointerEvent::PointerMove {
                    x,
                    y: 82.0,
                    cell: None,
                },
                &ctx,
            );
            assert!(command.is_none());
        }
        let ghost = *state.ghost().unwrap();
        assert_eq!(ghost.start, at(9, 45));
        assert_eq!(ghost.row_delta, 1);

        let command = state.apply(PointerEvent::Release, &ctx);
        assert_eq!(
            command,
            Some(Command::Commit {
                booking_id: 7,
                start: at(9, 45),
                end: at(10, 45),
                row_delta: 1,
            })
        );
        assert!(state.ghost().is_none());
    }

    #[test]
    fn test_release_without_move_opens_booking() {
        let ctx = ctx(RowAxis::Fixed);
        let mut state = Interaction::default();
        state.apply(
            PointerEvent::PressBooking {
                booking: booking(),
                x: 5.0,
                y: 5.0,
            },
            &ctx,
        );
        state.apply(
            PointerEvent::PointerMove {
                x: 7.0,
                y: 5.0,
                cell: None,
            },
            &ctx,
        );
        assert_eq!(
            state.apply(PointerEvent::Release, &ctx),
            Some(Command::Open { booking_id: 7 })
        );
    }

    #[test]
    fn test_resize_never_inverts() {
        let ctx = ctx(RowAxis::Fixed);
        let mut state = Interaction::default();
        state.apply(
            PointerEvent::PressEdge {
                booking: booking(),
                edge: Edge::End,
                x: 400.0,
            },
            &ctx,
        );
        state.apply(
            PointerEvent::PointerMove {
                x: 0.0,
                y: 0.0,
                cell: None,
            },
            &ctx,
        );
        match state.apply(PointerEvent::Release, &ctx) {
            Some(Command::Commit { start, end, .. }) => {
                assert_eq!(start, at(9, 0));
                assert_eq!(end, at(9, 15));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let ctx = ctx(RowAxis::Fixed);
        let mut state = Interaction::default();
        state.apply(
            PointerEvent::PressBooking {
                booking: booking(),
                x: 0.0,
                y: 0.0,
            },
            &ctx,
        );
        state.apply(
            PointerEvent::PointerMove {
                x: 50.0,
                y: 0.0,
                cell: None,
            },
            &ctx,
        );
        assert!(state.apply(PointerEvent::Cancel, &ctx).is_none());
        assert!(state.is_idle());
        assert!(state.apply(PointerEvent::Release, &ctx).is_none());
    }

    #[test]
    fn test_press_while_busy_is_ignored() {
        let ctx = ctx(RowAxis::Fixed);
        let mut state = Interaction::default();
        state.apply(PointerEvent::PressCell(Cell { row: 0, slot: 4 }), &ctx);
        state.apply(
            PointerEvent::PressBooking {
                booking: booking(),
                x: 0.0,
                y: 0.0,
            },
            &ctx,
        );
        assert_eq!(state.selection(), Some((0, 4..5)));
    }
}
