//! Time-slot grid: maps wall-clock time onto fixed subdivisions of a day

use std::ops::Range;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Slot granularity of a board view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    slot_minutes: u32,
}

impl SlotGrid {
    /// 15-minute slots, 96 per day
    pub const QUARTER_HOUR: SlotGrid = SlotGrid { slot_minutes: 15 };
    /// 1-minute slots, used by the high-precision editor
    pub const MINUTE: SlotGrid = SlotGrid { slot_minutes: 1 };

    /// Build a grid whose slot length divides a day evenly.
    pub fn new(slot_minutes: u32) -> Option<Self> {
        if slot_minutes == 0 || MINUTES_PER_DAY % slot_minutes != 0 {
            return None;
        }
        Some(Self { slot_minutes })
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_minutes))
    }

    pub fn slots_per_day(&self) -> u32 {
        MINUTES_PER_DAY / self.slot_minutes
    }

    /// Slot containing `at`. Minutes inside a slot truncate toward its start.
    pub fn time_to_slot(&self, at: NaiveDateTime) -> u32 {
        let minute_of_day = at.hour() * 60 + at.minute();
        minute_of_day / self.slot_minutes
    }

    /// Start of `slot` on `date`. `slot == slots_per_day()` is next midnight.
    pub fn slot_to_time(&self, date: NaiveDate, slot: u32) -> NaiveDateTime {
        let midnight = date.and_time(NaiveTime::MIN);
        midnight + Duration::minutes(i64::from(slot * self.slot_minutes))
    }

    /// Exclusive end slot for an interval ending at `at`.
    ///
    /// Rounds up so that an end on a slot boundary stays in the slot before
    /// it, and an end at midnight of the following day maps to
    /// `slots_per_day()`.
    pub fn end_slot(&self, date: NaiveDate, at: NaiveDateTime) -> u32 {
        if at.date() > date {
            return self.slots_per_day();
        }
        let seconds = at.num_seconds_from_midnight();
        let slot_seconds = self.slot_minutes * 60;
        seconds.div_ceil(slot_seconds)
    }

    /// Floor `at` to the start of its slot.
    pub fn snap(&self, at: NaiveDateTime) -> NaiveDateTime {
        self.slot_to_time(at.date(), self.time_to_slot(at))
    }

    /// Slots of `date` covered by the half-open interval `[start, end)`.
    ///
    /// The interval is clipped to the day; returns `None` when it does not
    /// touch the day at all.
    pub fn day_span(
        &self,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<Range<u32>> {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        if start >= day_end || end <= day_start || start >= end {
            return None;
        }

        let first = if start <= day_start {
            0
        } else {
            self.time_to_slot(start)
        };
        let last = if end >= day_end {
            self.slots_per_day()
        } else {
            self.end_slot(date, end)
        };

        if first >= last {
            return None;
        }
        Some(first..last)
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::QUARTER_HOUR
    }
}
