//! Board model shared by every view: time slots, overlaps, drag geometry,
//! pointer interaction and snapshot signatures

pub mod geometry;
pub mod interaction;
pub mod overlap;
pub mod signature;
pub mod slots;

pub use geometry::{Edge, Ghost, GridMetrics, RowAxis};
pub use interaction::{BookingRef, Cell, Command, GridContext, Interaction, PointerEvent};
pub use overlap::{find_conflicts, overlapping_ids, overlaps, Booking};
pub use signature::{Fingerprint, SignatureBuilder};
pub use slots::SlotGrid;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};

/// Wall-clock timezone the board grid is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardClock {
    offset: FixedOffset,
}

impl BoardClock {
    /// Clock at `minutes` east of UTC. Out-of-range offsets fall back to UTC.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::from_offset_minutes(0)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn to_local(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset).naive_local()
    }

    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        // A fixed offset maps every local time to exactly one instant
        (local - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }

    /// UTC bounds `[start, end)` of a calendar month in this clock.
    pub fn month_window(&self, year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some((
            self.to_utc(first.and_time(NaiveTime::MIN)),
            self.to_utc(next.and_time(NaiveTime::MIN)),
        ))
    }

    /// Month window containing `at`.
    pub fn current_month_window(&self, at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let local = self.offset.from_utc_datetime(&at.naive_utc());
        self.month_window(local.year(), local.month())
            .unwrap_or((at, at + Duration::days(31)))
    }
}

impl Default for BoardClock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_round_trip() {
        let clock = BoardClock::from_offset_minutes(9 * 60);
        let instant = Utc.with_ymd_and_hms(2024, 5, 10, 0, 30, 0).unwrap();
        let local = clock.to_local(instant);
        assert_eq!(local.to_string(), "2024-05-10 09:30:00");
        assert_eq!(clock.to_utc(local), instant);
    }

    #[test]
    fn test_month_window_in_offset() {
        let clock = BoardClock::from_offset_minutes(9 * 60);
        let (start, end) = clock.month_window(2024, 12).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 11, 30, 15, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 12, 31, 15, 0, 0).unwrap());
        assert!(clock.month_window(2024, 13).is_none());
    }

    #[test]
    fn test_current_month_window() {
        let clock = BoardClock::utc();
        let at = Utc.with_ymd_and_hms(2024, 2, 14, 12, 0, 0).unwrap();
        let (start, end) = clock.current_month_window(at);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_offset_falls_back_to_utc() {
        assert_eq!(BoardClock::from_offset_minutes(100_000), BoardClock::utc());
    }
}
