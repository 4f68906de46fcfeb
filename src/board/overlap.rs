//! Interval overlap detection for bookings sharing an owner

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// Strict half-open intersection of `[a_start, a_end)` and `[b_start, b_end)`.
pub fn overlaps<T: PartialOrd>(a_start: T, a_end: T, b_start: T, b_end: T) -> bool {
    a_start < b_end && b_start < a_end
}

/// A time-blocked booking owned by one row of the board
pub trait Booking {
    type Owner: Copy + Eq + Hash;

    fn id(&self) -> i64;
    fn owner(&self) -> Self::Owner;
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;

    fn overlaps_with<B>(&self, other: &B) -> bool
    where
        B: Booking<Owner = Self::Owner>,
    {
        self.owner() == other.owner()
            && overlaps(self.start(), self.end(), other.start(), other.end())
    }
}

/// Ids of bookings that overlap at least one other booking of the same owner.
pub fn overlapping_ids<B: Booking>(bookings: &[B]) -> HashSet<i64> {
    let mut by_owner: HashMap<B::Owner, Vec<&B>> = HashMap::new();
    for booking in bookings {
        by_owner.entry(booking.owner()).or_default().push(booking);
    }

    let mut flagged = HashSet::new();
    for (_, mut rows) in by_owner {
        rows.sort_by_key(|b| (b.start(), b.end(), b.id()));
        for (i, current) in rows.iter().enumerate() {
            for other in &rows[i + 1..] {
                // Sorted by start: nothing further right can intersect `current`
                if other.start() >= current.end() {
                    break;
                }
                if overlaps(current.start(), current.end(), other.start(), other.end()) {
                    flagged.insert(current.id());
                    flagged.insert(other.id());
                }
            }
        }
    }
    flagged
}

/// Existing bookings of `owner` that intersect `[start, end)`.
///
/// `exclude_id` skips the booking being edited so it never conflicts with
/// its own previous position.
pub fn find_conflicts<'a, B: Booking>(
    owner: B::Owner,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &'a [B],
    exclude_id: Option<i64>,
) -> Vec<&'a B> {
    existing
        .iter()
        .filter(|b| b.owner() == owner)
        .filter(|b| Some(b.id()) != exclude_id)
        .filter(|b| overlaps(start, end, b.start(), b.end()))
        .collect()
}
