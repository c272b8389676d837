//! Day-granularity availability index for a single venue.
//!
//! Bookings block the half-open interval `[date_from, date_to)` at
//! calendar-day granularity: the checkout day is free for a new
//! check-in. The index is a pure function of the booking list and is
//! rebuilt whenever that list changes.

pub mod validate;

pub use validate::{
    booking_allowed, check_guest_count, compute_summary, ranges_overlap, validate_range,
    BookingRuleError, CandidateRange, RangeError, ReservationSummary,
};

use crate::domain::Booking;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use std::fmt;

/// `num_days_from_ce()` value for 1970-01-01.
const UNIX_EPOCH_CE_DAYS: i64 = 719_163;

/// A calendar day, stored as days since 1970-01-01.
///
/// All availability math runs on this integer form, so day differences
/// and set membership are exact rather than derived from timestamp
/// subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(i64);

impl Day {
    pub fn from_date(date: NaiveDate) -> Self {
        Day(i64::from(date.num_days_from_ce()) - UNIX_EPOCH_CE_DAYS)
    }

    /// Parses an ISO-8601 date or date-time string, truncating to the
    /// calendar day. Returns `None` for anything unparseable.
    pub fn parse_iso(input: &str) -> Option<Self> {
        let date_part = input.split('T').next().unwrap_or(input);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .ok()
            .map(Self::from_date)
    }

    pub fn succ(self) -> Self {
        Day(self.0 + 1)
    }

    pub fn pred(self) -> Self {
        Day(self.0 - 1)
    }

    /// Signed count of day boundaries from `self` to `other`.
    pub fn days_until(self, other: Day) -> i64 {
        other.0 - self.0
    }

    pub fn as_epoch_day(self) -> i64 {
        self.0
    }

    pub fn to_date(self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt((self.0 + UNIX_EPOCH_CE_DAYS) as i32)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_date().format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// The set of calendar days already taken by existing bookings.
#[derive(Debug, Clone, Default)]
pub struct BlockedDaySet {
    days: HashSet<Day>,
    skipped_bookings: usize,
}

impl BlockedDaySet {
    /// Builds a fresh index from a venue's booking list.
    ///
    /// Bookings with unparseable dates, and bookings whose half-open
    /// interval covers no whole day (same-day or inverted ranges),
    /// contribute nothing. The build itself never fails; the caller
    /// can inspect [`skipped_bookings`](Self::skipped_bookings) to
    /// surface a data-quality warning.
    pub fn build(bookings: &[Booking]) -> Self {
        let mut days = HashSet::new();
        let mut skipped_bookings = 0;

        for booking in bookings {
            let (from, to) = match (booking.from_day(), booking.to_day()) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    skipped_bookings += 1;
                    continue;
                }
            };

            // Checkout day is free; the last blocked day is the one before it.
            let last_blocked = to.pred();
            if last_blocked < from {
                skipped_bookings += 1;
                continue;
            }

            let mut day = from;
            while day <= last_blocked {
                days.insert(day);
                day = day.succ();
            }
        }

        Self {
            days,
            skipped_bookings,
        }
    }

    pub fn is_blocked(&self, day: Day) -> bool {
        self.days.contains(&day)
    }

    /// Whether a calendar cell is offerable for selection: not in the
    /// past and not already booked.
    pub fn is_selectable(&self, day: Day, today: Day) -> bool {
        day >= today && !self.is_blocked(day)
    }

    /// Count of bookings that contributed no blocked days (malformed
    /// dates or empty intervals).
    pub fn skipped_bookings(&self) -> usize {
        self.skipped_bookings
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Booking;

    fn day(s: &str) -> Day {
        Day::parse_iso(s).unwrap()
    }

    fn booking(from: &str, to: &str) -> Booking {
        Booking {
            id: None,
            date_from: from.to_string(),
            date_to: to.to_string(),
            guests: 2,
            created: None,
            venue: None,
        }
    }

    #[test]
    fn day_roundtrips_through_epoch_form() {
        let d = day("2025-06-01");
        assert_eq!(d.to_string(), "2025-06-01");
        assert_eq!(day("1970-01-01").as_epoch_day(), 0);
        assert_eq!(day("1970-01-02").as_epoch_day(), 1);
    }

    #[test]
    fn parse_iso_truncates_datetime_to_day() {
        assert_eq!(Day::parse_iso("2025-06-01T14:30:00Z"), Some(day("2025-06-01")));
        assert_eq!(Day::parse_iso("not a date"), None);
    }

    #[test]
    fn checkout_day_is_not_blocked() {
        let set = BlockedDaySet::build(&[booking("2025-06-01", "2025-06-04")]);
        assert!(set.is_blocked(day("2025-06-01")));
        assert!(set.is_blocked(day("2025-06-02")));
        assert!(set.is_blocked(day("2025-06-03")));
        assert!(!set.is_blocked(day("2025-06-04")));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn datetime_inputs_normalize_to_their_calendar_day() {
        let set = BlockedDaySet::build(&[booking(
            "2025-06-01T15:00:00.000Z",
            "2025-06-03T10:00:00.000Z",
        )]);
        assert!(set.is_blocked(day("2025-06-01")));
        assert!(set.is_blocked(day("2025-06-02")));
        assert!(!set.is_blocked(day("2025-06-03")));
    }

    #[test]
    fn same_day_booking_blocks_nothing() {
        let set = BlockedDaySet::build(&[booking("2025-06-01", "2025-06-01")]);
        assert!(set.is_empty());
        assert_eq!(set.skipped_bookings(), 1);
    }

    #[test]
    fn inverted_booking_blocks_nothing() {
        let set = BlockedDaySet::build(&[booking("2025-06-05", "2025-06-01")]);
        assert!(set.is_empty());
        assert_eq!(set.skipped_bookings(), 1);
    }

    #[test]
    fn unparseable_dates_are_skipped_not_fatal() {
        let set = BlockedDaySet::build(&[
            booking("garbage", "2025-06-04"),
            booking("2025-06-10", "2025-06-12"),
        ]);
        assert_eq!(set.skipped_bookings(), 1);
        assert!(set.is_blocked(day("2025-06-10")));
        assert!(set.is_blocked(day("2025-06-11")));
        assert!(!set.is_blocked(day("2025-06-12")));
    }

    #[test]
    fn selectable_requires_future_and_free() {
        let set = BlockedDaySet::build(&[booking("2025-06-10", "2025-06-12")]);
        let today = day("2025-06-09");
        assert!(set.is_selectable(day("2025-06-09"), today));
        assert!(!set.is_selectable(day("2025-06-08"), today)); // past
        assert!(!set.is_selectable(day("2025-06-10"), today)); // booked
        assert!(set.is_selectable(day("2025-06-12"), today)); // checkout day
    }

    #[test]
    fn rebuild_is_idempotent() {
        let bookings = vec![
            booking("2025-06-01", "2025-06-04"),
            booking("2025-07-15", "2025-07-20"),
        ];
        let first = BlockedDaySet::build(&bookings);
        let second = BlockedDaySet::build(&bookings);
        let mut probe = day("2025-05-25");
        let end = day("2025-08-01");
        while probe <= end {
            assert_eq!(first.is_blocked(probe), second.is_blocked(probe));
            probe = probe.succ();
        }
    }
}
