//! Candidate-range validation and pricing.
//!
//! These checks gate the "confirm booking" action. They are expected,
//! frequent user-input conditions, so every failure is an ordinary
//! returned value rather than an error propagated through the crate
//! error type.

use super::{BlockedDaySet, Day};
use thiserror::Error;

/// A tentative, unconfirmed check-in/check-out selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRange {
    pub start: Day,
    pub end: Day,
}

impl CandidateRange {
    pub fn new(start: Day, end: Day) -> Self {
        Self { start, end }
    }
}

/// Why a candidate range was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid range order: check-out precedes check-in")]
    InvalidOrder,
    #[error("range overlaps an unavailable date: {day}")]
    Unavailable { day: Day },
}

/// Why a booking as a whole cannot be confirmed. Guest-count failures
/// are distinct from date failures so callers can show guest-specific
/// messaging.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRuleError {
    #[error(transparent)]
    Dates(#[from] RangeError),
    #[error("guest count {requested} outside allowed range 1..={max_guests}")]
    Guests { requested: u32, max_guests: u32 },
}

/// Derived totals for a candidate selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservationSummary {
    pub nights: u32,
    pub total: f64,
}

/// Walks every day from `start` through `end` inclusive and rejects the
/// whole selection if any of them is blocked.
///
/// Rejection is atomic: the caller must prompt for a new range rather
/// than clamp the selection around the collision. A zero-night range
/// (`start == end`) passes; minimum-stay policy belongs to the caller.
pub fn validate_range(
    range: &CandidateRange,
    blocked: &BlockedDaySet,
) -> Result<(), RangeError> {
    if range.start > range.end {
        return Err(RangeError::InvalidOrder);
    }

    let mut day = range.start;
    while day <= range.end {
        if blocked.is_blocked(day) {
            return Err(RangeError::Unavailable { day });
        }
        day = day.succ();
    }

    Ok(())
}

/// Nights and total price for a stay from `start` to `end`.
///
/// Nights is the count of day boundaries crossed, floored at zero, so a
/// degenerate `start == end` selection prices at 0 rather than erroring.
pub fn compute_summary(start: Day, end: Day, nightly_price: f64) -> ReservationSummary {
    let nights = start.days_until(end).max(0) as u32;
    ReservationSummary {
        nights,
        total: f64::from(nights) * nightly_price,
    }
}

/// Half-open interval overlap test: `[a_start, a_end)` against
/// `[b_start, b_end)`. Equivalent to the full day-set walk for a single
/// pair, but cheaper when cross-checking against a short booking list.
pub fn ranges_overlap(a_start: Day, a_end: Day, b_start: Day, b_end: Day) -> bool {
    a_start < b_end && a_end > b_start
}

/// Guest-count ceiling check: at least one guest, at most the venue's
/// advertised capacity.
pub fn check_guest_count(requested: u32, max_guests: u32) -> bool {
    requested >= 1 && requested <= max_guests
}

/// Combined confirmation gate: date validity and guest ceiling together
/// decide whether a booking may be submitted.
pub fn booking_allowed(
    range: &CandidateRange,
    blocked: &BlockedDaySet,
    requested_guests: u32,
    max_guests: u32,
) -> Result<(), BookingRuleError> {
    validate_range(range, blocked)?;
    if !check_guest_count(requested_guests, max_guests) {
        return Err(BookingRuleError::Guests {
            requested: requested_guests,
            max_guests,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Booking;

    fn day(s: &str) -> Day {
        Day::parse_iso(s).unwrap()
    }

    fn blocked_june_1_to_4() -> BlockedDaySet {
        BlockedDaySet::build(&[Booking {
            id: None,
            date_from: "2025-06-01".to_string(),
            date_to: "2025-06-04".to_string(),
            guests: 2,
            created: None,
            venue: None,
        }])
    }

    #[test]
    fn rejects_range_touching_a_blocked_day() {
        let blocked = blocked_june_1_to_4();
        let range = CandidateRange::new(day("2025-06-03"), day("2025-06-05"));
        assert_eq!(
            validate_range(&range, &blocked),
            Err(RangeError::Unavailable {
                day: day("2025-06-03")
            })
        );
    }

    #[test]
    fn accepts_range_starting_on_checkout_day() {
        let blocked = blocked_june_1_to_4();
        let range = CandidateRange::new(day("2025-06-04"), day("2025-06-06"));
        assert_eq!(validate_range(&range, &blocked), Ok(()));
    }

    #[test]
    fn rejects_inverted_range_before_walking() {
        let blocked = blocked_june_1_to_4();
        let range = CandidateRange::new(day("2025-06-10"), day("2025-06-08"));
        assert_eq!(validate_range(&range, &blocked), Err(RangeError::InvalidOrder));
    }

    #[test]
    fn zero_night_range_is_not_rejected() {
        let blocked = blocked_june_1_to_4();
        let range = CandidateRange::new(day("2025-06-10"), day("2025-06-10"));
        assert_eq!(validate_range(&range, &blocked), Ok(()));
    }

    #[test]
    fn summary_counts_nights_and_total() {
        let summary = compute_summary(day("2025-06-10"), day("2025-06-13"), 100.0);
        assert_eq!(summary.nights, 3);
        assert_eq!(summary.total, 300.0);
    }

    #[test]
    fn degenerate_summary_is_zero() {
        let summary = compute_summary(day("2025-06-10"), day("2025-06-10"), 100.0);
        assert_eq!(summary.nights, 0);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn summary_never_goes_negative() {
        let summary = compute_summary(day("2025-06-13"), day("2025-06-10"), 100.0);
        assert_eq!(summary.nights, 0);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn overlap_is_half_open_and_symmetric() {
        let cases = [
            ("2025-06-01", "2025-06-04", "2025-06-03", "2025-06-05", true),
            ("2025-06-01", "2025-06-04", "2025-06-04", "2025-06-06", false),
            ("2025-06-01", "2025-06-04", "2025-06-10", "2025-06-12", false),
            ("2025-06-01", "2025-06-10", "2025-06-03", "2025-06-05", true),
        ];
        for (a1, a2, b1, b2, expected) in cases {
            let forward = ranges_overlap(day(a1), day(a2), day(b1), day(b2));
            let reverse = ranges_overlap(day(b1), day(b2), day(a1), day(a2));
            assert_eq!(forward, expected, "{a1}..{a2} vs {b1}..{b2}");
            assert_eq!(forward, reverse, "symmetry for {a1}..{a2} vs {b1}..{b2}");
        }
    }

    #[test]
    fn guest_ceiling() {
        assert!(check_guest_count(1, 4));
        assert!(check_guest_count(4, 4));
        assert!(!check_guest_count(0, 4));
        assert!(!check_guest_count(5, 4));
    }

    #[test]
    fn booking_gate_reports_guest_failures_distinctly() {
        let blocked = blocked_june_1_to_4();
        let range = CandidateRange::new(day("2025-06-10"), day("2025-06-12"));

        assert_eq!(booking_allowed(&range, &blocked, 2, 4), Ok(()));
        assert_eq!(
            booking_allowed(&range, &blocked, 5, 4),
            Err(BookingRuleError::Guests {
                requested: 5,
                max_guests: 4
            })
        );

        let colliding = CandidateRange::new(day("2025-06-02"), day("2025-06-05"));
        assert!(matches!(
            booking_allowed(&colliding, &blocked, 2, 4),
            Err(BookingRuleError::Dates(RangeError::Unavailable { .. }))
        ));
    }
}
