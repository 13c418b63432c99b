//! Commit-time conflict detection against existing bookings.
//!
//! The engine provides no reservation between computing availability and
//! committing a booking — another client can take the slot in between. The
//! store layer rejects the conflicting write; this check is the shared
//! predicate for that rejection, and callers surface it as a recoverable
//! "slot no longer available" condition prompting a fresh availability query.

use chrono::{Duration, NaiveDateTime};

use crate::booked::BookedInterval;
use crate::error::{AgendaError, Result};

/// A proposed booking's overlap with an existing interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConflict {
    pub booked_start: NaiveDateTime,
    pub booked_end: NaiveDateTime,
    pub overlap_minutes: i64,
}

/// Check a proposed `[start, start + duration)` booking for one professional
/// against existing intervals, returning the earliest-starting conflict.
///
/// Overlap is half-open: two spans conflict iff `a.start < b.end && b.start
/// < a.end`, so a booking beginning exactly when another ends is allowed.
/// Intervals of other professionals are ignored.
///
/// # Errors
///
/// `AgendaError::InvalidDuration` when `duration_minutes` is not positive.
pub fn check_booking(
    start: NaiveDateTime,
    duration_minutes: i64,
    booked: &[BookedInterval],
    professional_id: &str,
) -> Result<Option<BookingConflict>> {
    if duration_minutes <= 0 {
        return Err(AgendaError::InvalidDuration(duration_minutes));
    }
    let end = start + Duration::minutes(duration_minutes);

    let conflict = booked
        .iter()
        .filter(|interval| interval.professional_id == professional_id)
        .filter(|interval| start < interval.end && interval.start < end)
        .min_by_key(|interval| interval.start)
        .map(|interval| {
            let overlap_start = start.max(interval.start);
            let overlap_end = end.min(interval.end);
            BookingConflict {
                booked_start: interval.start,
                booked_end: interval.end,
                overlap_minutes: (overlap_end - overlap_start).num_minutes(),
            }
        });

    Ok(conflict)
}
