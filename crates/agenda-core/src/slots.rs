//! Slot enumeration — the availability engine core.
//!
//! Turns a professional's weekly schedule, exception dates, and existing
//! bookings into the bookable start times per date across a rolling window.
//! Pure and deterministic: identical inputs (including the [`NowRef`]) always
//! produce identical output, and no I/O happens anywhere below this point.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::booked::{intervals_by_date, BookedInterval};
use crate::clock::NowRef;
use crate::error::{AgendaError, Result};
use crate::policy::PastSlotPolicy;
use crate::schedule::{ExceptionSet, WeeklySchedule, WorkBlock};

/// The rolling set of dates to compute availability for:
/// `[start, start + days)`, date-only granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub days: u32,
}

impl QueryWindow {
    pub fn new(start: NaiveDate, days: u32) -> Self {
        QueryWindow { start, days }
    }

    /// The default booking-flow window: 7 days starting today.
    pub fn rolling_week(start: NaiveDate) -> Self {
        QueryWindow { start, days: 7 }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map(|offset| self.start + Duration::days(offset as i64))
    }
}

/// Bookable start times per date, ascending within each date.
///
/// Every date in the queried window is present; an empty list is a valid
/// "no availability" answer (non-working day, fully booked, or exception),
/// distinct from any fetch failure, which never reaches the engine.
///
/// Serializes as `{"YYYY-MM-DD": ["HH:MM", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    by_date: BTreeMap<NaiveDate, Vec<NaiveTime>>,
}

impl Availability {
    /// The slot list for one date; `None` when the date is outside the window.
    pub fn slots_for(&self, date: NaiveDate) -> Option<&[NaiveTime]> {
        self.by_date.get(&date).map(Vec::as_slice)
    }

    /// Iterate dates and their slot lists in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[NaiveTime])> {
        self.by_date.iter().map(|(date, slots)| (*date, slots.as_slice()))
    }

    /// The earliest date in the window with at least one slot. Booking UIs
    /// preselect this day.
    pub fn first_available(&self) -> Option<NaiveDate> {
        self.by_date
            .iter()
            .find(|(_, slots)| !slots.is_empty())
            .map(|(date, _)| *date)
    }

    /// Total slot count across the window.
    pub fn total_slots(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.by_date.len()))?;
        for (date, slots) in &self.by_date {
            let times: Vec<String> = slots.iter().map(|t| t.format("%H:%M").to_string()).collect();
            map.serialize_entry(&date.format("%Y-%m-%d").to_string(), &times)?;
        }
        map.end()
    }
}

/// Compute the bookable start times for one professional across a window.
///
/// Per date, independently: resolve the weekday's work blocks (none, or the
/// date is an exception, or the date is before today → empty list), then walk
/// each block with a cursor over that date's bookings sorted by start,
/// emitting back-to-back slots of exactly `duration_minutes` into each free
/// gap and jumping to a booking's end (clamped to the block end) on
/// collision. Overlap is half-open on both sides: a slot ending exactly when
/// a booking starts, or starting exactly when one ends, is not a conflict.
///
/// `booked` may be unsorted and may contain other professionals' intervals;
/// the engine filters by `professional_id` itself. Overlapping blocks within
/// one weekday are malformed configuration — slots may then be duplicated,
/// but the engine will not panic.
///
/// # Errors
///
/// `AgendaError::InvalidDuration` when `duration_minutes` is not positive.
/// This fails the whole computation fast; it is a contract violation, not a
/// per-date condition.
#[allow(clippy::too_many_arguments)]
pub fn compute_availability(
    schedule: &WeeklySchedule,
    exceptions: &ExceptionSet,
    booked: &[BookedInterval],
    professional_id: &str,
    duration_minutes: i64,
    window: &QueryWindow,
    now: NowRef,
    policy: PastSlotPolicy,
) -> Result<Availability> {
    if duration_minutes <= 0 {
        return Err(AgendaError::InvalidDuration(duration_minutes));
    }
    let step = Duration::minutes(duration_minutes);
    let occupied_by_date = intervals_by_date(booked, professional_id);

    let mut by_date = BTreeMap::new();
    for date in window.dates() {
        let mut slots = Vec::new();
        if date >= now.today && !exceptions.contains(date) {
            let occupied = occupied_by_date
                .get(&date)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            for block in schedule.blocks_for(date.weekday()) {
                fill_block(date, block, occupied, step, &mut slots);
            }
            // Blocks are processed in schedule order; present the day's slots
            // in time order.
            slots.sort_unstable();
            if policy == PastSlotPolicy::ClockTime && date == now.today {
                slots.retain(|slot| *slot >= now.now);
            }
        }
        by_date.insert(date, slots);
    }

    Ok(Availability { by_date })
}

/// Cursor walk over one work block: emit slots into every gap before a
/// booking, then after the last booking up to the block end. A remainder
/// shorter than `step` is discarded.
fn fill_block(
    date: NaiveDate,
    block: &WorkBlock,
    occupied: &[(NaiveDateTime, NaiveDateTime)],
    step: Duration,
    out: &mut Vec<NaiveTime>,
) {
    let block_end = date.and_time(block.to);
    let mut cursor = date.and_time(block.from);

    for &(busy_start, busy_end) in occupied {
        // Already behind the cursor, or past the block entirely.
        if busy_end <= cursor || busy_start >= block_end {
            continue;
        }
        while cursor + step <= busy_start {
            out.push(cursor.time());
            cursor += step;
        }
        if busy_end > cursor {
            cursor = busy_end.min(block_end);
        }
    }

    while cursor + step <= block_end {
        out.push(cursor.time());
        cursor += step;
    }
}
