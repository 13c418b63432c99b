//! Booked appointment intervals fetched from the Appointment Store.
//!
//! The store hands back one document per committed appointment; this module
//! turns them into typed `[start, end)` intervals. The engine never assumes
//! the store's list is sorted, disjoint, or pre-filtered to one professional
//! — grouping, sorting, and id filtering all happen here.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::{AgendaError, Result};

/// Parse an ISO-8601 wall-clock timestamp. All timestamps in the system share
/// a single implicit zone (the tenant's), so a trailing "Z" or offset written
/// by the store is ignored rather than converted.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    if let Some(dt) = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt);
    }
    // Zone-tagged forms ("...Z", "...+02:00") keep their wall-clock reading.
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|_| AgendaError::InvalidTimestamp(s.to_string()))
}

/// Raw appointment document shape from the store.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentDoc {
    #[serde(rename = "professionalId", alias = "stylistId")]
    pub professional_id: String,
    #[serde(rename = "startIso8601", alias = "datetime")]
    pub start: String,
    /// Older documents omit the duration; the caller supplies the service
    /// duration as a fallback.
    #[serde(rename = "durationMinutes", alias = "duration", default)]
    pub duration_minutes: Option<i64>,
}

/// A committed reservation's `[start, end)` span for one professional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedInterval {
    pub professional_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BookedInterval {
    pub fn new(professional_id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        BookedInterval {
            professional_id: professional_id.into(),
            start,
            end,
        }
    }

    /// Build from a raw store document. `default_duration` fills in documents
    /// that predate the duration field; the resolved duration must be positive.
    pub fn from_doc(doc: &AppointmentDoc, default_duration: i64) -> Result<Self> {
        let duration = doc.duration_minutes.unwrap_or(default_duration);
        if duration <= 0 {
            return Err(AgendaError::InvalidDuration(duration));
        }
        let start = parse_timestamp(&doc.start)?;
        Ok(BookedInterval {
            professional_id: doc.professional_id.clone(),
            start,
            end: start + Duration::minutes(duration),
        })
    }
}

/// Group one professional's intervals by the calendar date of their start,
/// sorted ascending by start within each date.
///
/// Intervals of other professionals are dropped here — the engine filters by
/// an explicit id rather than requiring pre-filtered input. Keying by the
/// start's date mirrors how the store indexes appointments; bookings never
/// span midnight in practice because work blocks cannot.
pub(crate) fn intervals_by_date(
    booked: &[BookedInterval],
    professional_id: &str,
) -> BTreeMap<NaiveDate, Vec<(NaiveDateTime, NaiveDateTime)>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<(NaiveDateTime, NaiveDateTime)>> = BTreeMap::new();
    for interval in booked {
        if interval.professional_id != professional_id {
            continue;
        }
        by_date
            .entry(interval.start.date())
            .or_default()
            .push((interval.start, interval.end));
    }
    for intervals in by_date.values_mut() {
        intervals.sort_unstable();
    }
    by_date
}
