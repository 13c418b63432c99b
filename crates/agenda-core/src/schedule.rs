//! Weekly work schedules, per-date exceptions, and boundary validation.
//!
//! The Professional Directory stores duck-typed documents; this module turns
//! them into typed values at the boundary. Two raw shapes exist in the wild
//! for a weekday's hours — a single `{from,to}` object or an array of them —
//! and both are accepted, the single form being the one-element degenerate
//! case. Validation isolates failures: a malformed block drops only its own
//! weekday from the typed schedule, and every dropped entry is reported as a
//! [`ScheduleIssue`] so callers never lose errors silently.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;

use crate::error::{AgendaError, Result};

/// Parse a 24-hour "HH:MM" time-of-day string. Minute resolution, no seconds.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| AgendaError::InvalidTime(s.to_string()))
}

/// Parse a "YYYY-MM-DD" calendar date string.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AgendaError::InvalidDate(s.to_string()))
}

/// Parse a weekday name ("monday", "Tuesday", "wed", ...).
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.parse::<Weekday>()
        .map_err(|_| AgendaError::InvalidWeekday(s.to_string()))
}

/// A half-open time-of-day interval `[from, to)` of nominal availability on
/// some weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkBlock {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

impl WorkBlock {
    /// Build a block, rejecting `from >= to`. Blocks never span midnight.
    pub fn new(from: NaiveTime, to: NaiveTime) -> Result<Self> {
        if from >= to {
            return Err(AgendaError::EmptyBlock { from, to });
        }
        Ok(WorkBlock { from, to })
    }

    /// Build a block from "HH:MM" strings.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        WorkBlock::new(parse_hhmm(from)?, parse_hhmm(to)?)
    }

    /// Block length in whole minutes.
    pub fn minutes(&self) -> i64 {
        (self.to - self.from).num_minutes()
    }
}

/// Per-weekday collection of [`WorkBlock`]s. A weekday with no blocks means
/// the professional does not work that day at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    // Indexed by days-from-Monday.
    days: [Vec<WorkBlock>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the blocks for one weekday. Block order is preserved; the
    /// engine assumes blocks within a day are non-overlapping by convention
    /// and does not enforce it.
    pub fn set_day(&mut self, weekday: Weekday, blocks: Vec<WorkBlock>) {
        self.days[weekday.num_days_from_monday() as usize] = blocks;
    }

    /// The blocks for a weekday, empty when the professional does not work it.
    pub fn blocks_for(&self, weekday: Weekday) -> &[WorkBlock] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn works_on(&self, weekday: Weekday) -> bool {
        !self.blocks_for(weekday).is_empty()
    }
}

/// Calendar dates on which the professional does not work regardless of the
/// weekly schedule (holidays, leave). Absolute precedence over work blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionSet(BTreeSet<NaiveDate>);

impl ExceptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.0.insert(date);
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NaiveDate> for ExceptionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        ExceptionSet(iter.into_iter().collect())
    }
}

/// Raw `{from, to}` pair as stored in a directory document.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub from: String,
    pub to: String,
}

/// A weekday's raw hours: either one block or an array of blocks.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBlocks {
    One(RawBlock),
    Many(Vec<RawBlock>),
}

impl RawBlocks {
    fn as_slice(&self) -> &[RawBlock] {
        match self {
            RawBlocks::One(block) => std::slice::from_ref(block),
            RawBlocks::Many(blocks) => blocks,
        }
    }
}

/// A professional's document as fetched from the Professional Directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfessionalDoc {
    /// Weekday name → raw work blocks.
    #[serde(rename = "weeklySchedule", alias = "schedule", default)]
    pub weekly_schedule: BTreeMap<String, RawBlocks>,
    /// "YYYY-MM-DD" no-work dates.
    #[serde(default)]
    pub exceptions: Vec<String>,
}

/// One rejected entry from a raw professional document, naming the offending
/// field so the error is attributable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleIssue {
    /// The weekday key or exception string the error belongs to.
    pub field: String,
    pub error: AgendaError,
}

/// Result of validating a [`ProfessionalDoc`]: the typed schedule and
/// exceptions that survived, plus every entry that was rejected.
#[derive(Debug, Clone, Default)]
pub struct ValidatedProfessional {
    pub schedule: WeeklySchedule,
    pub exceptions: ExceptionSet,
    pub issues: Vec<ScheduleIssue>,
}

impl ProfessionalDoc {
    /// Validate the raw document into typed values.
    ///
    /// Failure isolation is per entry: a malformed block drops its whole
    /// weekday (a half-validated day would mask scheduling errors), a
    /// malformed exception date drops that date, and everything else still
    /// computes. Rejections are returned as issues, never swallowed.
    pub fn validate(&self) -> ValidatedProfessional {
        let mut out = ValidatedProfessional::default();

        for (day_name, raw_blocks) in &self.weekly_schedule {
            let weekday = match parse_weekday(day_name) {
                Ok(weekday) => weekday,
                Err(error) => {
                    out.issues.push(ScheduleIssue {
                        field: day_name.clone(),
                        error,
                    });
                    continue;
                }
            };

            let parsed: Result<Vec<WorkBlock>> = raw_blocks
                .as_slice()
                .iter()
                .map(|raw| WorkBlock::parse(&raw.from, &raw.to))
                .collect();
            match parsed {
                Ok(blocks) if !blocks.is_empty() => out.schedule.set_day(weekday, blocks),
                Ok(_) => {} // weekday present but with no blocks: not working
                Err(error) => out.issues.push(ScheduleIssue {
                    field: day_name.clone(),
                    error,
                }),
            }
        }

        for raw_date in &self.exceptions {
            match parse_date(raw_date) {
                Ok(date) => out.exceptions.insert(date),
                Err(error) => out.issues.push(ScheduleIssue {
                    field: raw_date.clone(),
                    error,
                }),
            }
        }

        out
    }
}
