//! "Now" capture for availability queries.
//!
//! The engine is pure: it never reads the wall clock itself. Callers capture
//! a [`NowRef`] exactly once per query — sampling twice inside one
//! computation could straddle midnight and split the window — and pass it in.
//! The tenant's IANA zone is explicit configuration, not ambient state.

use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// The single "today"/"now" reference for one availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowRef {
    pub today: NaiveDate,
    pub now: NaiveTime,
}

impl NowRef {
    pub fn new(today: NaiveDate, now: NaiveTime) -> Self {
        NowRef { today, now }
    }

    /// A reference at the very start of `today`. With
    /// [`PastSlotPolicy::ClockTime`](crate::policy::PastSlotPolicy) this
    /// keeps every slot on that day, so it is equivalent to day-level
    /// filtering — useful for reproducible runs pinned to a date.
    pub fn start_of_day(today: NaiveDate) -> Self {
        NowRef {
            today,
            now: NaiveTime::MIN,
        }
    }
}

/// Per-tenant clock: the one place wall-clock time is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantClock {
    pub tz: Tz,
}

impl TenantClock {
    pub fn new(tz: Tz) -> Self {
        TenantClock { tz }
    }

    /// Sample the current date and time in the tenant's zone.
    pub fn capture(&self) -> NowRef {
        let local = Utc::now().with_timezone(&self.tz);
        NowRef {
            today: local.date_naive(),
            now: local.time(),
        }
    }
}
