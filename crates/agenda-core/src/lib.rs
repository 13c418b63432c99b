//! # agenda-core
//!
//! Pure availability engine for appointment booking. Given a professional's
//! recurring weekly schedule, date-specific exceptions (holidays), the set of
//! already-booked intervals, and a fixed service duration, it produces the
//! ordered bookable start times per date across a rolling window (default
//! 7 days).
//!
//! The engine performs no I/O and reads no ambient state: the surrounding
//! system fetches schedule and bookings from its document store, captures a
//! single "now" reference in the tenant's time zone, and calls
//! [`compute_availability`]. Identical inputs always yield identical output.
//!
//! ## Modules
//!
//! - [`schedule`] — work blocks, weekly schedule, exception dates, and
//!   validation of raw directory documents
//! - [`booked`] — booked intervals parsed from appointment-store documents
//! - [`slots`] — the slot-enumeration core ([`compute_availability`])
//! - [`conflict`] — commit-time overlap check for booking writes
//! - [`clock`] — one-shot "now" capture in an explicit tenant zone
//! - [`policy`] — past-slot filtering variants
//! - [`error`] — error types

pub mod booked;
pub mod clock;
pub mod conflict;
pub mod error;
pub mod policy;
pub mod schedule;
pub mod slots;

pub use booked::{AppointmentDoc, BookedInterval};
pub use clock::{NowRef, TenantClock};
pub use conflict::{check_booking, BookingConflict};
pub use error::AgendaError;
pub use policy::PastSlotPolicy;
pub use schedule::{ExceptionSet, ProfessionalDoc, ScheduleIssue, WeeklySchedule, WorkBlock};
pub use slots::{compute_availability, Availability, QueryWindow};
