//! `agenda` CLI — compute bookable slots and probe booking conflicts from
//! JSON documents.
//!
//! The binary plays the role of the booking flow's calling layer: it loads a
//! professional's directory document and an appointment-store dump from disk,
//! validates them at the boundary, and runs the pure engine.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for the next 7 days, 30-minute service
//! agenda slots --professional prof.json --appointments appts.json \
//!     --professional-id pro-1 --duration 30
//!
//! # Pin "today" for a reproducible run; --at additionally pins the clock so
//! # --clock-filter can drop already-elapsed slots
//! agenda slots --professional prof.json --professional-id pro-1 \
//!     --duration 30 --from 2026-09-07 --at 10:10 --clock-filter
//!
//! # Probe a commit: exit 1 when the slot is already taken
//! agenda check --appointments appts.json --professional-id pro-1 \
//!     --start 2026-09-07T10:00 --duration 30
//! ```

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::process;

use agenda_core::booked::parse_timestamp;
use agenda_core::schedule::{parse_date, parse_hhmm};
use agenda_core::{
    check_booking, compute_availability, AppointmentDoc, BookedInterval, NowRef, PastSlotPolicy,
    ProfessionalDoc, QueryWindow, TenantClock,
};

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Availability engine CLI: bookable slots from schedules, exceptions, and bookings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute bookable start times per date over a rolling window
    Slots {
        /// Professional directory document (JSON: weeklySchedule + exceptions)
        #[arg(long)]
        professional: String,
        /// Appointment store dump (JSON array); omit for no existing bookings
        #[arg(long)]
        appointments: Option<String>,
        /// Professional id to compute for (other ids in the dump are ignored)
        #[arg(long)]
        professional_id: String,
        /// Service duration in minutes
        #[arg(long)]
        duration: i64,
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: u32,
        /// Pin "today" to this date (YYYY-MM-DD) instead of sampling the clock
        #[arg(long)]
        from: Option<String>,
        /// Pin the current time (HH:MM) within the --from date; defaults to 00:00
        #[arg(long, requires = "from")]
        at: Option<String>,
        /// Tenant IANA time zone used when sampling the clock
        #[arg(long, default_value = "UTC")]
        timezone: String,
        /// Also drop today's slots that start before the current time
        #[arg(long)]
        clock_filter: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Probe whether a proposed booking collides with an existing one
    Check {
        /// Appointment store dump (JSON array)
        #[arg(long)]
        appointments: String,
        /// Professional id the booking is for
        #[arg(long)]
        professional_id: String,
        /// Proposed start (ISO-8601 wall clock, e.g. 2026-09-07T10:00)
        #[arg(long)]
        start: String,
        /// Booking duration in minutes
        #[arg(long)]
        duration: i64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Slots {
            professional,
            appointments,
            professional_id,
            duration,
            days,
            from,
            at,
            timezone,
            clock_filter,
            output,
        } => {
            let doc: ProfessionalDoc = read_json(&professional)?;
            let validated = doc.validate();
            for issue in &validated.issues {
                eprintln!("warning: schedule entry {:?}: {}", issue.field, issue.error);
            }

            let booked = match appointments {
                Some(path) => load_appointments(&path, duration)?,
                None => Vec::new(),
            };

            let now = match from {
                Some(raw) => {
                    let today =
                        parse_date(&raw).with_context(|| format!("Invalid --from date: {raw}"))?;
                    match at {
                        Some(raw) => NowRef::new(
                            today,
                            parse_hhmm(&raw)
                                .with_context(|| format!("Invalid --at time: {raw}"))?,
                        ),
                        None => {
                            // A pinned date alone reads as 00:00; the clock
                            // filter drops nothing at that time.
                            if clock_filter {
                                eprintln!(
                                    "warning: --clock-filter has no effect with --from alone; \
                                     pass --at HH:MM to pin the current time"
                                );
                            }
                            NowRef::start_of_day(today)
                        }
                    }
                }
                None => {
                    let tz = timezone
                        .parse::<Tz>()
                        .map_err(|_| anyhow::anyhow!("Unknown IANA timezone: {timezone}"))?;
                    TenantClock::new(tz).capture()
                }
            };
            let policy = if clock_filter {
                PastSlotPolicy::ClockTime
            } else {
                PastSlotPolicy::DateOnly
            };

            let availability = compute_availability(
                &validated.schedule,
                &validated.exceptions,
                &booked,
                &professional_id,
                duration,
                &QueryWindow::new(now.today, days),
                now,
                policy,
            )
            .context("Failed to compute availability")?;

            let json = serde_json::to_string_pretty(&availability)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check {
            appointments,
            professional_id,
            start,
            duration,
        } => {
            let booked = load_appointments(&appointments, duration)?;
            let start = parse_timestamp(&start)
                .with_context(|| format!("Invalid --start timestamp: {start}"))?;

            match check_booking(start, duration, &booked, &professional_id)
                .context("Failed to check booking")?
            {
                Some(conflict) => {
                    // Recoverable condition for the caller: re-query availability.
                    eprintln!(
                        "slot no longer available: overlaps booking {}..{} by {} min",
                        conflict.booked_start, conflict.booked_end, conflict.overlap_minutes
                    );
                    process::exit(1);
                }
                None => {
                    println!("free: {} for {} min", start, duration);
                }
            }
        }
    }

    Ok(())
}

/// Load and validate an appointment-store dump. `default_duration` fills in
/// documents that omit their own duration.
fn load_appointments(path: &str, default_duration: i64) -> Result<Vec<BookedInterval>> {
    let docs: Vec<AppointmentDoc> = read_json(path)?;
    docs.iter()
        .enumerate()
        .map(|(index, doc)| {
            BookedInterval::from_doc(doc, default_duration)
                .with_context(|| format!("Invalid appointment document #{index} in {path}"))
        })
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse JSON in {path}"))
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {path}"))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
