//! Filtering policies for slots that have already passed.

/// Policy for slots on the current day that lie before "now".
///
/// The two policies correspond to the two behaviors observed in deployed
/// booking front-ends; the choice is explicit per call rather than implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PastSlotPolicy {
    /// Day-level comparison only: any slot on a day on or after today is
    /// kept, even when its start time is earlier than the current time.
    #[default]
    DateOnly,
    /// Additionally drop slots on today that start strictly before now.
    ClockTime,
}
