//! Once-per-day check-in decision.

use super::CheckInMarkers;
use chrono::NaiveDate;
use std::fmt;

/// What the dashboard does with today's check-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckInDecision {
    /// Prompt the user.
    Show,
    /// Do not prompt: skipped today, or a connected device supplies the data.
    Skip,
    /// Already completed today.
    Done,
}

impl CheckInDecision {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Skip => "skip",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CheckInDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides today's prompt. Completion wins over skipping, which wins over
/// showing; markers from other days are ignored.
#[must_use]
pub fn decide(markers: &CheckInMarkers, today: NaiveDate) -> CheckInDecision {
    if markers.completed_date() == Some(today) {
        return CheckInDecision::Done;
    }
    if markers.skipped_date() == Some(today) || markers.device_connected() {
        return CheckInDecision::Skip;
    }
    CheckInDecision::Show
}
