//! Local markers read by the daily check-in gate.

use chrono::NaiveDate;

/// Snapshot of the markers that decide whether today's check-in shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckInMarkers {
    completed_date: Option<NaiveDate>,
    skipped_date: Option<NaiveDate>,
    device_connected: bool,
}

impl CheckInMarkers {
    /// Creates markers with nothing recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completed_date: None,
            skipped_date: None,
            device_connected: false,
        }
    }

    /// Sets the date the check-in was last completed.
    #[must_use]
    pub const fn with_completed_date(mut self, date: Option<NaiveDate>) -> Self {
        self.completed_date = date;
        self
    }

    /// Sets the date the check-in was last skipped.
    #[must_use]
    pub const fn with_skipped_date(mut self, date: Option<NaiveDate>) -> Self {
        self.skipped_date = date;
        self
    }

    /// Sets whether a wearable supplies the day's data.
    #[must_use]
    pub const fn with_device_connected(mut self, connected: bool) -> Self {
        self.device_connected = connected;
        self
    }

    /// Returns the last completion date.
    #[must_use]
    pub const fn completed_date(&self) -> Option<NaiveDate> {
        self.completed_date
    }

    /// Returns the last skip date.
    #[must_use]
    pub const fn skipped_date(&self) -> Option<NaiveDate> {
        self.skipped_date
    }

    /// Returns `true` when a wearable is connected.
    #[must_use]
    pub const fn device_connected(&self) -> bool {
        self.device_connected
    }
}
