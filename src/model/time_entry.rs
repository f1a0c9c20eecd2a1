use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::model::location::{Location, LocationStatus};

/// Lifecycle state of a work session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    CheckedIn,
    CheckedOut,
}

/// One check-in/check-out cycle for an employee.
///
/// At most one entry per employee may be in `CheckedIn` state at any
/// instant; the store enforces that on insert. An entry is mutated exactly
/// once, on checkout, and is immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Uuid,
    pub employee_id: u64,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_in_location: Option<Location>,
    pub check_out_location: Option<Location>,
    pub location_status: LocationStatus,
    /// Elapsed hours between check-in and check-out, rounded to 2 decimals.
    pub total_hours: Option<f64>,
    pub status: SessionStatus,
    pub notes: Option<String>,
    pub requires_manual_review: bool,
}

impl TimeEntry {
    /// Opens a new entry at `at` with a freshly generated id.
    pub fn open(
        employee_id: u64,
        at: DateTime<Utc>,
        location: Option<Location>,
        location_status: LocationStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            check_in_time: at,
            check_out_time: None,
            check_in_location: location,
            check_out_location: None,
            location_status,
            total_hours: None,
            status: SessionStatus::CheckedIn,
            notes: None,
            requires_manual_review: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::CheckedIn && self.check_out_time.is_none()
    }

    /// Closes the entry at `at`, filling checkout fields and total hours.
    ///
    /// Caller must have verified `at >= check_in_time`.
    pub fn close(&mut self, at: DateTime<Utc>, location: Option<Location>, notes: Option<String>) {
        let elapsed_secs = (at - self.check_in_time).num_seconds() as f64;
        self.check_out_time = Some(at);
        self.check_out_location = location;
        self.total_hours = Some(round_hours(elapsed_secs / 3600.0));
        self.status = SessionStatus::CheckedOut;
        if notes.is_some() {
            self.notes = notes;
        }
    }
}

/// Rounds an hour figure to 2 decimal places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
