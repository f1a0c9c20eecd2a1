use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Daily attendance classification, derived from the day's time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// Missing checkout, or worked less than 75% of standard hours.
    Partial,
    Late,
    EarlyLeave,
}

/// Per-employee, per-day attendance facts.
///
/// Keyed uniquely by `(employee_id, date)` and recomputed (upsert) every
/// time a checkout completes for that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub break_time: f64,
    pub status: AttendanceStatus,
    pub late_minutes: i64,
    pub early_leave_minutes: i64,
}

impl AttendanceRecord {
    /// An all-zero record for a day with no activity.
    pub fn absent(employee_id: u64, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            check_in_time: None,
            check_out_time: None,
            total_hours: 0.0,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            break_time: 0.0,
            status: AttendanceStatus::Absent,
            late_minutes: 0,
            early_leave_minutes: 0,
        }
    }
}
