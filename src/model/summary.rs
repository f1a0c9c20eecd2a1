use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate work-hours figures over a date range.
///
/// Computed on demand from attendance records, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHoursSummary {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
    pub late_days: u32,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub average_hours_per_day: f64,
}

impl WorkHoursSummary {
    /// Zero summary for a range with no records.
    pub fn empty(employee_id: u64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            employee_id,
            start_date,
            end_date,
            total_days: 0,
            present_days: 0,
            absent_days: 0,
            late_days: 0,
            total_hours: 0.0,
            regular_hours: 0.0,
            overtime_hours: 0.0,
            average_hours_per_day: 0.0,
        }
    }
}
