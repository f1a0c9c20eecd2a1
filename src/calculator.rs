use chrono::{DateTime, NaiveTime, Utc};

use crate::config::EngineConfig;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::time_entry::{TimeEntry, round_hours};

/// Worked hours below this fraction of the standard day count as partial
/// attendance even when both punches exist.
const PARTIAL_DAY_FRACTION: f64 = 0.75;

/// Scheduled working day used to judge lateness and early departure.
#[derive(Debug, Clone)]
pub struct WorkSchedule {
    pub standard_hours: f64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub late_threshold_minutes: i64,
    pub early_leave_threshold_minutes: i64,
}

impl WorkSchedule {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            standard_hours: config.standard_work_hours,
            start_time: config.scheduled_start_time,
            end_time: config.scheduled_end_time,
            late_threshold_minutes: config.late_threshold_minutes,
            early_leave_threshold_minutes: config.early_leave_threshold_minutes,
        }
    }
}

impl Default for WorkSchedule {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Derives per-day attendance facts from a time entry.
///
/// Pure over its inputs; re-deriving from the same entry always yields an
/// identical record.
#[derive(Debug, Clone)]
pub struct AttendanceCalculator {
    schedule: WorkSchedule,
}

impl AttendanceCalculator {
    pub fn new(schedule: WorkSchedule) -> Self {
        Self { schedule }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(WorkSchedule::from_config(config))
    }

    pub fn schedule(&self) -> &WorkSchedule {
        &self.schedule
    }

    /// Derives the attendance record for the entry's check-in date.
    ///
    /// The record is always keyed by the check-in date, so a shift running
    /// past midnight stays on the day it started.
    pub fn derive_record(&self, entry: &TimeEntry) -> AttendanceRecord {
        let date = entry.check_in_time.date_naive();
        let scheduled_start = self.scheduled_at(entry.check_in_time, self.schedule.start_time);
        let scheduled_end = self.scheduled_at(entry.check_in_time, self.schedule.end_time);

        let late_minutes = (entry.check_in_time - scheduled_start).num_minutes().max(0);
        let early_leave_minutes = match entry.check_out_time {
            Some(out) => (scheduled_end - out).num_minutes().max(0),
            None => 0,
        };

        let total_hours = entry.total_hours.unwrap_or(0.0);
        let regular_hours = round_hours(total_hours.min(self.schedule.standard_hours));
        let overtime_hours = round_hours((total_hours - self.schedule.standard_hours).max(0.0));

        let status = self.classify(entry, total_hours, late_minutes, early_leave_minutes);

        AttendanceRecord {
            employee_id: entry.employee_id,
            date,
            check_in_time: Some(entry.check_in_time),
            check_out_time: entry.check_out_time,
            total_hours,
            regular_hours,
            overtime_hours,
            break_time: 0.0,
            status,
            late_minutes,
            early_leave_minutes,
        }
    }

    // First matching rule wins.
    fn classify(
        &self,
        entry: &TimeEntry,
        total_hours: f64,
        late_minutes: i64,
        early_leave_minutes: i64,
    ) -> AttendanceStatus {
        if entry.check_out_time.is_none() {
            return AttendanceStatus::Partial;
        }
        if late_minutes > self.schedule.late_threshold_minutes {
            return AttendanceStatus::Late;
        }
        if early_leave_minutes > self.schedule.early_leave_threshold_minutes {
            return AttendanceStatus::EarlyLeave;
        }
        if total_hours < PARTIAL_DAY_FRACTION * self.schedule.standard_hours {
            return AttendanceStatus::Partial;
        }
        AttendanceStatus::Present
    }

    /// Resolves a schedule time-of-day on the entry's calendar day (UTC).
    fn scheduled_at(&self, reference: DateTime<Utc>, time: NaiveTime) -> DateTime<Utc> {
        reference.date_naive().and_time(time).and_utc()
    }
}
