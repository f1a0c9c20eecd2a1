use std::sync::Arc;

use chrono::NaiveDate;

use crate::calculator::AttendanceCalculator;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::location::LocationValidator;
use crate::model::attendance::AttendanceRecord;
use crate::model::location::{Location, LocationCheck};
use crate::model::summary::WorkHoursSummary;
use crate::model::time_entry::TimeEntry;
use crate::session::{CheckInPolicy, SessionManager};
use crate::store::EngineStore;
use crate::summary::SummaryAggregator;

/// Transport-agnostic facade over the attendance engine.
///
/// Wires the configuration into the validator, schedule and policy once at
/// construction; an HTTP (or other) layer on top only maps these calls and
/// error kinds onto its own surface.
pub struct AttendanceService<S: EngineStore, C: Clock> {
    store: Arc<S>,
    sessions: SessionManager<S, C>,
    validator: LocationValidator,
}

impl<S: EngineStore, C: Clock> AttendanceService<S, C> {
    pub fn new(config: &EngineConfig, store: Arc<S>, clock: C) -> Self {
        let validator = LocationValidator::from_config(config);
        let sessions = SessionManager::new(
            Arc::clone(&store),
            clock,
            validator.clone(),
            AttendanceCalculator::from_config(config),
            CheckInPolicy::from_config(config),
        );
        Self {
            store,
            sessions,
            validator,
        }
    }

    pub fn check_in(&self, employee_id: u64, location: Option<Location>) -> EngineResult<TimeEntry> {
        self.sessions.check_in(employee_id, location)
    }

    pub fn check_in_without_location(
        &self,
        employee_id: u64,
        reason: &str,
    ) -> EngineResult<TimeEntry> {
        self.sessions.check_in_without_location(employee_id, reason)
    }

    pub fn check_out(
        &self,
        employee_id: u64,
        location: Option<Location>,
        notes: Option<String>,
    ) -> EngineResult<TimeEntry> {
        self.sessions.check_out(employee_id, location, notes)
    }

    pub fn get_active_entry(&self, employee_id: u64) -> EngineResult<Option<TimeEntry>> {
        self.sessions.active_entry(employee_id)
    }

    /// The derived record for one day, `NotFound` if the day has none.
    pub fn get_attendance_record(
        &self,
        employee_id: u64,
        date: &str,
    ) -> EngineResult<AttendanceRecord> {
        let date = parse_date(date)?;
        self.store.get_record(employee_id, date)?.ok_or_else(|| {
            EngineError::not_found(format!(
                "no attendance record for employee {employee_id} on {date}"
            ))
        })
    }

    pub fn get_attendance_records(
        &self,
        employee_id: u64,
        start_date: &str,
        end_date: &str,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let (start, end) = parse_range(start_date, end_date)?;
        self.store.list_records_in_range(employee_id, start, end)
    }

    pub fn get_work_hours_summary(
        &self,
        employee_id: u64,
        start_date: &str,
        end_date: &str,
    ) -> EngineResult<WorkHoursSummary> {
        let (start, end) = parse_range(start_date, end_date)?;
        let records = self.store.list_records_in_range(employee_id, start, end)?;
        Ok(SummaryAggregator::summarize(&records, employee_id, start, end))
    }

    /// Classifies a location without opening a session.
    pub fn validate_location(&self, location: &Location) -> LocationCheck {
        self.validator.classify(Some(location))
    }
}

/// Parses a `YYYY-MM-DD` date string, rejecting anything else before it can
/// reach a store.
fn parse_date(input: &str) -> EngineResult<NaiveDate> {
    if input.len() != 10 {
        return Err(EngineError::validation(format!(
            "date must be YYYY-MM-DD, got {input:?}"
        )));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        EngineError::validation(format!("date must be YYYY-MM-DD, got {input:?}"))
    })
}

fn parse_range(start: &str, end: &str) -> EngineResult<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(EngineError::validation(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2026-03-02").is_ok());
        assert!(parse_date("2026-3-2").is_err());
        assert!(parse_date("02-03-2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parse_range_orders_endpoints() {
        assert!(parse_range("2026-03-01", "2026-03-31").is_ok());
        let err = parse_range("2026-03-31", "2026-03-01").unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
