use std::sync::Arc;

use tracing::{info, warn};

use crate::calculator::AttendanceCalculator;
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::location::LocationValidator;
use crate::model::location::{Location, LocationStatus};
use crate::model::time_entry::TimeEntry;
use crate::store::EngineStore;

/// Policy flags applied on check-in.
#[derive(Debug, Clone, Copy)]
pub struct CheckInPolicy {
    /// Reject check-ins classified `invalid` or `remote`.
    pub require_office_location: bool,
    /// Permit the no-location fallback path when location is required.
    pub allow_location_fallback: bool,
}

impl CheckInPolicy {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            require_office_location: config.require_office_location,
            allow_location_fallback: config.allow_location_fallback,
        }
    }
}

/// Enforces the one-open-session-per-employee state machine.
///
/// Per employee the lifecycle is `NONE -> check_in -> OPEN -> check_out ->
/// NONE`; a second check-in while open is a `Conflict`, a checkout with no
/// open session is `NotFound`. The check-then-insert race is delegated to
/// the store's atomic `insert_open_entry`.
pub struct SessionManager<S: EngineStore, C: Clock> {
    store: Arc<S>,
    clock: C,
    validator: LocationValidator,
    calculator: AttendanceCalculator,
    policy: CheckInPolicy,
}

impl<S: EngineStore, C: Clock> SessionManager<S, C> {
    pub fn new(
        store: Arc<S>,
        clock: C,
        validator: LocationValidator,
        calculator: AttendanceCalculator,
        policy: CheckInPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            validator,
            calculator,
            policy,
        }
    }

    /// Opens a session, classifying the reported location first.
    pub fn check_in(&self, employee_id: u64, location: Option<Location>) -> EngineResult<TimeEntry> {
        let check = self.validator.classify(location.as_ref());

        match check.status {
            LocationStatus::Invalid => {
                return Err(EngineError::validation(check.message));
            }
            LocationStatus::Remote if self.policy.require_office_location => {
                return Err(EngineError::validation(check.message));
            }
            LocationStatus::Unavailable
                if self.policy.require_office_location && !self.policy.allow_location_fallback =>
            {
                return Err(EngineError::validation(
                    "location is required for check-in",
                ));
            }
            _ => {}
        }

        let mut entry = TimeEntry::open(employee_id, self.clock.now(), location, check.status);
        entry.requires_manual_review = match check.status {
            // Accepted outside the fence, or on an untrusted fix while the
            // office fence is enforced: leave a trail for human review.
            LocationStatus::Remote => true,
            LocationStatus::LowAccuracy => self.policy.require_office_location,
            LocationStatus::Unavailable => self.policy.require_office_location,
            _ => false,
        };

        if entry.requires_manual_review {
            warn!(employee_id, status = %check.status, message = %check.message, "check-in flagged for review");
        }

        let entry = self.store.insert_open_entry(entry)?;
        info!(employee_id, entry_id = %entry.id, status = %check.status, "checked in");
        Ok(entry)
    }

    /// Fallback path for devices that cannot produce a fix at all.
    ///
    /// Always flagged for manual review; the stated reason goes into the
    /// entry notes.
    pub fn check_in_without_location(
        &self,
        employee_id: u64,
        reason: &str,
    ) -> EngineResult<TimeEntry> {
        if self.policy.require_office_location && !self.policy.allow_location_fallback {
            return Err(EngineError::validation(
                "location is required and fallback check-in is disabled",
            ));
        }

        let mut entry =
            TimeEntry::open(employee_id, self.clock.now(), None, LocationStatus::Unavailable);
        entry.requires_manual_review = true;
        entry.notes = Some(format!("checked in without location: {reason}"));

        let entry = self.store.insert_open_entry(entry)?;
        info!(employee_id, entry_id = %entry.id, reason, "checked in without location");
        Ok(entry)
    }

    /// Closes the open session and upserts the day's attendance record.
    ///
    /// Only coordinate format is validated here; the geofence policy does
    /// not apply on the way out.
    pub fn check_out(
        &self,
        employee_id: u64,
        location: Option<Location>,
        notes: Option<String>,
    ) -> EngineResult<TimeEntry> {
        let mut entry = self
            .store
            .find_open_entry(employee_id)?
            .ok_or_else(|| {
                EngineError::not_found(format!("no open session for employee {employee_id}"))
            })?;

        if let Some(loc) = &location {
            if !loc.is_valid() {
                return Err(EngineError::validation(format!(
                    "invalid checkout coordinates ({}, {})",
                    loc.latitude, loc.longitude
                )));
            }
        }

        let now = self.clock.now();
        if now < entry.check_in_time {
            return Err(EngineError::validation(
                "checkout time precedes check-in time",
            ));
        }

        entry.close(now, location, notes);
        let record = self.calculator.derive_record(&entry);
        self.store.commit_checkout(&entry, &record)?;

        info!(
            employee_id,
            entry_id = %entry.id,
            total_hours = entry.total_hours.unwrap_or(0.0),
            attendance = %record.status,
            "checked out"
        );
        Ok(entry)
    }

    /// The employee's currently open entry, if any.
    pub fn active_entry(&self, employee_id: u64) -> EngineResult<Option<TimeEntry>> {
        self.store.find_open_entry(employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::WorkSchedule;
    use crate::clock::FixedClock;
    use crate::model::attendance::AttendanceStatus;
    use crate::store::{AttendanceRecordStore, MemoryStore};
    use chrono::{Duration, TimeZone, Utc};

    fn manager(policy: CheckInPolicy) -> (SessionManager<MemoryStore, FixedClock>, FixedClock) {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        let store = Arc::new(MemoryStore::new());
        let validator = LocationValidator::new(Some(Location::new(0.0, 0.0)), 100.0);
        let calculator = AttendanceCalculator::new(WorkSchedule::default());
        (
            SessionManager::new(store, clock.clone(), validator, calculator, policy),
            clock,
        )
    }

    fn lenient() -> CheckInPolicy {
        CheckInPolicy {
            require_office_location: false,
            allow_location_fallback: true,
        }
    }

    fn strict() -> CheckInPolicy {
        CheckInPolicy {
            require_office_location: true,
            allow_location_fallback: false,
        }
    }

    #[test]
    fn double_check_in_is_conflict() {
        let (manager, _) = manager(lenient());
        manager.check_in(7, Some(Location::new(0.0, 0.0))).unwrap();

        let err = manager.check_in(7, Some(Location::new(0.0, 0.0))).unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));
    }

    #[test]
    fn check_out_without_session_is_not_found() {
        let (manager, _) = manager(lenient());
        let err = manager.check_out(7, None, None).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn full_cycle_computes_hours_and_record() {
        let (manager, clock) = manager(lenient());
        let entry = manager.check_in(7, Some(Location::new(0.0, 0.0))).unwrap();
        assert_eq!(entry.location_status, LocationStatus::Valid);

        clock.advance(Duration::minutes(510));
        let closed = manager.check_out(7, None, Some("done".into())).unwrap();
        assert_eq!(closed.total_hours, Some(8.5));
        assert_eq!(closed.notes.as_deref(), Some("done"));
        assert!(manager.active_entry(7).unwrap().is_none());

        let record = manager
            .store
            .get_record(7, entry.check_in_time.date_naive())
            .unwrap()
            .unwrap();
        assert_eq!(record.total_hours, 8.5);
        assert_eq!(record.overtime_hours, 0.5);
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn re_check_in_after_checkout_cycles() {
        let (manager, clock) = manager(lenient());
        manager.check_in(7, None).unwrap();
        clock.advance(Duration::hours(4));
        manager.check_out(7, None, None).unwrap();

        clock.advance(Duration::hours(1));
        manager.check_in(7, None).unwrap();
        assert!(manager.active_entry(7).unwrap().is_some());
    }

    #[test]
    fn invalid_coordinates_rejected_both_ways() {
        let (manager, clock) = manager(lenient());
        let err = manager.check_in(7, Some(Location::new(95.0, 0.0))).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        manager.check_in(7, None).unwrap();
        clock.advance(Duration::hours(8));
        let err = manager
            .check_out(7, Some(Location::new(0.0, 200.0)), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        // The session stays open after the failed checkout.
        assert!(manager.active_entry(7).unwrap().is_some());
    }

    #[test]
    fn remote_check_in_blocked_when_office_required() {
        let policy = CheckInPolicy {
            require_office_location: true,
            allow_location_fallback: true,
        };
        let (manager, _) = manager(policy);

        let err = manager.check_in(7, Some(Location::new(0.5, 0.5))).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn remote_check_in_allowed_but_flagged_when_lenient() {
        let (manager, _) = manager(lenient());
        let entry = manager.check_in(7, Some(Location::new(0.5, 0.5))).unwrap();
        assert_eq!(entry.location_status, LocationStatus::Remote);
        assert!(entry.requires_manual_review);
    }

    #[test]
    fn low_accuracy_allowed_with_warning_when_office_required() {
        let policy = CheckInPolicy {
            require_office_location: true,
            allow_location_fallback: true,
        };
        let (manager, _) = manager(policy);

        let entry = manager
            .check_in(7, Some(Location::with_accuracy(0.0, 0.0, 250.0)))
            .unwrap();
        assert_eq!(entry.location_status, LocationStatus::LowAccuracy);
        assert!(entry.requires_manual_review);
    }

    #[test]
    fn fallback_check_in_flags_review() {
        let (manager, _) = manager(lenient());
        let entry = manager.check_in_without_location(7, "gps disabled").unwrap();
        assert_eq!(entry.location_status, LocationStatus::Unavailable);
        assert!(entry.requires_manual_review);
        assert!(entry.notes.unwrap().contains("gps disabled"));
    }

    #[test]
    fn fallback_rejected_under_strict_policy() {
        let (manager, _) = manager(strict());
        let err = manager.check_in_without_location(7, "gps disabled").unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = manager.check_in(7, None).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
