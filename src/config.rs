use std::env;
use std::str::FromStr;

use chrono::NaiveTime;
use dotenvy::dotenv;

use crate::model::location::Location;

/// Engine configuration, loaded once at startup and treated as immutable.
///
/// Every option has a default so `from_env` never panics; a malformed env
/// value falls back to the default.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Office coordinates. (0, 0) means no office is configured.
    pub office_latitude: f64,
    pub office_longitude: f64,

    /// Geofence radius for a `valid` classification.
    pub max_location_distance_meters: f64,

    /// Reject check-ins classified `invalid` or `remote`.
    pub require_office_location: bool,
    /// Permit `check_in_without_location` when location is required.
    pub allow_location_fallback: bool,

    pub standard_work_hours: f64,
    pub late_threshold_minutes: i64,
    pub early_leave_threshold_minutes: i64,
    pub scheduled_start_time: NaiveTime,
    pub scheduled_end_time: NaiveTime,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            office_latitude: 0.0,
            office_longitude: 0.0,
            max_location_distance_meters: 100.0,
            require_office_location: false,
            allow_location_fallback: true,
            standard_work_hours: 8.0,
            late_threshold_minutes: 15,
            early_leave_threshold_minutes: 30,
            scheduled_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            scheduled_end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            office_latitude: env_parse("ATTEND_OFFICE_LATITUDE", defaults.office_latitude),
            office_longitude: env_parse("ATTEND_OFFICE_LONGITUDE", defaults.office_longitude),
            max_location_distance_meters: env_parse(
                "ATTEND_MAX_LOCATION_DISTANCE_METERS",
                defaults.max_location_distance_meters,
            ),
            require_office_location: env_parse(
                "ATTEND_REQUIRE_OFFICE_LOCATION",
                defaults.require_office_location,
            ),
            allow_location_fallback: env_parse(
                "ATTEND_ALLOW_LOCATION_FALLBACK",
                defaults.allow_location_fallback,
            ),
            standard_work_hours: env_parse(
                "ATTEND_STANDARD_WORK_HOURS",
                defaults.standard_work_hours,
            ),
            late_threshold_minutes: env_parse(
                "ATTEND_LATE_THRESHOLD_MINUTES",
                defaults.late_threshold_minutes,
            ),
            early_leave_threshold_minutes: env_parse(
                "ATTEND_EARLY_LEAVE_THRESHOLD_MINUTES",
                defaults.early_leave_threshold_minutes,
            ),
            scheduled_start_time: env_time(
                "ATTEND_SCHEDULED_START_TIME",
                defaults.scheduled_start_time,
            ),
            scheduled_end_time: env_time("ATTEND_SCHEDULED_END_TIME", defaults.scheduled_end_time),
        }
    }

    /// The configured office coordinate, or `None` when lat/lon are both 0.
    pub fn office_location(&self) -> Option<Location> {
        if self.office_latitude == 0.0 && self.office_longitude == 0.0 {
            None
        } else {
            Some(Location::new(self.office_latitude, self.office_longitude))
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_time(key: &str, default: NaiveTime) -> NaiveTime {
    env::var(key)
        .ok()
        .and_then(|v| NaiveTime::parse_from_str(&v, "%H:%M").ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let config = EngineConfig::default();
        assert_eq!(config.max_location_distance_meters, 100.0);
        assert_eq!(config.standard_work_hours, 8.0);
        assert_eq!(config.late_threshold_minutes, 15);
        assert_eq!(config.early_leave_threshold_minutes, 30);
        assert_eq!(
            config.scheduled_start_time,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            config.scheduled_end_time,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap()
        );
        assert!(config.allow_location_fallback);
        assert!(!config.require_office_location);
    }

    #[test]
    fn zero_coordinates_mean_no_office() {
        let config = EngineConfig::default();
        assert!(config.office_location().is_none());

        let config = EngineConfig {
            office_latitude: 23.8103,
            office_longitude: 90.4125,
            ..EngineConfig::default()
        };
        let office = config.office_location().unwrap();
        assert_eq!(office.latitude, 23.8103);
    }
}
