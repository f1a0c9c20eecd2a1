use crate::config::EngineConfig;
use crate::model::location::{Location, LocationCheck, LocationStatus};

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Fixes with worse horizontal accuracy than this are not trusted for
/// distance classification.
pub const MAX_ACCEPTABLE_ACCURACY_METERS: f64 = 100.0;

/// Classifies reported coordinates against the configured office geofence.
///
/// Pure: holds only immutable configuration, never mutates anything.
#[derive(Debug, Clone)]
pub struct LocationValidator {
    office: Option<Location>,
    max_radius_meters: f64,
}

impl LocationValidator {
    pub fn new(office: Option<Location>, max_radius_meters: f64) -> Self {
        Self {
            office,
            max_radius_meters,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.office_location(), config.max_location_distance_meters)
    }

    /// Classifies a reported coordinate.
    ///
    /// Precedence: missing fix, malformed coordinates, low accuracy, missing
    /// office config, then distance. Accuracy wins over distance because a
    /// distance computed from a low-confidence fix is unreliable.
    pub fn classify(&self, reported: Option<&Location>) -> LocationCheck {
        let Some(location) = reported else {
            return LocationCheck::new(
                LocationStatus::Unavailable,
                "no location provided with this request",
            );
        };

        if !location.is_valid() {
            return LocationCheck::new(
                LocationStatus::Invalid,
                format!(
                    "invalid coordinates ({}, {})",
                    location.latitude, location.longitude
                ),
            );
        }

        if let Some(accuracy) = location.accuracy {
            if accuracy > MAX_ACCEPTABLE_ACCURACY_METERS {
                return LocationCheck::new(
                    LocationStatus::LowAccuracy,
                    format!("location accuracy too low ({}m)", accuracy.round()),
                );
            }
        }

        let Some(office) = &self.office else {
            return LocationCheck::new(
                LocationStatus::NoOfficeConfig,
                "no office location configured, location accepted",
            );
        };

        // Classify on whole meters so a fix sitting within half a meter of
        // the fence does not flap between statuses.
        let distance = haversine_distance_meters(location, office).round();
        if distance <= self.max_radius_meters {
            LocationCheck::with_distance(
                LocationStatus::Valid,
                format!("within office radius ({}m away)", distance),
                distance,
            )
        } else if distance <= 2.0 * self.max_radius_meters {
            LocationCheck::with_distance(
                LocationStatus::NearOffice,
                format!("near the office ({}m away)", distance),
                distance,
            )
        } else {
            LocationCheck::with_distance(
                LocationStatus::Remote,
                format!("far from the office ({}m away)", distance),
                distance,
            )
        }
    }
}

/// Great-circle distance between two coordinates in meters.
pub fn haversine_distance_meters(a: &Location, b: &Location) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}
