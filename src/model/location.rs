use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A reported GPS coordinate with optional fix metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,

    /// Horizontal accuracy of the fix in meters, when the device reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    /// Where the fix came from, e.g. "gps", "network".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            source: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: Some(accuracy),
            source: None,
        }
    }

    /// Coordinates are usable iff both components are finite and in range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Outcome of classifying a reported coordinate against the office geofence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LocationStatus {
    /// Inside the configured office radius.
    Valid,
    /// Outside the radius but within twice the radius.
    NearOffice,
    /// Beyond twice the office radius.
    Remote,
    /// Fix accuracy worse than the acceptable limit; distance not trusted.
    LowAccuracy,
    /// Coordinates out of range or non-finite.
    Invalid,
    /// No office location configured; every coordinate is accepted.
    NoOfficeConfig,
    /// No location was reported at all.
    Unavailable,
}

/// Classification result returned by the location validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCheck {
    pub status: LocationStatus,
    pub message: String,
    /// Great-circle distance to the office, rounded to whole meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

impl LocationCheck {
    pub fn new(status: LocationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            distance_meters: None,
        }
    }

    pub fn with_distance(status: LocationStatus, message: impl Into<String>, distance: f64) -> Self {
        Self {
            status,
            message: message.into(),
            distance_meters: Some(distance),
        }
    }
}
