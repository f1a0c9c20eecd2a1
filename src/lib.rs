//! Attendance and session engine: tracks when an employee is on the clock,
//! classifies where they checked in against an office geofence, and derives
//! daily attendance records and period work-hour summaries from the raw
//! check-in/check-out events.
//!
//! Transport, auth and real persistence live outside this crate; it is
//! driven through [`AttendanceService`] with an injected [`Clock`] and any
//! [`EngineStore`] implementation ([`MemoryStore`] ships for tests and
//! database-less embedders).

pub mod calculator;
pub mod clock;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod service;
pub mod session;
pub mod store;
pub mod summary;

pub use calculator::{AttendanceCalculator, WorkSchedule};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use location::{LocationValidator, haversine_distance_meters};
pub use model::{
    AttendanceRecord, AttendanceStatus, Location, LocationCheck, LocationStatus, SessionStatus,
    TimeEntry, WorkHoursSummary,
};
pub use service::AttendanceService;
pub use session::{CheckInPolicy, SessionManager};
pub use store::{AttendanceRecordStore, EngineStore, MemoryStore, TimeEntryStore};
pub use summary::SummaryAggregator;
