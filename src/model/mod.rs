pub mod attendance;
pub mod location;
pub mod summary;
pub mod time_entry;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use location::{Location, LocationCheck, LocationStatus};
pub use summary::WorkHoursSummary;
pub use time_entry::{SessionStatus, TimeEntry};
