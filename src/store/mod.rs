pub mod memory;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::EngineResult;
use crate::model::attendance::AttendanceRecord;
use crate::model::time_entry::TimeEntry;

pub use memory::MemoryStore;

/// Persistence contract for time entries.
///
/// Implementations are assumed transactional and queryable by employee id
/// and date. `insert_open_entry` carries the open-session invariant: the
/// "no open entry exists" check and the insert must happen as one atomic
/// step (unique index on employee + open status, or an equivalent lock),
/// with the loser reported as `EngineError::Conflict`.
pub trait TimeEntryStore: Send + Sync {
    /// Atomically inserts an open entry, failing with `Conflict` if the
    /// employee already has one.
    fn insert_open_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Replaces an existing entry by id.
    fn update_entry(&self, entry: &TimeEntry) -> EngineResult<()>;

    /// The employee's currently open entry, if any.
    fn find_open_entry(&self, employee_id: u64) -> EngineResult<Option<TimeEntry>>;

    /// Entries whose check-in date falls within `[start, end]`.
    fn find_entries_in_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>>;
}

/// Persistence contract for derived attendance records.
pub trait AttendanceRecordStore: Send + Sync {
    fn get_record(&self, employee_id: u64, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>>;

    /// Records within `[start, end]`, ordered by date.
    fn list_records_in_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Inserts or fully overwrites the record for `(employee_id, date)`.
    fn upsert_record(&self, record: &AttendanceRecord) -> EngineResult<()>;
}

/// Combined store used by the session manager, so a checkout and the
/// attendance recompute it triggers can commit together.
pub trait EngineStore: TimeEntryStore + AttendanceRecordStore {
    /// Persists the closed entry and its derived record.
    ///
    /// The default runs the two writes back to back, retrying the upsert
    /// once so a transient failure does not leave a closed entry without
    /// its attendance record. Transactional backends should override this
    /// to commit both in a single transaction.
    fn commit_checkout(&self, entry: &TimeEntry, record: &AttendanceRecord) -> EngineResult<()> {
        self.update_entry(entry)?;
        if let Err(err) = self.upsert_record(record) {
            warn!(
                error = %err,
                employee_id = entry.employee_id,
                "attendance upsert failed after checkout, retrying"
            );
            self.upsert_record(record)?;
        }
        Ok(())
    }
}
