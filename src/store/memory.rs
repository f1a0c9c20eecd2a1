use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::model::attendance::AttendanceRecord;
use crate::model::time_entry::TimeEntry;
use crate::store::{AttendanceRecordStore, EngineStore, TimeEntryStore};

/// In-memory store backing tests and embedders that run without a database.
///
/// One mutex guards both tables, so the open-entry check-then-insert and
/// the checkout commit are naturally atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    entries: HashMap<Uuid, TimeEntry>,
    /// Index of the single open entry per employee.
    open_by_employee: HashMap<u64, Uuid>,
    records: HashMap<(u64, NaiveDate), AttendanceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeEntryStore for MemoryStore {
    fn insert_open_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut tables = self.inner.lock().unwrap();
        if tables.open_by_employee.contains_key(&entry.employee_id) {
            return Err(EngineError::conflict(format!(
                "employee {} already has an open session",
                entry.employee_id
            )));
        }
        tables.open_by_employee.insert(entry.employee_id, entry.id);
        tables.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn update_entry(&self, entry: &TimeEntry) -> EngineResult<()> {
        let mut tables = self.inner.lock().unwrap();
        if !tables.entries.contains_key(&entry.id) {
            return Err(EngineError::not_found(format!(
                "time entry {} does not exist",
                entry.id
            )));
        }
        if !entry.is_open() {
            tables.open_by_employee.remove(&entry.employee_id);
        }
        tables.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    fn find_open_entry(&self, employee_id: u64) -> EngineResult<Option<TimeEntry>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .open_by_employee
            .get(&employee_id)
            .and_then(|id| tables.entries.get(id))
            .cloned())
    }

    fn find_entries_in_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        let tables = self.inner.lock().unwrap();
        let mut entries: Vec<TimeEntry> = tables
            .entries
            .values()
            .filter(|e| {
                let date = e.check_in_time.date_naive();
                e.employee_id == employee_id && date >= start && date <= end
            })
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.check_in_time);
        Ok(entries)
    }
}

impl AttendanceRecordStore for MemoryStore {
    fn get_record(&self, employee_id: u64, date: NaiveDate) -> EngineResult<Option<AttendanceRecord>> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.records.get(&(employee_id, date)).cloned())
    }

    fn list_records_in_range(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let tables = self.inner.lock().unwrap();
        let mut records: Vec<AttendanceRecord> = tables
            .records
            .values()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    fn upsert_record(&self, record: &AttendanceRecord) -> EngineResult<()> {
        let mut tables = self.inner.lock().unwrap();
        tables
            .records
            .insert((record.employee_id, record.date), record.clone());
        Ok(())
    }
}

impl EngineStore for MemoryStore {
    /// Both writes under one lock acquisition.
    fn commit_checkout(&self, entry: &TimeEntry, record: &AttendanceRecord) -> EngineResult<()> {
        let mut tables = self.inner.lock().unwrap();
        if !tables.entries.contains_key(&entry.id) {
            return Err(EngineError::not_found(format!(
                "time entry {} does not exist",
                entry.id
            )));
        }
        if !entry.is_open() {
            tables.open_by_employee.remove(&entry.employee_id);
        }
        tables.entries.insert(entry.id, entry.clone());
        tables
            .records
            .insert((record.employee_id, record.date), record.clone());
        Ok(())
    }
}
