use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::summary::WorkHoursSummary;
use crate::model::time_entry::round_hours;

/// Rolls attendance records for one employee into a period summary.
///
/// Pure and deterministic; an empty record set yields the zero summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn summarize(
        records: &[AttendanceRecord],
        employee_id: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> WorkHoursSummary {
        if records.is_empty() {
            return WorkHoursSummary::empty(employee_id, start_date, end_date);
        }

        let total_days = records.len() as u32;
        let mut present_days = 0u32;
        let mut late_days = 0u32;
        let mut total_hours = 0.0;
        let mut regular_hours = 0.0;
        let mut overtime_hours = 0.0;

        for record in records {
            if record.status == AttendanceStatus::Present {
                present_days += 1;
            }
            if record.late_minutes > 0 {
                late_days += 1;
            }
            total_hours += record.total_hours;
            regular_hours += record.regular_hours;
            overtime_hours += record.overtime_hours;
        }

        let average_hours_per_day = if present_days > 0 {
            round_hours(total_hours / f64::from(present_days))
        } else {
            0.0
        };

        WorkHoursSummary {
            employee_id,
            start_date,
            end_date,
            total_days,
            present_days,
            absent_days: total_days - present_days,
            late_days,
            total_hours: round_hours(total_hours),
            regular_hours: round_hours(regular_hours),
            overtime_hours: round_hours(overtime_hours),
            average_hours_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn present_record(employee_id: u64, date: NaiveDate, hours: f64) -> AttendanceRecord {
        let check_in = date.and_hms_opt(9, 0, 0).unwrap().and_utc();
        AttendanceRecord {
            employee_id,
            date,
            check_in_time: Some(check_in),
            check_out_time: Some(check_in + Duration::minutes((hours * 60.0) as i64)),
            total_hours: hours,
            regular_hours: hours.min(8.0),
            overtime_hours: (hours - 8.0).max(0.0),
            break_time: 0.0,
            status: AttendanceStatus::Present,
            late_minutes: 0,
            early_leave_minutes: 0,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn week_with_one_absence() {
        // Four 8-hour present days and one absent day.
        let mut records: Vec<AttendanceRecord> =
            (2..=5).map(|d| present_record(7, day(d), 8.0)).collect();
        records.push(AttendanceRecord::absent(7, day(6)));

        let summary = SummaryAggregator::summarize(&records, 7, day(2), day(6));
        assert_eq!(summary.total_days, 5);
        assert_eq!(summary.present_days, 4);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.late_days, 0);
        assert_eq!(summary.total_hours, 32.0);
        assert_eq!(summary.average_hours_per_day, 8.0);
    }

    #[test]
    fn empty_range_is_all_zero() {
        let summary = SummaryAggregator::summarize(&[], 7, day(2), day(6));
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.average_hours_per_day, 0.0);
    }

    #[test]
    fn late_days_counted_from_minutes_not_status() {
        let mut record = present_record(7, day(2), 8.0);
        record.late_minutes = 10; // under threshold, still Present
        let records = vec![record, present_record(7, day(3), 8.0)];

        let summary = SummaryAggregator::summarize(&records, 7, day(2), day(3));
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.present_days, 2);
    }

    #[test]
    fn no_present_days_means_zero_average() {
        let records = vec![AttendanceRecord::absent(7, day(2))];
        let summary = SummaryAggregator::summarize(&records, 7, day(2), day(2));
        assert_eq!(summary.present_days, 0);
        assert_eq!(summary.average_hours_per_day, 0.0);
    }

    #[test]
    fn overtime_sums_across_days() {
        let records = vec![
            present_record(7, day(2), 9.5),
            present_record(7, day(3), 10.0),
        ];
        let summary = SummaryAggregator::summarize(&records, 7, day(2), day(3));
        assert_eq!(summary.total_hours, 19.5);
        assert_eq!(summary.regular_hours, 16.0);
        assert_eq!(summary.overtime_hours, 3.5);
        assert_eq!(summary.average_hours_per_day, 9.75);
    }
}
