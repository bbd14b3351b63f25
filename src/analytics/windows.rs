//! Fixed reporting windows, all in UTC.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};

use crate::domain::DateRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportWindows {
    pub now: DateTime<Utc>,
    /// 1st of the current month through now.
    pub this_month: DateRange,
    /// The whole previous calendar month.
    pub last_month: DateRange,
    pub last_six_months: DateRange,
    pub last_twelve_months: DateRange,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `[now - months, now]`, the start clamped to the target month's last day.
pub fn trailing_months(now: DateTime<Utc>, months: u32) -> DateRange {
    let start = now.checked_sub_months(Months::new(months)).unwrap_or(DateTime::<Utc>::MIN_UTC);
    DateRange::new(start, now)
}

impl ReportWindows {
    pub fn at(now: DateTime<Utc>) -> Self {
        let this_month = first_of_month(now.date_naive());
        let last_month = this_month.checked_sub_months(Months::new(1)).unwrap_or(this_month);
        let this_month_start = start_of_day(this_month);

        Self {
            now,
            this_month: DateRange::new(this_month_start, now),
            last_month: DateRange::new(start_of_day(last_month), this_month_start - Duration::nanoseconds(1)),
            last_six_months: trailing_months(now, 6),
            last_twelve_months: trailing_months(now, 12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_windows_mid_year() {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 9, 30, 0).unwrap();
        let w = ReportWindows::at(now);
        assert_eq!(w.this_month.start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(w.this_month.end, now);
        assert_eq!(w.last_month.start, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        assert!(w.last_month.contains(Utc.with_ymd_and_hms(2024, 4, 30, 23, 59, 59).unwrap()));
        assert!(!w.last_month.contains(w.this_month.start));
        assert_eq!(w.last_six_months.start, Utc.with_ymd_and_hms(2023, 11, 4, 9, 30, 0).unwrap());
        assert_eq!(w.last_twelve_months.start, Utc.with_ymd_and_hms(2023, 5, 4, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_last_month_rolls_into_previous_year() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let w = ReportWindows::at(now);
        assert_eq!(w.last_month.start, Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap());
        assert!(w.last_month.contains(Utc.with_ymd_and_hms(2023, 12, 31, 18, 0, 0).unwrap()));
    }

    #[test]
    fn test_trailing_months_clamps_day() {
        let now = Utc.with_ymd_and_hms(2024, 8, 31, 0, 0, 0).unwrap();
        assert_eq!(trailing_months(now, 6).start, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }
}
