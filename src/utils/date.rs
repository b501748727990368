//! Predefined statistic periods and their local-time boundaries.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, TimeZone};
use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    All,
    Today,
    Yesterday,
    ThisWeek,
    PreviousWeek,
    ThisMonth,
    PreviousMonth,
    ThisYear,
    PreviousYear,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "this week",
            Period::PreviousWeek => "previous week",
            Period::ThisMonth => "this month",
            Period::PreviousMonth => "previous month",
            Period::ThisYear => "this year",
            Period::PreviousYear => "previous year",
        }
    }

    /// First and last day (inclusive) of the period around `today`.
    /// `None` for [`Period::All`].
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let range = match self {
            Period::All => return None,
            Period::Today => (today, today),
            Period::Yesterday => {
                let d = today - Days::new(1);
                (d, d)
            }
            Period::ThisWeek => week_of(today),
            Period::PreviousWeek => week_of(today - Days::new(7)),
            Period::ThisMonth => month_of(today),
            Period::PreviousMonth => month_of(first_of_month(today) - Days::new(1)),
            Period::ThisYear => year_of(today.year()),
            Period::PreviousYear => year_of(today.year() - 1),
        };
        Some(range)
    }

    /// Half-open epoch-seconds interval `[from, to)` in local time.
    pub fn epoch_range(&self, today: NaiveDate) -> AppResult<Option<(i64, i64)>> {
        let Some((first, last)) = self.date_range(today) else {
            return Ok(None);
        };
        let from = start_of_day(first)?.timestamp();
        let to = start_of_day(last + Days::new(1))?.timestamp();
        Ok(Some((from, to)))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday..Sunday containing `d`.
pub fn week_of(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(d.weekday().num_days_from_monday());
    let first = d - Days::new(offset);
    (first, first + Days::new(6))
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn month_of(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(d);
    let last = first + Months::new(1) - Days::new(1);
    (first, last)
}

pub fn year_of(year: i32) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let last = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
    (first, last)
}

pub fn start_of_day(d: NaiveDate) -> AppResult<DateTime<Local>> {
    let midnight = d.and_hms_opt(0, 0, 0).unwrap_or_default();
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| AppError::InvalidPeriod(d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weeks_start_on_monday() {
        // 2025-09-17 is a Wednesday
        assert_eq!(week_of(d(2025, 9, 17)), (d(2025, 9, 15), d(2025, 9, 21)));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_of(d(2025, 9, 21)), (d(2025, 9, 15), d(2025, 9, 21)));
        assert_eq!(week_of(d(2025, 9, 22)).0, d(2025, 9, 22));
    }

    #[test]
    fn period_ranges() {
        let today = d(2025, 3, 1);
        assert_eq!(Period::All.date_range(today), None);
        assert_eq!(
            Period::Yesterday.date_range(today),
            Some((d(2025, 2, 28), d(2025, 2, 28)))
        );
        assert_eq!(
            Period::ThisMonth.date_range(today),
            Some((d(2025, 3, 1), d(2025, 3, 31)))
        );
        assert_eq!(
            Period::PreviousMonth.date_range(today),
            Some((d(2025, 2, 1), d(2025, 2, 28)))
        );
        assert_eq!(
            Period::PreviousWeek.date_range(today),
            Some((d(2025, 2, 17), d(2025, 2, 23)))
        );
        assert_eq!(
            Period::PreviousYear.date_range(today),
            Some((d(2024, 1, 1), d(2024, 12, 31)))
        );
    }

    #[test]
    fn epoch_range_is_half_open_over_whole_days() {
        let (from, to) = Period::Today.epoch_range(d(2025, 6, 10)).unwrap().unwrap();
        assert!(to > from);
        // a regular day, or 23/25 hours around DST switches
        assert!((82_800..=90_000).contains(&(to - from)));
    }
}
