//! Time utilities: parsing HH:MM[:SS], splitting durations, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveTime, TimeZone, Timelike};

/// Split seconds into (hours, minutes, seconds).
pub fn duration_components(seconds: u64) -> (u64, u64, u64) {
    (seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// `HH:MM:SS`, as shown on the running clocks.
pub fn format_hms(seconds: u64) -> String {
    let (h, m, s) = duration_components(seconds);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Worked time rounded to whole minutes: 30 seconds or more round up.
pub fn rounded_hm(seconds: u64) -> (u64, u64) {
    let (mut h, mut m, s) = duration_components(seconds);
    if s >= 30 {
        m += 1;
        if m == 60 {
            h += 1;
            m = 0;
        }
    }
    (h, m)
}

/// `"{h}h {mm}min"`, the format used in statistics and save prompts.
pub fn format_worked(seconds: u64) -> String {
    let (h, m) = rounded_hm(seconds);
    format!("{h}h {m:02}min")
}

/// Parse a wall-clock time: `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

/// Parse a countdown duration: `HH:MM:SS`, `MM:SS` or plain seconds.
/// Minutes and seconds above 59 are rejected in the colon forms.
pub fn parse_duration(d: &str) -> AppResult<u64> {
    let d = d.trim();
    let invalid = || AppError::InvalidDuration(d.to_string());

    let parts: Vec<&str> = d.split(':').collect();
    let nums: Vec<u64> = parts
        .iter()
        .map(|p| p.parse::<u64>().map_err(|_| invalid()))
        .collect::<AppResult<_>>()?;

    let secs = match nums.as_slice() {
        [s] => Some(*s),
        [m, s] if *s < 60 => m.checked_mul(60).and_then(|v| v.checked_add(*s)),
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)
            .and_then(|v| v.checked_add(m * 60 + s)),
        _ => return Err(invalid()),
    }
    .ok_or_else(invalid)?;

    if secs == 0 {
        return Err(invalid());
    }
    Ok(secs)
}

/// Today's date at the given local wall-clock time.
pub fn today_at(t: NaiveTime) -> AppResult<DateTime<Local>> {
    let naive = Local::now().date_naive().and_time(t);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Current local time truncated to whole seconds.
pub fn now_secs() -> DateTime<Local> {
    let now = Local::now();
    now.with_nanosecond(0).unwrap_or(now)
}

/// `YYYY-MM-DD HH:MM:SS` in local time for an epoch-seconds value.
pub fn epoch_to_string(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0).single() {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_and_hms() {
        assert_eq!(duration_components(0), (0, 0, 0));
        assert_eq!(duration_components(3_725), (1, 2, 5));
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(36_000), "10:00:00");
    }

    #[test]
    fn worked_time_rounds_half_minutes_up() {
        assert_eq!(format_worked(29), "0h 00min");
        assert_eq!(format_worked(30), "0h 01min");
        assert_eq!(format_worked(3_599), "1h 00min");
        assert_eq!(format_worked(2 * 3600 + 15 * 60 + 10), "2h 15min");
    }

    #[test]
    fn clock_times() {
        assert_eq!(
            parse_clock_time("07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
        assert_eq!(
            parse_clock_time("23:59:58").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 58).unwrap()
        );
        assert!(parse_clock_time("24:00").is_err());
        assert!(parse_clock_time("noon").is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("90").unwrap(), 90);
        assert_eq!(parse_duration("25:00").unwrap(), 1_500);
        assert_eq!(parse_duration("1:30:15").unwrap(), 5_415);
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("1:75").is_err());
        assert!(parse_duration("a:b").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        assert!(matches!(
            parse_duration("9999999999999999999:00:00"),
            Err(AppError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration("999999999999999999:00"),
            Err(AppError::InvalidDuration(_))
        ));
        assert_eq!(parse_duration("100:00:00").unwrap(), 360_000);
    }
}
