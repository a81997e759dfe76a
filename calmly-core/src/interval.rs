//! Half-open event intervals and query windows.

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::datespec::{local_date, start_of_day};
use crate::error::{CalmlyError, CalmlyResult};

/// Default length of the `events` window.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// A half-open `[start, end)` range of instants. `end > start` always holds.
///
/// All-day intervals start at local midnight of their first day and end at
/// local midnight of the day *after* their last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    all_day: bool,
}

impl EventInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, all_day: bool) -> CalmlyResult<Self> {
        if end <= start {
            return Err(CalmlyError::NonPositiveDuration {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(EventInterval { start, end, all_day })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_all_day(&self) -> bool {
        self.all_day
    }

    /// Whether the two intervals share at least one instant.
    pub fn overlaps(&self, other: &EventInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn first_day(&self, tz: Tz) -> NaiveDate {
        local_date(&self.start, tz)
    }

    /// The last calendar day the interval covers.
    ///
    /// For all-day intervals this is the day before the exclusive end.
    pub fn last_day(&self, tz: Tz) -> NaiveDate {
        let end_day = local_date(&self.end, tz);
        if self.all_day {
            end_day.pred_opt().unwrap_or(end_day)
        } else {
            end_day
        }
    }
}

/// Number of days in an `events` window.
///
/// Parsing is lenient: anything that is not a positive integer silently
/// becomes the default of 30 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDays(u32);

impl WindowDays {
    pub fn new(days: u32) -> Self {
        if days == 0 {
            Self::default()
        } else {
            WindowDays(days)
        }
    }

    pub fn parse(arg: Option<&str>) -> Self {
        arg.and_then(|s| s.parse::<u32>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for WindowDays {
    fn default() -> Self {
        WindowDays(DEFAULT_WINDOW_DAYS)
    }
}

impl fmt::Display for WindowDays {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All-day interval from `start_day` through `end_day` inclusive.
/// `end_day` defaults to `start_day`.
pub fn build_all_day_interval(
    start_day: NaiveDate,
    end_day: Option<NaiveDate>,
    tz: Tz,
) -> CalmlyResult<EventInterval> {
    let end_day = end_day.unwrap_or(start_day);
    if end_day < start_day {
        return Err(CalmlyError::NonPositiveDuration {
            start: start_day.format("%Y-%m-%d").to_string(),
            end: end_day.format("%Y-%m-%d").to_string(),
        });
    }

    let start = start_of_day(start_day, tz)?;
    let end = start_of_day(add_days(end_day, 1)?, tz)?;

    EventInterval::new(start, end, true)
}

/// Timed interval between two instants, usually the same local day.
/// Events that would cross midnight (`end <= start`) are rejected.
pub fn build_timed_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> CalmlyResult<EventInterval> {
    EventInterval::new(start, end, false)
}

/// `[startOfDay(reference_day), startOfDay(reference_day + days))`
pub fn day_window(reference_day: NaiveDate, days: WindowDays, tz: Tz) -> CalmlyResult<EventInterval> {
    let start = start_of_day(reference_day, tz)?;
    let end = start_of_day(add_days(reference_day, days.get())?, tz)?;
    EventInterval::new(start, end, false)
}

/// The whole of `day`, used to find deletion candidates.
pub fn single_day_window(day: NaiveDate, tz: Tz) -> CalmlyResult<EventInterval> {
    day_window(day, WindowDays::new(1), tz)
}

fn add_days(day: NaiveDate, n: u32) -> CalmlyResult<NaiveDate> {
    day.checked_add_days(Days::new(u64::from(n)))
        .ok_or_else(|| CalmlyError::InvalidDate(format!("{} + {} days", day.format("%Y-%m-%d"), n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datespec::parse_date_time;
    use chrono::{Duration, TimeZone};
    use chrono_tz::{America, Europe};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(date: &str, time: &str, tz: Tz) -> DateTime<Utc> {
        parse_date_time(date, time, tz).unwrap()
    }

    #[test]
    fn test_single_all_day_event_ends_next_midnight() {
        for tz in [Tz::UTC, Europe::Berlin, America::New_York] {
            for d in [day(2025, 7, 1), day(2025, 3, 30), day(2025, 11, 2), day(2024, 12, 31)] {
                let interval = build_all_day_interval(d, None, tz).unwrap();
                assert!(interval.is_all_day());
                assert_eq!(interval.start(), start_of_day(d, tz).unwrap());
                assert_eq!(interval.end(), start_of_day(d.succ_opt().unwrap(), tz).unwrap());
                assert_eq!(interval, build_all_day_interval(d, Some(d), tz).unwrap());
            }
        }
    }

    #[test]
    fn test_all_day_interval_on_dst_day_is_23_hours() {
        let interval = build_all_day_interval(day(2025, 3, 30), None, Europe::Berlin).unwrap();
        assert_eq!(interval.end() - interval.start(), Duration::hours(23));
    }

    #[test]
    fn test_multi_day_interval_last_day_is_end_date() {
        let tz = Europe::Berlin;
        let start = day(2025, 7, 1);
        for end in [day(2025, 7, 1), day(2025, 7, 2), day(2025, 7, 14), day(2025, 10, 31), day(2026, 1, 1)] {
            let interval = build_all_day_interval(start, Some(end), tz).unwrap();
            assert_eq!(interval.first_day(tz), start);
            assert_eq!(interval.last_day(tz), end);
        }
    }

    #[test]
    fn test_all_day_end_before_start_is_rejected() {
        let result = build_all_day_interval(day(2025, 7, 14), Some(day(2025, 7, 1)), Tz::UTC);
        assert!(matches!(result, Err(CalmlyError::NonPositiveDuration { .. })));
    }

    #[test]
    fn test_timed_interval() {
        let tz = America::New_York;
        let interval = build_timed_interval(at("2025-03-10", "09:00", tz), at("2025-03-10", "09:15", tz)).unwrap();
        assert!(!interval.is_all_day());
        assert_eq!(interval.start(), Utc.with_ymd_and_hms(2025, 3, 10, 13, 0, 0).unwrap());
        assert_eq!(interval.end(), Utc.with_ymd_and_hms(2025, 3, 10, 13, 15, 0).unwrap());
    }

    #[test]
    fn test_timed_interval_rejects_non_positive_duration() {
        let times: Vec<String> = (0..24)
            .step_by(5)
            .flat_map(|h| [format!("{:02}:00", h), format!("{:02}:30", h)])
            .collect();

        for start in &times {
            for end in times.iter().filter(|end| *end <= start) {
                let result = build_timed_interval(at("2025-03-10", start, Tz::UTC), at("2025-03-10", end, Tz::UTC));
                assert!(
                    matches!(result, Err(CalmlyError::NonPositiveDuration { .. })),
                    "{start}-{end} should be rejected"
                );
            }
        }
    }

    #[test]
    fn test_timed_interval_across_fall_back_uses_instants() {
        // 02:30 happens twice; the earlier one is used, so 02:45 is still later
        let tz = Europe::Berlin;
        let interval = build_timed_interval(at("2025-10-26", "02:30", tz), at("2025-10-26", "02:45", tz)).unwrap();
        assert_eq!(interval.end() - interval.start(), Duration::minutes(15));
    }

    #[test]
    fn test_window_days_parse() {
        assert_eq!(WindowDays::parse(None).get(), 30);
        assert_eq!(WindowDays::parse(Some("14")).get(), 14);
        assert_eq!(WindowDays::parse(Some("notanumber")).get(), 30);
        assert_eq!(WindowDays::parse(Some("0")).get(), 30);
        assert_eq!(WindowDays::parse(Some("-3")).get(), 30);
        assert_eq!(WindowDays::parse(Some("")).get(), 30);
    }

    #[test]
    fn test_day_window_bad_count_matches_default() {
        let today = day(2025, 3, 1);
        let tz = Europe::Berlin;
        assert_eq!(
            day_window(today, WindowDays::parse(Some("notanumber")), tz).unwrap(),
            day_window(today, WindowDays::new(30), tz).unwrap()
        );
    }

    #[test]
    fn test_day_window_bounds() {
        let tz = America::New_York;
        let window = day_window(day(2025, 3, 1), WindowDays::new(7), tz).unwrap();
        assert_eq!(window.start(), start_of_day(day(2025, 3, 1), tz).unwrap());
        assert_eq!(window.end(), start_of_day(day(2025, 3, 8), tz).unwrap());
        assert!(!window.is_all_day());
    }

    #[test]
    fn test_single_day_window() {
        let tz = Tz::UTC;
        let window = single_day_window(day(2025, 3, 10), tz).unwrap();
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(window.end(), Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_overlaps_is_half_open() {
        let tz = Tz::UTC;
        let monday = single_day_window(day(2025, 3, 10), tz).unwrap();
        let tuesday = single_day_window(day(2025, 3, 11), tz).unwrap();
        let week = day_window(day(2025, 3, 10), WindowDays::new(7), tz).unwrap();

        assert!(!monday.overlaps(&tuesday));
        assert!(week.overlaps(&monday));
        assert!(tuesday.overlaps(&week));
    }

    #[test]
    fn test_new_rejects_empty_interval() {
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert!(EventInterval::new(t, t, false).is_err());
        assert!(EventInterval::new(t, t - Duration::minutes(1), false).is_err());
    }
}
