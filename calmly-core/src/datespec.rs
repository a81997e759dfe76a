//! Parsing of user-supplied dates and times.
//!
//! Input is strict: dates are `YYYY-MM-DD`, times are 24-hour `HH:MM`, and
//! both are always read in the zone they are handed (the process zone in
//! the CLI). There is no timezone suffix syntax.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalmlyError, CalmlyResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// The date is read as local midnight wherever an instant is needed
/// (see [`start_of_day`]).
pub fn parse_date(s: &str) -> CalmlyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        // chrono accepts unpadded fields; only the canonical form is allowed
        .filter(|d| d.format(DATE_FORMAT).to_string() == s)
        .ok_or_else(|| CalmlyError::InvalidDate(s.to_string()))
}

/// Parse a strict 24-hour `HH:MM` time.
pub fn parse_time(s: &str) -> CalmlyResult<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .ok()
        .filter(|t| t.format(TIME_FORMAT).to_string() == s)
        .ok_or_else(|| CalmlyError::InvalidTime(s.to_string()))
}

/// Parse a `YYYY-MM-DD` date and an `HH:MM` time as a local instant in `tz`.
///
/// Any malformed part, and local times skipped by a DST transition, are
/// `InvalidDateTime`. Repeated local times resolve to the earlier instant.
pub fn parse_date_time(date: &str, time: &str, tz: Tz) -> CalmlyResult<DateTime<Utc>> {
    let invalid = || CalmlyError::InvalidDateTime(format!("{} {}", date, time));

    let day = parse_date(date).map_err(|_| invalid())?;
    let time = parse_time(time).map_err(|_| invalid())?;

    local_instant(day, time, tz).ok_or_else(invalid)
}

/// First instant of `day` in `tz`.
pub fn start_of_day(day: NaiveDate, tz: Tz) -> CalmlyResult<DateTime<Utc>> {
    let midnight = day.and_time(NaiveTime::MIN);

    tz.from_local_datetime(&midnight)
        .earliest()
        // Midnight fell into a DST gap: the day begins where the gap ends
        .or_else(|| {
            (1..=3).find_map(|h| {
                tz.from_local_datetime(&(midnight + Duration::hours(h)))
                    .earliest()
            })
        })
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| CalmlyError::InvalidDate(day.format(DATE_FORMAT).to_string()))
}

/// The calendar date of `instant` as seen in `tz`.
pub fn local_date(instant: &DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

fn local_instant(day: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&day.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
