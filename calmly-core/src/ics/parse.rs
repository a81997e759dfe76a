//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};

use crate::calendar::CalendarRef;
use crate::datespec::start_of_day;
use crate::error::{CalmlyError, CalmlyResult};
use crate::event::Event;
use crate::interval::EventInterval;

/// Parse the first VEVENT of `content` into an event of `calendar`.
///
/// Floating times, and times with an unknown TZID, are read in `tz`.
/// A date-only event without DTEND lasts one day; a timed event without
/// DTEND is rejected.
pub fn parse_event(content: &str, calendar: &CalendarRef, tz: Tz) -> CalmlyResult<Event> {
    let unfolded = unfold(content);
    let parsed = read_calendar(&unfolded).map_err(|e| CalmlyError::IcsParse(e.to_string()))?;
    let vevent = parsed
        .components
        .iter()
        .find(|c| c.name == "VEVENT")
        .ok_or_else(|| CalmlyError::IcsParse("no VEVENT".into()))?;

    let uid = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .ok_or_else(|| CalmlyError::IcsParse("missing UID".into()))?;
    let title = vevent.find_prop("SUMMARY").map(|p| p.val.to_string());

    let start = vevent
        .find_prop("DTSTART")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .ok_or_else(|| CalmlyError::IcsParse(format!("{}: missing or invalid DTSTART", uid)))?;
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok());

    let all_day = matches!(start, DatePerhapsTime::Date(_));
    let end = match (end, &start) {
        (Some(end), _) => end,
        (None, DatePerhapsTime::Date(d)) => DatePerhapsTime::Date(
            d.succ_opt()
                .ok_or_else(|| CalmlyError::IcsParse(format!("{}: date out of range", uid)))?,
        ),
        (None, DatePerhapsTime::DateTime(_)) => {
            return Err(CalmlyError::IcsParse(format!("{}: timed event without DTEND", uid)));
        }
    };

    let interval = EventInterval::new(to_instant(start, tz)?, to_instant(end, tz)?, all_day)
        .map_err(|e| CalmlyError::IcsParse(format!("{}: {}", uid, e)))?;

    Ok(Event {
        id: uid,
        title,
        interval,
        calendar: calendar.clone(),
    })
}

fn to_instant(dpt: DatePerhapsTime, tz: Tz) -> CalmlyResult<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::Date(d) => start_of_day(d, tz),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => Ok(dt),
            CalendarDateTime::Floating(naive) => localize(naive, tz),
            CalendarDateTime::WithTimezone { date_time, tzid } => {
                localize(date_time, tzid.parse::<Tz>().unwrap_or(tz))
            }
        },
    }
}

/// Earliest instant for a wall-clock time; times in a DST gap move forward.
fn localize(naive: NaiveDateTime, zone: Tz) -> CalmlyResult<DateTime<Utc>> {
    zone.from_local_datetime(&naive)
        .earliest()
        .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| CalmlyError::IcsParse(format!("unrepresentable local time {}", naive)))
}
