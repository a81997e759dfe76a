//! ICS file generation.

use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};

use crate::event::Event;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Render `event` as a one-event VCALENDAR.
///
/// All-day events are written as `VALUE=DATE` with an exclusive `DTEND`,
/// read in `tz`. Timed events are written in UTC.
pub fn generate_ics(event: &Event, tz: Tz) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.id);
    if let Some(ref title) = event.title {
        ics_event.summary(title);
    }
    ics_event.add_property("DTSTAMP", chrono::Utc::now().format(UTC_FORMAT).to_string());

    if event.is_all_day() {
        let first = event.interval.first_day(tz);
        let after_last = event.interval.last_day(tz).succ_opt().unwrap_or(first);
        add_date_property(&mut ics_event, "DTSTART", first);
        add_date_property(&mut ics_event, "DTEND", after_last);
    } else {
        ics_event.add_property("DTSTART", event.interval.start().format(UTC_FORMAT).to_string());
        ics_event.add_property("DTEND", event.interval.end().format(UTC_FORMAT).to_string());
    }

    cal.push(ics_event.done());
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Swap the library PRODID for ours and drop the redundant CALSCALE line.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:CALMLY\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, day: chrono::NaiveDate) {
    let mut prop = Property::new(name, day.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
