//! Plain-text rendering of event listings.

use std::collections::HashSet;

use chrono_tz::Tz;

use crate::event::Event;
use crate::interval::WindowDays;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Render the events of one calendar window, one line per event.
///
/// Events are de-duplicated and ordered by start; events starting at the same
/// instant keep their store order. An empty listing yields a single
/// informational line.
pub fn format_events(events: &[Event], calendar: &str, days: WindowDays, tz: Tz) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<&Event> = events
        .iter()
        .filter(|e| seen.insert((e.id.as_str(), e.interval.start())))
        .collect();

    if unique.is_empty() {
        return vec![format!("No events in '{}' for the next {} days.", calendar, days)];
    }

    unique.sort_by_key(|e| e.interval.start());
    unique.into_iter().map(|e| format_event(e, tz)).collect()
}

/// Render a single event line.
///
/// - all-day, one day: `2025-07-01: Title`
/// - all-day, several days: `2025-07-01 → 2025-07-14: Title`
/// - timed: `2025-03-10: Title (09:00-09:15)`
pub fn format_event(event: &Event, tz: Tz) -> String {
    let interval = &event.interval;
    let first_day = interval.first_day(tz);
    let start_date = first_day.format(DATE_FORMAT);
    let title = event.display_title();

    if interval.is_all_day() {
        let last_day = interval.last_day(tz);
        if last_day > first_day {
            format!("{} → {}: {}", start_date, last_day.format(DATE_FORMAT), title)
        } else {
            format!("{}: {}", start_date, title)
        }
    } else {
        format!(
            "{}: {} ({}-{})",
            start_date,
            title,
            interval.start().with_timezone(&tz).format(TIME_FORMAT),
            interval.end().with_timezone(&tz).format(TIME_FORMAT),
        )
    }
}
