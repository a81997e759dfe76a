//! Plain-text rendering of calmly-core types for the terminal.

use calmly_core::{CalendarRef, DeleteReport, Event};
use chrono_tz::Tz;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarRef {
    fn render(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Confirmation for a newly created event, without the leading check mark.
pub fn created(event: &Event, tz: Tz) -> String {
    let first = event.interval.first_day(tz);
    let title = event.display_title();
    let calendar = &event.calendar.name;

    if !event.is_all_day() {
        let start = event.interval.start().with_timezone(&tz);
        let end = event.interval.end().with_timezone(&tz);
        return format!(
            "Created '{}' on {} {}-{} in {}",
            title,
            first.format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M"),
            calendar
        );
    }

    let last = event.interval.last_day(tz);
    if last > first {
        format!(
            "Created '{}' from {} to {} in {}",
            title,
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            calendar
        )
    } else {
        format!("Created '{}' on {} in {}", title, first.format("%Y-%m-%d"), calendar)
    }
}

pub fn deleted(report: &DeleteReport, title: &str, date: &str) -> String {
    format!(
        "Deleted {} '{}' on {} from {}",
        pluralize(report.deleted.len(), "event"),
        title,
        date,
        report.calendar.name
    )
}

fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calmly_core::datespec::parse_date_time;
    use calmly_core::interval::{build_all_day_interval, build_timed_interval};
    use calmly_core::{CalendarKind, CalmlyError};
    use chrono::NaiveDate;
    use chrono_tz::Europe::Berlin;

    fn family() -> CalendarRef {
        CalendarRef::new("family", "Family", CalendarKind::Local)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn all_day(start: &str, end: &str) -> Event {
        Event {
            id: "1".into(),
            title: Some("Vacation".into()),
            interval: build_all_day_interval(day(start), Some(day(end)), Berlin).unwrap(),
            calendar: family(),
        }
    }

    #[test]
    fn test_calendar_line() {
        let work = CalendarRef::new("work", "Work", CalendarKind::Remote);
        assert_eq!(work.render(), "Work (iCloud/CalDAV)");
        assert_eq!(family().render(), "Family (Local)");
    }

    #[test]
    fn test_created_single_day() {
        let event = all_day("2025-03-15", "2025-03-15");
        assert_eq!(created(&event, Berlin), "Created 'Vacation' on 2025-03-15 in Family");
    }

    #[test]
    fn test_created_range() {
        let event = all_day("2025-07-01", "2025-07-14");
        assert_eq!(
            created(&event, Berlin),
            "Created 'Vacation' from 2025-07-01 to 2025-07-14 in Family"
        );
    }

    #[test]
    fn test_created_timed() {
        let event = Event {
            id: "2".into(),
            title: Some("Standup".into()),
            interval: build_timed_interval(
                parse_date_time("2025-03-10", "09:00", Berlin).unwrap(),
                parse_date_time("2025-03-10", "09:15", Berlin).unwrap(),
            )
            .unwrap(),
            calendar: family(),
        };
        assert_eq!(
            created(&event, Berlin),
            "Created 'Standup' on 2025-03-10 09:00-09:15 in Family"
        );
    }

    #[test]
    fn test_deleted_counts() {
        let mut report = DeleteReport {
            calendar: family(),
            deleted: vec![all_day("2025-07-01", "2025-07-01")],
            failures: vec![],
        };
        assert_eq!(
            deleted(&report, "Vacation", "2025-07-01"),
            "Deleted 1 event 'Vacation' on 2025-07-01 from Family"
        );

        report.deleted.push(all_day("2025-07-01", "2025-07-02"));
        report.failures.push((
            all_day("2025-07-01", "2025-07-01"),
            CalmlyError::StoreRemoveFailed("read-only".into()),
        ));
        assert_eq!(
            deleted(&report, "vacation", "2025-07-01"),
            "Deleted 2 events 'vacation' on 2025-07-01 from Family"
        );
    }
}
