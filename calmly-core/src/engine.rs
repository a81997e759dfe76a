//! The five calendar commands, composed from parsing, interval building,
//! querying, formatting and selection.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::calendar::CalendarRef;
use crate::datespec::{parse_date, parse_date_time};
use crate::error::{CalmlyError, CalmlyResult};
use crate::event::Event;
use crate::format::format_events;
use crate::interval::{
    EventInterval, WindowDays, build_all_day_interval, build_timed_interval, day_window,
    single_day_window,
};
use crate::query::{query_events, resolve_calendar};
use crate::select::select_for_deletion;
use crate::store::{Access, CalendarStore};

/// Runs commands against an authorized store.
///
/// The only way to get an engine is [`CommandEngine::authorize`], so every
/// store call happens after access was granted.
pub struct CommandEngine<S> {
    store: S,
    tz: Tz,
}

/// Outcome of a `delete` that removed at least one event.
#[derive(Debug)]
pub struct DeleteReport {
    pub calendar: CalendarRef,
    pub deleted: Vec<Event>,
    /// Candidates the store refused to remove
    pub failures: Vec<(Event, CalmlyError)>,
}

impl<S: CalendarStore> CommandEngine<S> {
    /// Request calendar access and block until the store answers.
    pub fn authorize(store: S, tz: Tz) -> CalmlyResult<Self> {
        match store.request_access().blocking_recv() {
            Ok(Ok(Access::Granted)) => {
                debug!(%tz, "calendar access granted");
                Ok(CommandEngine { store, tz })
            }
            Ok(Ok(Access::Denied(hint))) => Err(CalmlyError::AccessDenied(hint)),
            Ok(Err(e)) => Err(CalmlyError::AccessDenied(e.to_string())),
            Err(_) => Err(CalmlyError::AccessDenied(
                "the calendar store did not answer the access request".into(),
            )),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// All calendars, sorted by name.
    pub fn list(&self) -> CalmlyResult<Vec<CalendarRef>> {
        let mut calendars = self.store.list_calendars()?;
        calendars.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(calendars)
    }

    /// Listing lines for `[today, today + days)`.
    pub fn events(&self, calendar: &str, days: WindowDays) -> CalmlyResult<Vec<String>> {
        self.events_from(calendar, days, self.today())
    }

    /// Listing lines for `[from, from + days)`.
    pub fn events_from(&self, calendar: &str, days: WindowDays, from: NaiveDate) -> CalmlyResult<Vec<String>> {
        let resolved = resolve_calendar(&self.store, calendar)?;
        let window = day_window(from, days, self.tz)?;
        let events = query_events(&self.store, &resolved, &window)?;

        // The empty-listing line echoes the name as the user wrote it
        Ok(format_events(&events, calendar, days, self.tz))
    }

    /// Create an all-day event from `start` through `end` (inclusive, defaults to `start`).
    pub fn add(&mut self, calendar: &str, title: &str, start: &str, end: Option<&str>) -> CalmlyResult<Event> {
        let calendar = resolve_calendar(&self.store, calendar)?;
        let start_day = parse_date(start)?;
        let end_day = end.map(parse_date).transpose()?;
        let interval = build_all_day_interval(start_day, end_day, self.tz)?;

        self.create(&calendar, title, interval)
    }

    /// Create a timed event on `date` from `start_time` to `end_time`.
    pub fn add_timed(
        &mut self,
        calendar: &str,
        title: &str,
        date: &str,
        start_time: &str,
        end_time: &str,
    ) -> CalmlyResult<Event> {
        let calendar = resolve_calendar(&self.store, calendar)?;
        let start = parse_date_time(date, start_time, self.tz)?;
        let end = parse_date_time(date, end_time, self.tz)?;
        let interval = build_timed_interval(start, end)?;

        self.create(&calendar, title, interval)
    }

    /// Delete every event on `date` titled `title` (ignoring case).
    ///
    /// Each candidate is removed independently; a failure is recorded and
    /// the remaining candidates are still attempted.
    pub fn delete(&mut self, calendar: &str, title: &str, date: &str) -> CalmlyResult<DeleteReport> {
        let calendar = resolve_calendar(&self.store, calendar)?;
        let window = single_day_window(parse_date(date)?, self.tz)?;

        let events = query_events(&self.store, &calendar, &window)?;
        let candidates = select_for_deletion(&events, title);

        if candidates.is_empty() {
            return Err(CalmlyError::NoMatchFound {
                title: title.to_string(),
                date: date.to_string(),
                calendar: calendar.name.clone(),
            });
        }

        let attempted = candidates.len();
        let mut deleted = Vec::new();
        let mut failures = Vec::new();

        for event in candidates {
            match self.store.remove_event(event) {
                Ok(()) => {
                    debug!(id = %event.id, "removed event");
                    deleted.push(event.clone());
                }
                Err(e) => {
                    warn!(id = %event.id, error = %e, "could not remove event");
                    failures.push((event.clone(), remove_failure(e)));
                }
            }
        }

        if deleted.is_empty() {
            return Err(CalmlyError::DeleteFailed {
                title: title.to_string(),
                attempted,
            });
        }

        Ok(DeleteReport {
            calendar,
            deleted,
            failures,
        })
    }

    fn create(&mut self, calendar: &CalendarRef, title: &str, interval: EventInterval) -> CalmlyResult<Event> {
        let event = self
            .store
            .create_event(calendar, title, &interval)
            .map_err(create_failure)?;

        debug!(id = %event.id, calendar = %calendar, "created event");
        Ok(event)
    }
}

fn create_failure(e: CalmlyError) -> CalmlyError {
    match e {
        CalmlyError::StoreCreateFailed(_) => e,
        other => CalmlyError::StoreCreateFailed(other.to_string()),
    }
}

fn remove_failure(e: CalmlyError) -> CalmlyError {
    match e {
        CalmlyError::StoreRemoveFailed(_) => e,
        other => CalmlyError::StoreRemoveFailed(other.to_string()),
    }
}
