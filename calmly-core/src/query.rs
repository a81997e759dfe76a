//! Calendar lookup and event queries against a store.

use tracing::debug;

use crate::calendar::CalendarRef;
use crate::error::{CalmlyError, CalmlyResult};
use crate::event::Event;
use crate::interval::EventInterval;
use crate::store::CalendarStore;

/// Find a calendar by name, ignoring case.
///
/// When several calendars share a name the first one in store order wins.
pub fn resolve_calendar<S: CalendarStore>(store: &S, name: &str) -> CalmlyResult<CalendarRef> {
    store
        .list_calendars()?
        .into_iter()
        .find(|c| c.is_named(name))
        .ok_or_else(|| CalmlyError::CalendarNotFound(name.to_string()))
}

/// Events in `calendar` overlapping `interval`, in store order.
pub fn query_events<S: CalendarStore>(
    store: &S,
    calendar: &CalendarRef,
    interval: &EventInterval,
) -> CalmlyResult<Vec<Event>> {
    let events = store.query_events(calendar, interval)?;
    debug!(
        calendar = %calendar,
        from = %interval.start(),
        to = %interval.end(),
        count = events.len(),
        "queried events"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarKind;
    use crate::memory::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            CalendarRef::new("work", "Work", CalendarKind::Remote),
            CalendarRef::new("family", "Family", CalendarKind::Local),
            CalendarRef::new("family-2", "FAMILY", CalendarKind::Exchange),
        ])
    }

    #[test]
    fn test_resolve_calendar_ignores_case() {
        let store = store();
        assert_eq!(resolve_calendar(&store, "work").unwrap().slug, "work");
        assert_eq!(resolve_calendar(&store, "WORK").unwrap().slug, "work");
    }

    #[test]
    fn test_resolve_calendar_prefers_store_order() {
        let store = store();
        assert_eq!(resolve_calendar(&store, "family").unwrap().slug, "family");
    }

    #[test]
    fn test_resolve_calendar_requires_exact_name() {
        let store = store();
        assert!(matches!(
            resolve_calendar(&store, "Wor"),
            Err(CalmlyError::CalendarNotFound(name)) if name == "Wor"
        ));
    }
}
