//! In-memory calendar store.
//!
//! Holds calendars and events in plain vectors. Used in place of a caldir
//! when exercising the engine.

use tokio::sync::oneshot;

use crate::calendar::CalendarRef;
use crate::error::{CalmlyError, CalmlyResult};
use crate::event::Event;
use crate::interval::EventInterval;
use crate::store::{Access, AccessRequest, CalendarStore};

pub struct MemoryStore {
    calendars: Vec<CalendarRef>,
    events: Vec<Event>,
    access: Access,
    next_id: u64,
}

impl MemoryStore {
    pub fn new(calendars: Vec<CalendarRef>) -> Self {
        MemoryStore {
            calendars,
            events: Vec::new(),
            access: Access::Granted,
            next_id: 1,
        }
    }

    /// Answer access requests with `access` instead of granting them.
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Every stored event, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl CalendarStore for MemoryStore {
    fn request_access(&self) -> AccessRequest {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Ok(self.access.clone()));
        rx
    }

    fn list_calendars(&self) -> CalmlyResult<Vec<CalendarRef>> {
        Ok(self.calendars.clone())
    }

    fn query_events(&self, calendar: &CalendarRef, interval: &EventInterval) -> CalmlyResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.calendar.slug == calendar.slug && e.interval.overlaps(interval))
            .cloned()
            .collect())
    }

    fn create_event(
        &mut self,
        calendar: &CalendarRef,
        title: &str,
        interval: &EventInterval,
    ) -> CalmlyResult<Event> {
        if !self.calendars.iter().any(|c| c.slug == calendar.slug) {
            return Err(CalmlyError::CalendarNotFound(calendar.name.clone()));
        }

        let event = Event {
            id: format!("memory-{}", self.next_id),
            title: Some(title.to_string()),
            interval: *interval,
            calendar: calendar.clone(),
        };
        self.next_id += 1;
        self.events.push(event.clone());

        Ok(event)
    }

    fn remove_event(&mut self, event: &Event) -> CalmlyResult<()> {
        let position = self
            .events
            .iter()
            .position(|e| e.id == event.id)
            .ok_or_else(|| CalmlyError::StoreRemoveFailed(format!("no event with id {}", event.id)))?;

        self.events.remove(position);
        Ok(())
    }
}
