//! The calendar store capability.
//!
//! A store is the system of record for calendars and events. The core only
//! reaches it through this trait, so the caldir on disk and the in-memory
//! store used by tests are interchangeable.

use tokio::sync::oneshot;

use crate::calendar::CalendarRef;
use crate::error::CalmlyResult;
use crate::event::Event;
use crate::interval::EventInterval;

/// Outcome of an access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Access refused, with a hint for the user
    Denied(String),
}

/// Pending answer to [`CalendarStore::request_access`].
pub type AccessRequest = oneshot::Receiver<CalmlyResult<Access>>;

pub trait CalendarStore {
    /// Ask for access to the user's calendars.
    ///
    /// The answer may arrive asynchronously; callers wait on the receiver
    /// once before issuing any other request.
    fn request_access(&self) -> AccessRequest;

    /// All calendars, in store order.
    fn list_calendars(&self) -> CalmlyResult<Vec<CalendarRef>>;

    /// Events of `calendar` whose interval intersects `interval`.
    fn query_events(&self, calendar: &CalendarRef, interval: &EventInterval) -> CalmlyResult<Vec<Event>>;

    /// Persist a new event and return it as stored.
    fn create_event(
        &mut self,
        calendar: &CalendarRef,
        title: &str,
        interval: &EventInterval,
    ) -> CalmlyResult<Event>;

    fn remove_event(&mut self, event: &Event) -> CalmlyResult<()>;
}
