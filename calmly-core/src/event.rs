//! Store-neutral event snapshots.

use crate::calendar::CalendarRef;
use crate::interval::EventInterval;

/// Shown in place of a missing title.
pub const UNTITLED: &str = "Untitled";

/// A calendar event as seen by the core.
///
/// Stores hand these out as read-only snapshots; the core never persists
/// them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Store identifier (the ICS UID for a caldir)
    pub id: String,
    pub title: Option<String>,
    pub interval: EventInterval,
    pub calendar: CalendarRef,
}

impl Event {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNTITLED)
    }

    pub fn is_all_day(&self) -> bool {
        self.interval.is_all_day()
    }
}
