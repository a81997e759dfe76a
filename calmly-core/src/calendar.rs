//! Calendar references as handed out by a store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of backing source a calendar comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    #[default]
    Local,
    /// CalDAV/iCloud and other server-synced calendars
    Remote,
    Exchange,
    Subscription,
    Birthdays,
    #[serde(other)]
    Other,
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            CalendarKind::Local => "Local",
            CalendarKind::Remote => "iCloud/CalDAV",
            CalendarKind::Exchange => "Exchange",
            CalendarKind::Subscription => "Subscription",
            CalendarKind::Birthdays => "Birthdays",
            CalendarKind::Other => "Unknown",
        };
        write!(f, "{}", label)
    }
}

/// A calendar known to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRef {
    /// Store-side identifier (the directory name for a caldir)
    pub slug: String,
    /// Human-readable name, used for lookup
    pub name: String,
    pub kind: CalendarKind,
}

impl CalendarRef {
    pub fn new(slug: &str, name: &str, kind: CalendarKind) -> Self {
        CalendarRef {
            slug: slug.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for CalendarRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
