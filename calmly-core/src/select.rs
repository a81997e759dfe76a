//! Picking deletion candidates out of a day's events.

use crate::event::Event;

/// Events whose title equals `title`, ignoring case.
///
/// A missing title compares as the empty string. Matching is exact after
/// case folding; every match is a candidate, not just the first.
pub fn select_for_deletion<'a>(events: &'a [Event], title: &str) -> Vec<&'a Event> {
    let wanted = title.to_lowercase();

    events
        .iter()
        .filter(|e| e.title.as_deref().unwrap_or_default().to_lowercase() == wanted)
        .collect()
}
