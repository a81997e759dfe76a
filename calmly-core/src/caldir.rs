//! A directory of calendars, each a directory of `.ics` files.
//!
//! ```text
//! ~/calendar/
//!   family/
//!     .calmly/config.toml        (optional: name, kind)
//!     2025-07-01__vacation.ics
//!     2025-03-10T0900__standup.ics
//!   work/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::calendar::CalendarRef;
use crate::calendar_config::CalendarConfig;
use crate::config::CalmlyConfig;
use crate::error::{CalmlyError, CalmlyResult};
use crate::event::Event;
use crate::ics::{generate_ics, parse_event};
use crate::interval::EventInterval;
use crate::store::{Access, AccessRequest, CalendarStore};
use crate::utils::slugify;

#[derive(Debug, Clone)]
pub struct Caldir {
    root: PathBuf,
    tz: Tz,
}

impl Caldir {
    /// A caldir rooted at `root`. Dates in files are read in `tz`.
    pub fn new(root: impl Into<PathBuf>, tz: Tz) -> Self {
        Caldir { root: root.into(), tz }
    }

    pub fn from_config(config: &CalmlyConfig, tz: Tz) -> Self {
        Self::new(config.calendar_path(), tz)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn calendar_path(&self, calendar: &CalendarRef) -> PathBuf {
        self.root.join(&calendar.slug)
    }

    fn load_calendar(path: &Path) -> Option<CalendarRef> {
        let slug = path.file_name()?.to_str()?;

        let config = CalendarConfig::load(path).unwrap_or_else(|e| {
            warn!(calendar = slug, error = %e, "Ignoring unreadable calendar config");
            CalendarConfig::default()
        });
        let name = config.name.as_deref().unwrap_or(slug);

        Some(CalendarRef::new(slug, name, config.kind))
    }

    /// Every readable event of `calendar` with its file, in filename order.
    fn read_events(&self, calendar: &CalendarRef) -> CalmlyResult<Vec<(PathBuf, Event)>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(self.calendar_path(calendar))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ics"))
            .collect();
        paths.sort();

        let events = paths
            .into_iter()
            .filter_map(|path| match self.read_event(&path, calendar) {
                Ok(event) => Some((path, event)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable event file");
                    None
                }
            })
            .collect();

        Ok(events)
    }

    fn read_event(&self, path: &Path, calendar: &CalendarRef) -> CalmlyResult<Event> {
        let content = fs::read_to_string(path)?;
        parse_event(&content, calendar, self.tz)
    }

    /// `YYYY-MM-DD__slug.ics` for all-day events, `YYYY-MM-DDTHHMM__slug.ics`
    /// for timed ones, in local time.
    fn base_filename(&self, event: &Event) -> String {
        let slug = match slugify(event.display_title()) {
            s if s.is_empty() => "event".to_string(),
            s => s,
        };

        let date = if event.is_all_day() {
            event.interval.first_day(self.tz).format("%Y-%m-%d").to_string()
        } else {
            event
                .interval
                .start()
                .with_timezone(&self.tz)
                .format("%Y-%m-%dT%H%M")
                .to_string()
        };

        format!("{}__{}", date, slug)
    }

    fn unique_filename(&self, dir: &Path, event: &Event) -> CalmlyResult<String> {
        let base = self.base_filename(event);

        if !dir.join(format!("{}.ics", base)).exists() {
            return Ok(format!("{}.ics", base));
        }

        for n in 2..=100 {
            let suffixed = format!("{}-{}.ics", base, n);
            if !dir.join(&suffixed).exists() {
                return Ok(suffixed);
            }
        }

        Err(CalmlyError::StoreCreateFailed(format!(
            "Too many filename collisions for {}",
            base
        )))
    }
}

fn check_access(root: &Path) -> CalmlyResult<Access> {
    let metadata = match fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Access::Denied(format!(
                "calendar directory {} does not exist",
                root.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_dir() {
        return Ok(Access::Denied(format!("{} is not a directory", root.display())));
    }
    if metadata.permissions().readonly() {
        return Ok(Access::Denied(format!("{} is read-only", root.display())));
    }

    Ok(Access::Granted)
}

impl CalendarStore for Caldir {
    fn request_access(&self) -> AccessRequest {
        let (tx, rx) = oneshot::channel();
        let root = self.root.clone();

        std::thread::spawn(move || {
            let _ = tx.send(check_access(&root));
        });

        rx
    }

    fn list_calendars(&self) -> CalmlyResult<Vec<CalendarRef>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| !n.starts_with('.'))
            })
            .collect();
        paths.sort();

        Ok(paths.iter().filter_map(|path| Self::load_calendar(path)).collect())
    }

    fn query_events(&self, calendar: &CalendarRef, interval: &EventInterval) -> CalmlyResult<Vec<Event>> {
        Ok(self
            .read_events(calendar)?
            .into_iter()
            .map(|(_, event)| event)
            .filter(|event| event.interval.overlaps(interval))
            .collect())
    }

    fn create_event(
        &mut self,
        calendar: &CalendarRef,
        title: &str,
        interval: &EventInterval,
    ) -> CalmlyResult<Event> {
        let dir = self.calendar_path(calendar);
        if !dir.is_dir() {
            return Err(CalmlyError::StoreCreateFailed(format!(
                "calendar directory {} is missing",
                dir.display()
            )));
        }

        let event = Event {
            id: format!("{}@calmly", uuid::Uuid::new_v4()),
            title: Some(title.to_string()),
            interval: *interval,
            calendar: calendar.clone(),
        };

        let filename = self.unique_filename(&dir, &event)?;
        fs::write(dir.join(&filename), generate_ics(&event, self.tz))?;
        debug!(file = %filename, uid = %event.id, "Wrote event");

        Ok(event)
    }

    fn remove_event(&mut self, event: &Event) -> CalmlyResult<()> {
        let (path, _) = self
            .read_events(&event.calendar)?
            .into_iter()
            .find(|(_, e)| e.id == event.id)
            .ok_or_else(|| {
                CalmlyError::StoreRemoveFailed(format!(
                    "no file for event {} in {}",
                    event.id, event.calendar
                ))
            })?;

        fs::remove_file(&path)?;
        debug!(path = %path.display(), "Removed event file");

        Ok(())
    }
}
