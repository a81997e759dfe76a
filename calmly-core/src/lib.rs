//! Core of calmly: date handling, event selection, formatting and the
//! calendar stores the command-line tool runs against.

pub mod caldir;
pub mod calendar;
pub mod calendar_config;
pub mod config;
pub mod datespec;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod ics;
pub mod interval;
pub mod memory;
pub mod query;
pub mod select;
pub mod store;
pub mod utils;

pub use caldir::Caldir;
pub use calendar::{CalendarKind, CalendarRef};
pub use config::CalmlyConfig;
pub use engine::{CommandEngine, DeleteReport};
pub use error::{CalmlyError, CalmlyResult};
pub use event::Event;
pub use interval::{EventInterval, WindowDays};
pub use memory::MemoryStore;
pub use store::{Access, CalendarStore};
