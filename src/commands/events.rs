use anyhow::Result;
use calmly_core::{CalendarStore, CommandEngine, WindowDays};

/// Print the events of `calendar` from today on. A missing or unusable
/// `days` means the default window.
pub fn run<S: CalendarStore>(engine: &CommandEngine<S>, calendar: &str, days: Option<&str>) -> Result<()> {
    for line in engine.events(calendar, WindowDays::parse(days))? {
        println!("{}", line);
    }

    Ok(())
}
