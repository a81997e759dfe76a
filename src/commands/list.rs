use anyhow::Result;
use calmly_core::{CalendarStore, CommandEngine};

use crate::render::Render;

pub fn run<S: CalendarStore>(engine: &CommandEngine<S>) -> Result<()> {
    for calendar in engine.list()? {
        println!("{}", calendar.render());
    }

    Ok(())
}
