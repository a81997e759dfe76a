use anyhow::Result;
use calmly_core::{CalendarStore, CommandEngine};
use owo_colors::{OwoColorize, Stream};

use crate::render;

pub fn run<S: CalendarStore>(
    engine: &mut CommandEngine<S>,
    calendar: &str,
    title: &str,
    start: &str,
    end: Option<&str>,
) -> Result<()> {
    let event = engine.add(calendar, title, start, end)?;

    println!(
        "{} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        render::created(&event, engine.tz())
    );

    Ok(())
}
