use anyhow::Result;
use calmly_core::{CalendarStore, CommandEngine};
use owo_colors::{OwoColorize, Stream};

use crate::render;

pub fn run<S: CalendarStore>(
    engine: &mut CommandEngine<S>,
    calendar: &str,
    title: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
) -> Result<()> {
    let event = engine.add_timed(calendar, title, date, start_time, end_time)?;

    println!(
        "{} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        render::created(&event, engine.tz())
    );

    Ok(())
}
