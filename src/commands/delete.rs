use anyhow::Result;
use calmly_core::{CalendarStore, CommandEngine};
use owo_colors::{OwoColorize, Stream};

use crate::render;

pub fn run<S: CalendarStore>(engine: &mut CommandEngine<S>, calendar: &str, title: &str, date: &str) -> Result<()> {
    let report = engine.delete(calendar, title, date)?;

    for (event, error) in &report.failures {
        eprintln!(
            "{}",
            format!("Could not delete '{}' ({}): {}", event.display_title(), event.id, error)
                .if_supports_color(Stream::Stderr, |t| t.yellow())
        );
    }

    println!(
        "{} {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        render::deleted(&report, title, date)
    );

    Ok(())
}
