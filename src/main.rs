mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use calmly_core::{Caldir, CalmlyConfig, CommandEngine};
use chrono_tz::Tz;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use owo_colors::{OwoColorize, Stream};
use tracing::{Level, debug, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "calmly", version)]
#[command(about = "A calm CLI for your calendars")]
#[command(after_help = "Dates are YYYY-MM-DD, times are 24-hour HH:MM, both in the local time zone.\n\
Multi-day events span from start to end (inclusive).")]
struct Cli {
    /// Calendar directory (defaults to calendar_dir from config.toml)
    #[arg(long, global = true)]
    calendar_dir: Option<PathBuf>,

    /// Log what calmly does to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all calendars
    List,
    /// Show upcoming events
    Events {
        calendar: String,

        /// Number of days ahead to show (default: 30)
        days: Option<String>,
    },
    /// Add an all-day event
    Add {
        calendar: String,
        title: String,

        /// First day (YYYY-MM-DD)
        start: String,

        /// Last day, inclusive (defaults to start)
        end: Option<String>,
    },
    /// Add a timed event
    Addtimed {
        calendar: String,
        title: String,

        /// Day of the event (YYYY-MM-DD)
        date: String,

        /// Start time (HH:MM)
        start_time: String,

        /// End time (HH:MM), later the same day
        end_time: String,
    },
    /// Delete every event with this title on a day
    Delete {
        calendar: String,
        title: String,

        /// Day of the event (YYYY-MM-DD)
        date: String,
    },
    /// Show version
    Version,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_status(&e));
        }
    };

    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().if_supports_color(Stream::Stderr, |t| t.red()));
            ExitCode::FAILURE
        }
    }
}

/// Help and version output succeed; every other parse error is a usage error.
fn exit_status(e: &clap::Error) -> u8 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let calendar_dir = cli.calendar_dir;
    let open = || open_engine(calendar_dir.clone(), local_timezone());

    match cli.command {
        Commands::List => commands::list::run(&open()?),
        Commands::Events { calendar, days } => commands::events::run(&open()?, &calendar, days.as_deref()),
        Commands::Add {
            calendar,
            title,
            start,
            end,
        } => commands::add::run(&mut open()?, &calendar, &title, &start, end.as_deref()),
        Commands::Addtimed {
            calendar,
            title,
            date,
            start_time,
            end_time,
        } => commands::add_timed::run(&mut open()?, &calendar, &title, &date, &start_time, &end_time),
        Commands::Delete { calendar, title, date } => commands::delete::run(&mut open()?, &calendar, &title, &date),
        Commands::Version => {
            println!("calmly v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Only fails if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn local_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            warn!(zone = %name, "Unknown local time zone, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            warn!(error = %e, "Could not detect local time zone, using UTC");
            Tz::UTC
        }
    }
}

/// Open the caldir and wait for calendar access before anything else runs.
fn open_engine(calendar_dir: Option<PathBuf>, tz: Tz) -> Result<CommandEngine<Caldir>> {
    let caldir = match calendar_dir {
        Some(dir) => Caldir::new(dir, tz),
        None => Caldir::from_config(&CalmlyConfig::load()?, tz),
    };
    debug!(root = %caldir.root().display(), %tz, "Opening calendar directory");

    Ok(CommandEngine::authorize(caldir, tz)?)
}
