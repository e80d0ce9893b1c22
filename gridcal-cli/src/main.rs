mod commands;
mod render;
mod utils;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gridcal_core::config::GridcalConfig;
use gridcal_core::kv::FileStore;
use gridcal_core::view::MonthCursor;
use gridcal_core::{EventColor, EventStore};

#[derive(Parser)]
#[command(name = "gridcal")]
#[command(about = "A month-grid calendar in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long, value_parser = parse_month)]
        month: Option<NaiveDate>,

        /// Go back this many months
        #[arg(long, conflicts_with = "next", value_parser = month_offset())]
        prev: Option<u32>,

        /// Go forward this many months
        #[arg(long, value_parser = month_offset())]
        next: Option<u32>,
    },
    /// List every event on a day
    Day {
        /// Day to show (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// List all events
    List,
    /// Add an event
    Add {
        name: String,

        /// Day of the event (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        #[arg(long, conflicts_with_all = ["start", "end"])]
        all_day: bool,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// red, green or blue
        #[arg(short, long)]
        color: Option<EventColor>,
    },
    /// Edit an event
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        /// Make the event all-day (drops its times)
        #[arg(long, conflicts_with_all = ["start", "end"])]
        all_day: bool,

        /// Start time (HH:MM). Setting a time makes the event timed
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,

        /// red, green or blue
        #[arg(short, long)]
        color: Option<EventColor>,
    },
    /// Delete an event
    Delete { id: String },
}

fn main() -> Result<()> {
    utils::logging::init();

    let cli = Cli::parse();
    let config = GridcalConfig::load()?;
    let mut store = open_store(&config)?;

    match cli.command {
        Commands::Month { month, prev, next } => {
            let mut cursor = month.map(MonthCursor::new).unwrap_or_else(MonthCursor::today);
            if let Some(n) = prev.and_then(|n| i32::try_from(n).ok()) {
                cursor.shift(-n);
            }
            if let Some(n) = next.and_then(|n| i32::try_from(n).ok()) {
                cursor.shift(n);
            }
            commands::month::run(&store, &config, cursor)
        }
        Commands::Day { date } => commands::day::run(&store, date),
        Commands::List => commands::list::run(&store),
        Commands::Add {
            name,
            date,
            all_day,
            start,
            end,
            color,
        } => commands::add::run(
            &mut store,
            commands::add::NewEvent {
                name,
                date,
                all_day,
                start,
                end,
                color,
            },
        ),
        Commands::Edit {
            id,
            name,
            all_day,
            start,
            end,
            color,
        } => commands::edit::run(
            &mut store,
            &id,
            commands::edit::EventChanges {
                name,
                all_day: if all_day {
                    Some(true)
                } else if start.is_some() || end.is_some() {
                    Some(false)
                } else {
                    None
                },
                start,
                end,
                color,
            },
        ),
        Commands::Delete { id } => commands::delete::run(&mut store, &id),
    }
}

fn open_store(config: &GridcalConfig) -> Result<EventStore<FileStore>> {
    let data_path = config.data_path();
    tracing::debug!(path = %data_path.display(), "opening event store");

    EventStore::open(FileStore::new(&data_path))
        .with_context(|| format!("Could not open event store in {}", data_path.display()))
}

/// Month offsets stay within `i32` so `MonthCursor::shift` can take them.
fn month_offset() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(..=i64::from(i32::MAX))
}

fn parse_month(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| format!("Invalid month '{}'. Expected YYYY-MM", s))
}
