mod commands;
mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use slot_engine::WeekStartDay;

#[derive(Parser)]
#[command(name = "slot-layout", version)]
#[command(about = "Lay out a week of calendar events as positioned week-grid blocks")]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the week layout for a file of raw events as JSON
    Layout {
        /// JSON file: an array of events, a page {items, nextPageToken}, or an array of pages
        #[arg(short, long)]
        events: PathBuf,

        /// First day of the week grid (YYYY-MM-DD)
        #[arg(long, conflicts_with = "date")]
        week_start: Option<NaiveDate>,

        /// Any day inside the week to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Which weekday starts the week when --date is used (sunday|monday)
        #[arg(long)]
        week_start_day: Option<WeekStartDay>,

        /// IANA timezone of the grid (e.g. "Europe/Berlin")
        #[arg(short, long)]
        timezone: Option<String>,

        /// Measured day column height in pixels; 0 uses the configured default
        #[arg(long, default_value_t = 0.0)]
        day_height: f64,

        /// JSON layout config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the UTC fetch bounds of the week containing a date
    Bounds {
        /// Any day inside the week (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Which weekday starts the week (sunday|monday)
        #[arg(long)]
        week_start_day: Option<WeekStartDay>,

        /// IANA timezone of the grid
        #[arg(short, long)]
        timezone: Option<String>,

        /// JSON layout config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    match cli.command {
        Commands::Layout {
            events,
            week_start,
            date,
            week_start_day,
            timezone,
            day_height,
            config,
        } => {
            let config = input::load_config(config.as_deref(), timezone, week_start_day)?;
            commands::layout::run(&events, week_start, date, day_height, &config)
        }
        Commands::Bounds {
            date,
            week_start_day,
            timezone,
            config,
        } => {
            let config = input::load_config(config.as_deref(), timezone, week_start_day)?;
            commands::bounds::run(date, &config)
        }
    }
}

fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let level = if verbose { "debug" } else { "warn" };
    Logger::try_with_env_or_str(level)
        .context("invalid log specification")?
        .log_to_stderr()
        .start()
        .context("failed to start logger")
}
