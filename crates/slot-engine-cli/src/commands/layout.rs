use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::info;
use slot_engine::{fetch_all, layout_week, normalize_events, LayoutConfig, Week};

use crate::input;

pub fn run(
    events_path: &Path,
    week_start: Option<NaiveDate>,
    date: Option<NaiveDate>,
    day_height: f64,
    config: &LayoutConfig,
) -> Result<()> {
    let tz = config.tz()?;
    let week = match week_start {
        Some(start) => Week::new(start, tz)?,
        None => {
            let date = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            Week::containing(date, config.week_start, tz)?
        }
    };

    let mut source = input::load_events(events_path)?;
    let raw = fetch_all(&mut source, &week.bounds()).context("failed to fetch events")?;
    let events = normalize_events(&raw, &config.normalize_options()?);
    info!(
        "laying out {} of {} events for week of {}",
        events.len(),
        raw.len(),
        week.start_date()
    );

    let layout = layout_week(&events, &week, day_height, config);
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
