use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use slot_engine::{LayoutConfig, Week};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Bounds {
    week_start: NaiveDate,
    timezone: String,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
}

pub fn run(date: NaiveDate, config: &LayoutConfig) -> Result<()> {
    let week = Week::containing(date, config.week_start, config.tz()?)?;
    let window = week.bounds();
    let bounds = Bounds {
        week_start: week.start_date(),
        timezone: config.timezone.clone(),
        time_min: window.time_min,
        time_max: window.time_max,
    };
    println!("{}", serde_json::to_string_pretty(&bounds)?);
    Ok(())
}
