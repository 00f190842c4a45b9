//! Loading config and event files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use slot_engine::{EventPage, LayoutConfig, PagedSource, RawEvent, WeekStartDay};

/// Accepted shapes of an events file.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsFile {
    Pages(Vec<EventPage>),
    Page(EventPage),
    Events(Vec<RawEvent>),
}

/// Read the config file (if any) and apply command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    timezone: Option<String>,
    week_start_day: Option<WeekStartDay>,
) -> Result<LayoutConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LayoutConfig::from_json_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    if let Some(tz) = timezone {
        config.timezone = tz;
    }
    if let Some(day) = week_start_day {
        config.week_start = day;
    }
    config.validate()?;
    Ok(config)
}

/// Read an events file into a paged source.
pub fn load_events(path: &Path) -> Result<PagedSource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read events {}", path.display()))?;
    let parsed: EventsFile = serde_json::from_str(&text)
        .with_context(|| format!("unrecognized events file {}", path.display()))?;
    Ok(match parsed {
        EventsFile::Pages(pages) => PagedSource::new(pages),
        EventsFile::Page(page) => PagedSource::new(vec![page]),
        EventsFile::Events(items) => PagedSource::single(items),
    })
}
