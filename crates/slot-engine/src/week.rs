//! Week and day windows in the display timezone.
//!
//! A [`Week`] is seven consecutive local calendar days. Each [`DayWindow`] is
//! the half-open interval `[local midnight, next local midnight)`, so days
//! that contain a DST transition are 23 or 25 hours long.

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Number of day columns in the week grid.
pub const DAYS_PER_WEEK: usize = 7;

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day occupies the first column of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// US/Canada convention (Sunday = column 0).
    #[default]
    Sunday,
    /// ISO 8601 standard (Monday = column 0).
    Monday,
}

impl FromStr for WeekStartDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStartDay::Sunday),
            "monday" | "mon" => Ok(WeekStartDay::Monday),
            other => Err(SlotError::Config(format!(
                "unknown week start day '{}' (expected 'sunday' or 'monday')",
                other
            ))),
        }
    }
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

/// The first date of the week containing `date`.
pub fn week_start_for(date: NaiveDate, week_start: WeekStartDay) -> NaiveDate {
    date - Duration::days(days_from_week_start(date.weekday(), week_start))
}

// ── Windows ─────────────────────────────────────────────────────────────────

/// A UTC time range used to query an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> Self {
        Self { time_min, time_max }
    }
}

/// One local calendar day: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    /// Column index within the week (0..7).
    pub index: usize,
    pub date: NaiveDate,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(skip)]
    tz: Tz,
}

impl DayWindow {
    /// Build the window for a single local date.
    pub fn new(index: usize, date: NaiveDate, tz: Tz) -> Result<Self> {
        let next = date
            .succ_opt()
            .ok_or_else(|| SlotError::InvalidDate(format!("no day after {}", date)))?;
        Ok(Self {
            index,
            date,
            start: local_midnight(date, &tz)?.fixed_offset(),
            end: local_midnight(next, &tz)?.fixed_offset(),
            tz,
        })
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Convert an instant to this day's display offset.
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.tz).fixed_offset()
    }

    /// Whether the half-open range `[start, end)` touches this day.
    ///
    /// A zero-length range is treated as a point and counts when it lies
    /// inside `[self.start, self.end)`.
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return start >= self.start && start < self.end;
        }
        !(end <= self.start || start >= self.end)
    }

    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}

/// Seven consecutive day windows in one timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    start_date: NaiveDate,
    tz: Tz,
    days: Vec<DayWindow>,
}

impl Week {
    /// Build the week whose first column is `start_date`.
    pub fn new(start_date: NaiveDate, tz: Tz) -> Result<Self> {
        let mut days = Vec::with_capacity(DAYS_PER_WEEK);
        let mut date = start_date;
        for index in 0..DAYS_PER_WEEK {
            days.push(DayWindow::new(index, date, tz)?);
            date = date
                .succ_opt()
                .ok_or_else(|| SlotError::InvalidDate(format!("no day after {}", date)))?;
        }
        Ok(Self {
            start_date,
            tz,
            days,
        })
    }

    /// Build the week that contains `date`.
    pub fn containing(date: NaiveDate, week_start: WeekStartDay, tz: Tz) -> Result<Self> {
        Self::new(week_start_for(date, week_start), tz)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn days(&self) -> &[DayWindow] {
        &self.days
    }

    /// UTC bounds of the whole week, suitable for a fetch query.
    pub fn bounds(&self) -> TimeWindow {
        let first = &self.days[0];
        let last = &self.days[DAYS_PER_WEEK - 1];
        TimeWindow::new(first.start.with_timezone(&Utc), last.end.with_timezone(&Utc))
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Resolve local midnight of `date` in `tz`.
///
/// Ambiguous midnights take the earlier instant. A midnight inside a DST gap
/// resolves to the first valid wall-clock time after it.
pub(crate) fn local_midnight(date: NaiveDate, tz: &Tz) -> Result<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(dt) = tz.from_local_datetime(&midnight).earliest() {
        return Ok(dt);
    }
    // Gaps are at most a few hours wide; probe forward in 15 minute steps.
    for step in 1..=16 {
        let probe = midnight + Duration::minutes(15 * step);
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return Ok(dt);
        }
    }
    Err(SlotError::InvalidDate(format!(
        "local midnight of {} does not exist in {}",
        date,
        tz.name()
    )))
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(format!("'{}'", s)))
}
