//! Week-grid layout of time-ranged events.
//!
//! For every day of a [`Week`] the engine:
//!
//! 1. clips each event to the day window, dropping events that miss it;
//! 2. places the clipped range vertically (`top_px`, `height_px`) as a
//!    fraction of the measured day height;
//! 3. packs overlapping events into side-by-side columns with a greedy
//!    first-fit pass, then sizes each event's column count from the columns
//!    actually used by the events overlapping it.
//!
//! Everything is recomputed from scratch on each call. The functions here
//! never fail: anything that could not be resolved was dropped during
//! [`crate::normalize`].
//!
//! First-fit packing is order-sensitive. Sorting by start and then by longer
//! duration gives stable, predictable columns, but it does not guarantee the
//! minimum possible number of columns for every input.
//!
//! Columns are packed on absolute instants but drawn on wall-clock minutes.
//! On a fall-back day the repeated hour maps two disjoint instants onto the
//! same pixels: events in the first and second pass of that hour can get
//! separate column counts and be drawn over each other, and an event that
//! spans the transition can be drawn with the 1-minute floor.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike, Utc};
use log::debug;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::event::Event;
use crate::week::{DayWindow, Week};

const HOURS_PER_DAY: f64 = 24.0;
const MINUTES_PER_DAY: f64 = 1440.0;
/// Shortest duration a block is drawn with, and shortest range it occupies.
const MIN_DURATION_MINUTES: f64 = 1.0;
/// Stacking order of the first column; later columns paint above it.
const BASE_Z_INDEX: usize = 2;

// ── Output types ────────────────────────────────────────────────────────────

/// Pixel scale of one rendered day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMetrics {
    pub day_height_px: f64,
    pub pixels_per_hour: f64,
}

impl DayMetrics {
    /// Resolve the day height from a measurement.
    ///
    /// A zero, negative, or non-finite measurement means the surface could
    /// not measure itself, and the configured default is used instead.
    pub fn resolve(measured_day_height_px: f64, config: &LayoutConfig) -> Self {
        let measured = measured_day_height_px;
        let day_height_px = if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            config.default_day_height_px()
        };
        Self {
            day_height_px,
            pixels_per_hour: day_height_px / HOURS_PER_DAY,
        }
    }

    /// Pixel height of one minute.
    pub fn pixels_per_minute(&self) -> f64 {
        self.pixels_per_hour / 60.0
    }
}

/// Render-ready placement of one block inside its day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGeometry {
    pub top_px: f64,
    /// Height with the minimum block height applied.
    pub height_px: f64,
    pub left_percent: f64,
    pub width_percent: f64,
    /// Margin on each side; half the gutter.
    pub inset_px: f64,
    pub gutter_px: f64,
    pub z_index: usize,
}

impl BlockGeometry {
    fn new(
        top_px: f64,
        height_px: f64,
        column_index: usize,
        column_count: usize,
        config: &LayoutConfig,
    ) -> Self {
        let width_percent = 100.0 / column_count as f64;
        Self {
            top_px,
            height_px: height_px.max(config.min_block_height_px),
            left_percent: column_index as f64 * width_percent,
            width_percent,
            inset_px: config.gutter_px / 2.0,
            gutter_px: config.gutter_px,
            z_index: BASE_Z_INDEX + column_index,
        }
    }

    /// CSS width expression, e.g. `calc(50% - 6px)`.
    pub fn width_css(&self) -> String {
        format!("calc({}% - {}px)", self.width_percent, self.gutter_px)
    }
}

/// One event instance placed on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent<'a> {
    pub event: &'a Event,
    pub clipped_start: DateTime<FixedOffset>,
    pub clipped_end: DateTime<FixedOffset>,
    pub top_px: f64,
    pub height_px: f64,
    pub column_index: usize,
    pub column_count: usize,
    pub block: BlockGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout<'a> {
    pub index: usize,
    pub date: NaiveDate,
    /// Events in packing order (start ascending, longer first).
    pub events: Vec<PositionedEvent<'a>>,
}

impl DayLayout<'_> {
    /// Widest overlap cluster of the day.
    pub fn max_column_count(&self) -> usize {
        self.events.iter().map(|p| p.column_count).max().unwrap_or(0)
    }

    /// Positioned instance of the event with `id`, if it touches this day.
    pub fn find(&self, id: &str) -> Option<&PositionedEvent<'_>> {
        self.events.iter().find(|p| p.event.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLayout<'a> {
    pub week_start: NaiveDate,
    pub timezone: String,
    pub metrics: DayMetrics,
    pub days: Vec<DayLayout<'a>>,
}

// ── Entry points ────────────────────────────────────────────────────────────

/// Lay out `events` over every day of `week`.
///
/// A pure function of its inputs: identical arguments give identical output.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use chrono_tz::Tz;
/// use slot_engine::{layout_week, Event, LayoutConfig, Week};
///
/// let at = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
/// let events = vec![Event::new("a", at(9), at(10))];
/// let week = Week::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Tz::UTC).unwrap();
///
/// let layout = layout_week(&events, &week, 480.0, &LayoutConfig::default());
/// let a = &layout.days[0].events[0];
/// assert_eq!(a.top_px, 180.0);
/// assert_eq!(a.height_px, 20.0);
/// ```
pub fn layout_week<'a>(
    events: &'a [Event],
    week: &Week,
    measured_day_height_px: f64,
    config: &LayoutConfig,
) -> WeekLayout<'a> {
    let metrics = DayMetrics::resolve(measured_day_height_px, config);
    let days = week
        .days()
        .iter()
        .map(|day| layout_day(events, day, &metrics, config))
        .collect();
    WeekLayout {
        week_start: week.start_date(),
        timezone: week.tz().name().to_string(),
        metrics,
        days,
    }
}

/// Lay out `events` for a single day window.
pub fn layout_day<'a>(
    events: &'a [Event],
    day: &DayWindow,
    metrics: &DayMetrics,
    config: &LayoutConfig,
) -> DayLayout<'a> {
    let mut slots: Vec<Slot<'a>> = events.iter().filter_map(|ev| Slot::clip(ev, day)).collect();

    slots.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.end.cmp(&a.end)));

    let ranges: Vec<(DateTime<Utc>, DateTime<Utc>)> =
        slots.iter().map(|s| (s.start, s.occupied_end())).collect();
    let columns = pack_columns(&ranges);
    let counts = overlap_column_counts(&ranges, &columns);

    let positioned: Vec<PositionedEvent<'a>> = slots
        .iter()
        .zip(columns.iter().zip(counts.iter()))
        .map(|(slot, (&column_index, &column_count))| {
            slot.position(day, metrics, column_index, column_count, config)
        })
        .collect();

    debug!(
        "day {} ({}): {} events, {} columns",
        day.index,
        day.date,
        positioned.len(),
        columns.iter().max().map_or(0, |c| c + 1)
    );

    DayLayout {
        index: day.index,
        date: day.date,
        events: positioned,
    }
}

// ── Column packing ──────────────────────────────────────────────────────────

/// Greedy first-fit column assignment.
///
/// `ranges` must already be in packing order. Each range goes into the first
/// column whose last end is `<= start`; otherwise a new column is opened.
/// Every range receives exactly one column.
pub fn pack_columns<T: Ord + Copy>(ranges: &[(T, T)]) -> Vec<usize> {
    let mut column_ends: Vec<T> = Vec::new();
    ranges
        .iter()
        .map(|&(start, end)| {
            match column_ends.iter().position(|&column_end| column_end <= start) {
                Some(c) => {
                    column_ends[c] = end;
                    c
                }
                None => {
                    column_ends.push(end);
                    column_ends.len() - 1
                }
            }
        })
        .collect()
}

/// For each range, the number of distinct columns among the ranges that
/// strictly overlap it (itself included).
pub fn overlap_column_counts<T: Ord + Copy>(ranges: &[(T, T)], columns: &[usize]) -> Vec<usize> {
    ranges
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| {
            let mut used: BTreeSet<usize> = BTreeSet::new();
            used.insert(columns[i]);
            for (j, &(other_start, other_end)) in ranges.iter().enumerate() {
                if other_start < end && other_end > start {
                    used.insert(columns[j]);
                }
            }
            used.len()
        })
        .collect()
}

// ── Vertical placement ──────────────────────────────────────────────────────

/// Wall-clock minutes since local midnight, with sub-minute precision.
pub fn minutes_from_midnight(t: DateTime<FixedOffset>) -> f64 {
    t.hour() as f64 * 60.0
        + t.minute() as f64
        + t.second() as f64 / 60.0
        + t.nanosecond() as f64 / 60_000_000_000.0
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// An event clipped to one day.
struct Slot<'a> {
    event: &'a Event,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<'a> Slot<'a> {
    fn clip(event: &'a Event, day: &DayWindow) -> Option<Self> {
        if !day.intersects(event.start, event.end) {
            return None;
        }
        let day_start = day.start.with_timezone(&Utc);
        let day_end = day.end.with_timezone(&Utc);
        Some(Self {
            event,
            start: event.start.max(day_start),
            end: event.end.min(day_end),
        })
    }

    /// Range used for packing. Zero-length slots occupy their 1-minute floor
    /// so they never share a column with a block drawn over them.
    fn occupied_end(&self) -> DateTime<Utc> {
        self.start
            .checked_add_signed(Duration::minutes(MIN_DURATION_MINUTES as i64))
            .map_or(self.end, |floor| self.end.max(floor))
    }

    fn position(
        &self,
        day: &DayWindow,
        metrics: &DayMetrics,
        column_index: usize,
        column_count: usize,
        config: &LayoutConfig,
    ) -> PositionedEvent<'a> {
        let clipped_start = day.to_local(self.start);
        let clipped_end = day.to_local(self.end);

        let start_minutes = minutes_from_midnight(clipped_start);
        // The window end is next day's midnight, which reads 00:00 on the clock.
        let end_minutes = if clipped_end >= day.end {
            MINUTES_PER_DAY
        } else {
            minutes_from_midnight(clipped_end)
        };
        let duration_minutes = (end_minutes - start_minutes).max(MIN_DURATION_MINUTES);

        let top_px = start_minutes / 60.0 * metrics.pixels_per_hour;
        let height_px = duration_minutes / 60.0 * metrics.pixels_per_hour;

        PositionedEvent {
            event: self.event,
            clipped_start,
            clipped_end,
            top_px,
            height_px,
            column_index,
            column_count,
            block: BlockGeometry::new(top_px, height_px, column_index, column_count, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    fn week() -> Week {
        Week::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Tz::UTC).unwrap()
    }

    fn first_day<'a>(events: &'a [Event]) -> DayLayout<'a> {
        let config = LayoutConfig::default();
        let metrics = DayMetrics::resolve(480.0, &config);
        layout_day(events, &week().days()[0], &metrics, &config)
    }

    // ── metrics ─────────────────────────────────────────────────────────

    #[test]
    fn test_metrics_use_measurement() {
        let m = DayMetrics::resolve(480.0, &LayoutConfig::default());
        assert_eq!(m.pixels_per_hour, 20.0);
    }

    #[test]
    fn test_metrics_fall_back_when_unmeasured() {
        let config = LayoutConfig::default();
        for measured in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let m = DayMetrics::resolve(measured, &config);
            assert_eq!(m.day_height_px, 1536.0);
            assert_eq!(m.pixels_per_hour, 64.0);
        }
    }

    // ── packing ─────────────────────────────────────────────────────────

    #[test]
    fn test_pack_columns_reuses_freed_column() {
        let ranges = [(0, 10), (5, 15), (10, 20)];
        assert_eq!(pack_columns(&ranges), vec![0, 1, 0]);
    }

    #[test]
    fn test_pack_columns_nested() {
        let ranges = [(0, 100), (10, 20), (15, 30), (25, 40)];
        assert_eq!(pack_columns(&ranges), vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_pack_columns_empty() {
        let ranges: [(i32, i32); 0] = [];
        assert!(pack_columns(&ranges).is_empty());
    }

    #[test]
    fn test_overlap_counts_are_local() {
        let ranges = [(0, 10), (5, 15), (20, 30)];
        let columns = pack_columns(&ranges);
        assert_eq!(overlap_column_counts(&ranges, &columns), vec![2, 2, 1]);
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let ranges = [(0, 10), (10, 20)];
        let columns = pack_columns(&ranges);
        assert_eq!(columns, vec![0, 0]);
        assert_eq!(overlap_column_counts(&ranges, &columns), vec![1, 1]);
    }

    // ── day layout ──────────────────────────────────────────────────────

    #[test]
    fn test_two_overlapping_events() {
        let events = vec![
            Event::new("A", at(1, 9, 0), at(1, 10, 0)),
            Event::new("B", at(1, 9, 30), at(1, 10, 30)),
        ];
        let day = first_day(&events);
        let a = day.find("A").unwrap();
        let b = day.find("B").unwrap();
        assert_eq!((a.column_index, a.column_count), (0, 2));
        assert_eq!((b.column_index, b.column_count), (1, 2));
        assert_eq!((a.top_px, a.height_px), (180.0, 20.0));
        assert_eq!((b.top_px, b.height_px), (190.0, 20.0));
    }

    #[test]
    fn test_longer_event_wins_column_zero_on_tie() {
        let events = vec![
            Event::new("short", at(1, 9, 0), at(1, 9, 30)),
            Event::new("long", at(1, 9, 0), at(1, 11, 0)),
        ];
        let day = first_day(&events);
        assert_eq!(day.events[0].event.id, "long");
        assert_eq!(day.find("long").unwrap().column_index, 0);
        assert_eq!(day.find("short").unwrap().column_index, 1);
    }

    #[test]
    fn test_event_before_midnight_is_clipped() {
        let events = vec![Event::new("late", at(1, 22, 0), at(2, 2, 0))];
        let day = first_day(&events);
        let p = &day.events[0];
        assert_eq!(p.clipped_end.with_timezone(&Utc), at(2, 0, 0));
        assert_eq!(p.top_px, 440.0);
        assert_eq!(p.height_px, 40.0);
    }

    #[test]
    fn test_zero_duration_floored_to_one_minute() {
        let events = vec![Event::new("pt", at(1, 12, 0), at(1, 12, 0))];
        let day = first_day(&events);
        let p = &day.events[0];
        assert!((p.height_px - 20.0 / 60.0).abs() < 1e-9);
        assert_eq!(p.block.height_px, 12.0);
        assert_eq!(p.column_count, 1);
    }

    #[test]
    fn test_zero_duration_does_not_share_column_with_cover() {
        let events = vec![
            Event::new("a", at(1, 9, 0), at(1, 12, 0)),
            Event::new("pt", at(1, 10, 0), at(1, 10, 0)),
        ];
        let day = first_day(&events);
        let pt = day.find("pt").unwrap();
        assert_eq!(pt.column_index, 1);
        assert_eq!(pt.column_count, 2);
    }

    #[test]
    fn test_sub_minute_precision() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 30).unwrap();
        let events = vec![Event::new("s", start, at(1, 1, 0))];
        let day = first_day(&events);
        assert!((day.events[0].top_px - 0.5 / 60.0 * 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_geometry() {
        let events = vec![
            Event::new("A", at(1, 9, 0), at(1, 10, 0)),
            Event::new("B", at(1, 9, 30), at(1, 10, 30)),
        ];
        let day = first_day(&events);
        let b = &day.find("B").unwrap().block;
        assert_eq!(b.width_percent, 50.0);
        assert_eq!(b.left_percent, 50.0);
        assert_eq!(b.inset_px, 3.0);
        assert_eq!(b.z_index, 3);
        assert_eq!(b.width_css(), "calc(50% - 6px)");
    }

    #[test]
    fn test_max_column_count() {
        let events = vec![
            Event::new("A", at(1, 9, 0), at(1, 10, 0)),
            Event::new("B", at(1, 9, 30), at(1, 10, 30)),
            Event::new("C", at(1, 11, 0), at(1, 12, 0)),
        ];
        assert_eq!(first_day(&events).max_column_count(), 2);
        assert_eq!(first_day(&[]).max_column_count(), 0);
    }

    // ── week layout ─────────────────────────────────────────────────────

    #[test]
    fn test_multi_day_event_on_each_day() {
        let events = vec![Event::new("span", at(1, 20, 0), at(3, 6, 0))];
        let layout = layout_week(&events, &week(), 480.0, &LayoutConfig::default());
        assert_eq!(layout.days[0].events.len(), 1);
        assert_eq!(layout.days[1].events.len(), 1);
        assert_eq!(layout.days[2].events.len(), 1);
        assert!(layout.days[3].events.is_empty());
        let middle = &layout.days[1].events[0];
        assert_eq!(middle.top_px, 0.0);
        assert_eq!(middle.height_px, 480.0);
    }

    #[test]
    fn test_week_layout_reports_metrics() {
        let layout = layout_week(&[], &week(), 0.0, &LayoutConfig::default());
        assert_eq!(layout.metrics.day_height_px, 1536.0);
        assert_eq!(layout.timezone, "UTC");
        assert_eq!(layout.days.len(), 7);
    }

    #[test]
    fn test_local_wall_clock_positions() {
        let tz = Tz::America__New_York;
        let week = Week::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), tz).unwrap();
        // 14:00 UTC is 09:00 EST
        let events = vec![Event::new("ny", at(1, 14, 0), at(1, 15, 0))];
        let layout = layout_week(&events, &week, 480.0, &LayoutConfig::default());
        assert_eq!(layout.days[0].events[0].top_px, 180.0);
    }

    // ── DST days ────────────────────────────────────────────────────────

    fn utc_on(y: i32, mo: u32, d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, m, 0).unwrap()
    }

    fn dst_day<'a>(events: &'a [Event], date: NaiveDate, tz: Tz) -> DayLayout<'a> {
        let config = LayoutConfig::default();
        let metrics = DayMetrics::resolve(480.0, &config);
        let day = DayWindow::new(0, date, tz).unwrap();
        layout_day(events, &day, &metrics, &config)
    }

    #[test]
    fn test_spring_forward_day_uses_wall_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let events = vec![
            // 00:00 EST to 00:00 EDT next day, 23 hours
            Event::new("whole", utc_on(2024, 3, 10, 5, 0), utc_on(2024, 3, 11, 4, 0)),
            // 03:00 to 04:00 EDT, after the skipped hour
            Event::new("after", utc_on(2024, 3, 10, 7, 0), utc_on(2024, 3, 10, 8, 0)),
            // 20:00 EDT until past midnight
            Event::new("late", utc_on(2024, 3, 11, 0, 0), utc_on(2024, 3, 11, 6, 0)),
        ];
        let day = dst_day(&events, date, Tz::America__New_York);

        let whole = day.find("whole").unwrap();
        assert_eq!(whole.top_px, 0.0);
        assert_eq!(whole.height_px, 480.0);

        let after = day.find("after").unwrap();
        assert_eq!(after.top_px, 60.0);
        assert_eq!(after.height_px, 20.0);

        let late = day.find("late").unwrap();
        assert_eq!(late.top_px, 400.0);
        assert_eq!(late.height_px, 80.0);
        assert_eq!(late.top_px + late.height_px, 480.0);
    }

    #[test]
    fn test_fall_back_day_uses_wall_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let events = vec![
            // 00:00 EDT to 00:00 EST next day, 25 hours
            Event::new("whole", utc_on(2024, 11, 3, 4, 0), utc_on(2024, 11, 4, 5, 0)),
            // 09:00 to 10:00 EST, after the repeated hour
            Event::new("after", utc_on(2024, 11, 3, 14, 0), utc_on(2024, 11, 3, 15, 0)),
            // 22:00 EST until past midnight
            Event::new("late", utc_on(2024, 11, 4, 3, 0), utc_on(2024, 11, 4, 8, 0)),
        ];
        let day = dst_day(&events, date, Tz::America__New_York);

        let whole = day.find("whole").unwrap();
        assert_eq!(whole.top_px, 0.0);
        assert_eq!(whole.height_px, 480.0);

        let after = day.find("after").unwrap();
        assert_eq!(after.top_px, 180.0);
        assert_eq!(after.height_px, 20.0);

        let late = day.find("late").unwrap();
        assert_eq!(late.top_px, 440.0);
        assert_eq!(late.height_px, 40.0);
    }

    #[test]
    fn test_fall_back_repeated_hour_shares_pixels() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let events = vec![
            // 01:00 to 01:30 EDT
            Event::new("edt", utc_on(2024, 11, 3, 5, 0), utc_on(2024, 11, 3, 5, 30)),
            // 01:00 to 01:30 EST
            Event::new("est", utc_on(2024, 11, 3, 6, 0), utc_on(2024, 11, 3, 6, 30)),
            // 01:45 EDT to 01:15 EST, across the transition
            Event::new("span", utc_on(2024, 11, 3, 5, 45), utc_on(2024, 11, 3, 6, 15)),
        ];
        let day = dst_day(&events, date, Tz::America__New_York);
        let edt = day.find("edt").unwrap();
        let est = day.find("est").unwrap();
        let span = day.find("span").unwrap();
        assert_eq!((edt.top_px, edt.height_px), (20.0, 10.0));
        assert_eq!((est.top_px, est.height_px), (20.0, 10.0));
        // Packed on instants: "edt" overlaps nothing, so it keeps full width.
        assert_eq!((edt.column_index, edt.column_count), (0, 1));
        assert_eq!((span.column_index, span.column_count), (0, 2));
        assert_eq!((est.column_index, est.column_count), (1, 2));
        // Wall-clock end precedes wall-clock start.
        assert!((span.height_px - 20.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_starting_after_midnight_gap() {
        // Santiago skips 00:00 to 01:00 on 2024-09-08
        let date = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
        let events = vec![
            Event::new("whole", utc_on(2024, 9, 8, 4, 0), utc_on(2024, 9, 9, 3, 0)),
            // 09:00 local (-03:00)
            Event::new("morning", utc_on(2024, 9, 8, 12, 0), utc_on(2024, 9, 8, 13, 0)),
        ];
        let day = dst_day(&events, date, Tz::America__Santiago);

        let whole = day.find("whole").unwrap();
        assert_eq!(whole.clipped_start.with_timezone(&Utc), utc_on(2024, 9, 8, 4, 0));
        assert_eq!(whole.top_px, 20.0);
        assert_eq!(whole.height_px, 460.0);

        let morning = day.find("morning").unwrap();
        assert_eq!(morning.top_px, 180.0);
        assert_eq!(morning.height_px, 20.0);
    }
}
