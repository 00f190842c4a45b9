//! Raw calendar records and their normalization into [`Event`]s.
//!
//! Raw records follow the common calendar-API shape where each endpoint is
//! either a date-only value (all-day) or a date-time with an optional zone:
//!
//! ```json
//! { "id": "a1", "summary": "Standup",
//!   "start": { "dateTime": "2024-01-01T09:00:00-05:00" },
//!   "end":   { "dateTime": "2024-01-01T09:15:00-05:00" } }
//! ```
//!
//! Normalization is the boundary of the layout engine. Records that cannot be
//! resolved are dropped here with a warning so that nothing downstream has to
//! handle an undefined position.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::event::{Event, EventPayload, EventType};
use crate::week::{local_midnight, parse_timezone};

/// How far an exclusive all-day end is pulled back into its last day.
const ALL_DAY_END_ADJUSTMENT_MS: i64 = 1;

const STATUS_CANCELLED: &str = "cancelled";

/// A start or end value as supplied by a calendar source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDateTime {
    /// Date-only value (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// RFC 3339 date-time, or a local date-time without offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    /// IANA zone used when `date_time` carries no offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl RawDateTime {
    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn date_time(value: impl Into<String>) -> Self {
        Self {
            date_time: Some(value.into()),
            ..Self::default()
        }
    }

    fn is_date_only(&self) -> bool {
        self.date_time.is_none() && self.date.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "self")]
    pub is_self: bool,
}

impl RawUser {
    fn label(&self) -> Option<String> {
        self.display_name.clone().or_else(|| self.email.clone())
    }
}

/// A calendar record before normalization. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<RawUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<RawUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<RawDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<RawDateTime>,
}

/// Options for [`normalize_events`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Zone for date-only values and offset-less date-times.
    pub display_tz: Tz,
    /// Event types kept in the output. Everything else is filtered out.
    pub visible_event_types: Vec<EventType>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            display_tz: Tz::UTC,
            visible_event_types: vec![EventType::Default],
        }
    }
}

/// Normalize a single raw record.
///
/// # Errors
///
/// Returns [`SlotError::MissingField`] when `start` or `end` is absent,
/// [`SlotError::InvalidDatetime`] / [`SlotError::InvalidDate`] when a value
/// cannot be parsed, and [`SlotError::InvalidTimezone`] for an unknown zone.
pub fn normalize_event(raw: &RawEvent, display_tz: Tz) -> Result<Event> {
    let raw_start = raw
        .start
        .as_ref()
        .ok_or_else(|| SlotError::MissingField(format!("start of event '{}'", raw.id)))?;
    let raw_end = raw
        .end
        .as_ref()
        .ok_or_else(|| SlotError::MissingField(format!("end of event '{}'", raw.id)))?;

    let start = resolve_instant(raw_start, display_tz)?;
    let mut end = resolve_instant(raw_end, display_tz)?;

    let is_all_day = raw_start.is_date_only();
    if is_all_day && raw_end.is_date_only() {
        end = end
            .checked_sub_signed(Duration::milliseconds(ALL_DAY_END_ADJUSTMENT_MS))
            .ok_or_else(|| {
                SlotError::InvalidDate(format!("end of event '{}' is out of range", raw.id))
            })?;
    }

    if end < start {
        warn!(
            "event '{}' ends before it starts ({} < {}); treating as zero duration",
            raw.id, end, start
        );
        end = start;
    }

    Ok(Event {
        id: raw.id.clone(),
        start,
        end,
        is_all_day,
        kind: raw.event_type.clone(),
        payload: EventPayload {
            title: raw.summary.clone(),
            organizer: raw.organizer.as_ref().and_then(RawUser::label),
            location: raw.location.clone(),
            description: raw.description.clone(),
            created_by_self: raw.creator.as_ref().is_some_and(|c| c.is_self),
        },
    })
}

/// Normalize a batch of raw records for display.
///
/// Cancelled records and records whose type is not visible are filtered out.
/// Records that fail [`normalize_event`] are dropped with a warning. The
/// result is sorted by start instant; equal starts keep source order.
pub fn normalize_events(raw: &[RawEvent], options: &NormalizeOptions) -> Vec<Event> {
    let mut events: Vec<Event> = raw
        .iter()
        .filter(|r| r.status.as_deref() != Some(STATUS_CANCELLED))
        .filter(|r| options.visible_event_types.contains(&r.event_type))
        .filter_map(|r| match normalize_event(r, options.display_tz) {
            Ok(ev) => Some(ev),
            Err(e) => {
                warn!("dropping event '{}': {}", r.id, e);
                None
            }
        })
        .collect();
    events.sort_by_key(|ev| ev.start);
    events
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Resolve a raw endpoint to an absolute instant.
fn resolve_instant(value: &RawDateTime, display_tz: Tz) -> Result<DateTime<Utc>> {
    if let Some(dt) = value.date_time.as_deref() {
        return resolve_date_time(dt, value.time_zone.as_deref(), display_tz);
    }
    if let Some(d) = value.date.as_deref() {
        let date = NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", d, e)))?;
        return Ok(local_midnight(date, &display_tz)?.with_timezone(&Utc));
    }
    Err(SlotError::MissingField(
        "neither 'date' nor 'dateTime' is set".to_string(),
    ))
}

fn resolve_date_time(s: &str, zone: Option<&str>, display_tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| SlotError::InvalidDatetime(format!("'{}': {}", s, e)))?;
    let tz = match zone {
        Some(name) => parse_timezone(name)?,
        None => display_tz,
    };
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            SlotError::InvalidDatetime(format!("'{}' does not exist in {}", s, tz.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(id: &str, start: &str, end: &str) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            start: Some(RawDateTime::date_time(start)),
            end: Some(RawDateTime::date_time(end)),
            ..RawEvent::default()
        }
    }

    fn all_day(id: &str, start: &str, end: &str) -> RawEvent {
        RawEvent {
            id: id.to_string(),
            start: Some(RawDateTime::date(start)),
            end: Some(RawDateTime::date(end)),
            ..RawEvent::default()
        }
    }

    // ── normalize_event ─────────────────────────────────────────────────

    #[test]
    fn test_timed_event_with_offset() {
        let ev = normalize_event(
            &timed("a", "2024-01-01T09:00:00-05:00", "2024-01-01T10:00:00-05:00"),
            Tz::UTC,
        )
        .unwrap();
        assert_eq!(ev.start.to_rfc3339(), "2024-01-01T14:00:00+00:00");
        assert_eq!(ev.end.to_rfc3339(), "2024-01-01T15:00:00+00:00");
        assert!(!ev.is_all_day);
    }

    #[test]
    fn test_naive_date_time_uses_declared_zone() {
        let mut raw = timed("a", "2024-01-01T09:00:00", "2024-01-01T10:00:00");
        raw.start.as_mut().unwrap().time_zone = Some("Europe/Berlin".to_string());
        let ev = normalize_event(&raw, Tz::UTC).unwrap();
        assert_eq!(ev.start.to_rfc3339(), "2024-01-01T08:00:00+00:00");
        // end has no zone: falls back to the display zone
        assert_eq!(ev.end.to_rfc3339(), "2024-01-01T10:00:00+00:00");
    }

    #[test]
    fn test_all_day_end_pulled_into_last_day() {
        let ev = normalize_event(&all_day("h", "2024-01-01", "2024-01-04"), Tz::UTC).unwrap();
        assert!(ev.is_all_day);
        assert_eq!(ev.start.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(
            ev.end,
            Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap() - Duration::milliseconds(1)
        );
    }

    #[test]
    fn test_all_day_uses_display_zone_midnight() {
        let ev = normalize_event(
            &all_day("h", "2024-01-01", "2024-01-02"),
            Tz::America__New_York,
        )
        .unwrap();
        assert_eq!(ev.start.to_rfc3339(), "2024-01-01T05:00:00+00:00");
    }

    #[test]
    fn test_inverted_range_collapses() {
        let ev = normalize_event(
            &timed("a", "2024-01-01T10:00:00Z", "2024-01-01T09:00:00Z"),
            Tz::UTC,
        )
        .unwrap();
        assert_eq!(ev.start, ev.end);
    }

    #[test]
    fn test_missing_start_is_error() {
        let mut raw = timed("a", "2024-01-01T10:00:00Z", "2024-01-01T11:00:00Z");
        raw.start = None;
        assert!(matches!(
            normalize_event(&raw, Tz::UTC),
            Err(SlotError::MissingField(_))
        ));
    }

    #[test]
    fn test_unparseable_datetime_is_error() {
        let raw = timed("a", "not a date", "2024-01-01T11:00:00Z");
        assert!(matches!(
            normalize_event(&raw, Tz::UTC),
            Err(SlotError::InvalidDatetime(_))
        ));
    }

    #[test]
    fn test_unknown_zone_is_error() {
        let mut raw = timed("a", "2024-01-01T09:00:00", "2024-01-01T10:00:00");
        raw.start.as_mut().unwrap().time_zone = Some("Nowhere/Land".to_string());
        assert!(matches!(
            normalize_event(&raw, Tz::UTC),
            Err(SlotError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_payload_is_carried() {
        let mut raw = timed("a", "2024-01-01T09:00:00Z", "2024-01-01T10:00:00Z");
        raw.summary = Some("Review".to_string());
        raw.location = Some("Room 4".to_string());
        raw.creator = Some(RawUser {
            is_self: true,
            ..RawUser::default()
        });
        raw.organizer = Some(RawUser {
            email: Some("lead@example.com".to_string()),
            ..RawUser::default()
        });
        let ev = normalize_event(&raw, Tz::UTC).unwrap();
        assert_eq!(ev.display_title(), "Review");
        assert_eq!(ev.payload.location.as_deref(), Some("Room 4"));
        assert_eq!(ev.payload.organizer.as_deref(), Some("lead@example.com"));
        assert!(ev.payload.created_by_self);
    }

    #[test]
    fn test_all_day_at_earliest_representable_date_is_error() {
        assert!(matches!(
            normalize_event(&all_day("x", "-262143-01-01", "-262143-01-01"), Tz::UTC),
            Err(SlotError::InvalidDate(_))
        ));
    }

    // ── normalize_events ────────────────────────────────────────────────

    #[test]
    fn test_batch_drops_out_of_range_all_day_record() {
        let raw = vec![
            all_day("x", "-262143-01-01", "-262143-01-01"),
            timed("ok", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z"),
        ];
        let events = normalize_events(&raw, &NormalizeOptions::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ok");
    }

    #[test]
    fn test_batch_drops_bad_records_and_sorts() {
        let raw = vec![
            timed("late", "2024-01-01T15:00:00Z", "2024-01-01T16:00:00Z"),
            timed("bad", "garbage", "2024-01-01T16:00:00Z"),
            timed("early", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z"),
        ];
        let events = normalize_events(&raw, &NormalizeOptions::default());
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_batch_filters_cancelled_and_hidden_types() {
        let mut cancelled = timed("c", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z");
        cancelled.status = Some("cancelled".to_string());
        let mut ooo = timed("o", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z");
        ooo.event_type = EventType::OutOfOffice;
        let keep = timed("k", "2024-01-01T08:00:00Z", "2024-01-01T09:00:00Z");

        let events = normalize_events(
            &[cancelled, ooo.clone(), keep],
            &NormalizeOptions::default(),
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "k");

        let options = NormalizeOptions {
            visible_event_types: vec![EventType::Default, EventType::OutOfOffice],
            ..NormalizeOptions::default()
        };
        assert_eq!(normalize_events(&[ooo], &options).len(), 1);
    }

    #[test]
    fn test_raw_event_deserializes_from_api_shape() {
        let json = r#"{
            "kind": "calendar#event",
            "id": "evt1",
            "status": "confirmed",
            "summary": "Planning",
            "eventType": "default",
            "creator": { "email": "me@example.com", "self": true },
            "start": { "dateTime": "2024-01-01T09:00:00Z", "timeZone": "UTC" },
            "end": { "dateTime": "2024-01-01T10:00:00Z", "timeZone": "UTC" }
        }"#;
        let raw: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, "evt1");
        assert!(raw.creator.as_ref().unwrap().is_self);
        assert_eq!(raw.start.as_ref().unwrap().time_zone.as_deref(), Some("UTC"));
    }
}
