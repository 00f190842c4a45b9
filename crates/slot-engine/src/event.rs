//! Normalized calendar events consumed by the layout engine.
//!
//! An [`Event`] is produced at the boundary by [`crate::normalize`] and is
//! never mutated afterwards. The layout engine reads only `start`, `end`,
//! and `id`; everything in [`EventPayload`] is passed through for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source event type. Calendar providers tag special events (birthdays,
/// focus time, out-of-office, ...) that a week grid usually hides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    #[default]
    Default,
    Birthday,
    FocusTime,
    FromGmail,
    OutOfOffice,
    WorkingLocation,
    Other(String),
}

impl EventType {
    /// The wire name of this event type (e.g. `"focusTime"`).
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Default => "default",
            EventType::Birthday => "birthday",
            EventType::FocusTime => "focusTime",
            EventType::FromGmail => "fromGmail",
            EventType::OutOfOffice => "outOfOffice",
            EventType::WorkingLocation => "workingLocation",
            EventType::Other(s) => s,
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            "default" => EventType::Default,
            "birthday" => EventType::Birthday,
            "focusTime" => EventType::FocusTime,
            "fromGmail" => EventType::FromGmail,
            "outOfOffice" => EventType::OutOfOffice,
            "workingLocation" => EventType::WorkingLocation,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        EventType::from(s.as_str())
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_str().to_string()
    }
}

/// Display data carried alongside an event. Not interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: Option<String>,
    pub organizer: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Whether the viewing user created the event.
    pub created_by_self: bool,
}

/// A normalized, time-ranged calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
    #[serde(default)]
    pub kind: EventType,
    #[serde(default)]
    pub payload: EventPayload,
}

impl Event {
    /// Build a timed event with an empty payload.
    ///
    /// A range with `end < start` is collapsed to zero duration at `start`.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end: end.max(start),
            is_all_day: false,
            kind: EventType::Default,
            payload: EventPayload::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.payload.title = Some(title.into());
        self
    }

    /// Title for display, falling back to `"(No title)"`.
    pub fn display_title(&self) -> &str {
        self.payload.title.as_deref().unwrap_or("(No title)")
    }

    /// True when the event has no extent in time.
    pub fn is_zero_duration(&self) -> bool {
        self.end <= self.start
    }
}
