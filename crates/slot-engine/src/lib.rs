//! # slot-engine
//!
//! Deterministic week-grid layout for calendar events.
//!
//! Given a list of time-ranged events, a 7-day week, and the measured pixel
//! height of a day column, the engine produces for every day a list of
//! positioned blocks: vertical placement from time of day, and horizontal
//! columns so that overlapping events sit side by side.
//!
//! ## Modules
//!
//! - [`normalize`] — Raw calendar records → [`Event`]s (all-day handling, zones, filtering)
//! - [`week`] — Week start, seven local [`DayWindow`]s, fetch bounds
//! - [`layout`] — Day clipping, pixel placement, greedy column packing
//! - [`selection`] — Observable current-slot selection with listener fan-out
//! - [`source`] — Paginated event sources and stale-request guarding
//! - [`config`] — Layout configuration
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod normalize;
pub mod selection;
pub mod source;
pub mod week;

pub use config::LayoutConfig;
pub use error::SlotError;
pub use event::{Event, EventPayload, EventType};
pub use layout::{
    layout_day, layout_week, minutes_from_midnight, overlap_column_counts, pack_columns,
    BlockGeometry, DayLayout, DayMetrics, PositionedEvent, WeekLayout,
};
pub use normalize::{normalize_event, normalize_events, NormalizeOptions, RawDateTime, RawEvent};
pub use selection::{ListenerError, SelectionStore, SlotSelection, Subscription};
pub use source::{fetch_all, EventPage, EventSource, PagedSource, RequestSequencer, RequestTicket};
pub use week::{week_start_for, DayWindow, TimeWindow, Week, WeekStartDay};
