//! Paginated event sources.
//!
//! The layout engine never sees partial results: [`fetch_all`] follows
//! continuation tokens until the source reports no more pages and only then
//! returns the concatenated list. When a caller starts a newer fetch before an
//! older one finishes, [`RequestSequencer`] drops the stale result.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::normalize::RawEvent;
use crate::week::TimeWindow;

/// One page of raw events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub items: Vec<RawEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Anything that can list raw events in a time window, one page at a time.
pub trait EventSource {
    /// Fetch the page identified by `page_token` (`None` for the first page).
    fn fetch_page(&mut self, window: &TimeWindow, page_token: Option<&str>) -> Result<EventPage>;
}

/// Fetch every page for `window` and concatenate the items.
///
/// # Errors
///
/// Propagates source errors. Returns [`SlotError::Pagination`] if the source
/// hands back a continuation token it already returned.
pub fn fetch_all<S: EventSource + ?Sized>(
    source: &mut S,
    window: &TimeWindow,
) -> Result<Vec<RawEvent>> {
    let mut items = Vec::new();
    let mut seen_tokens: HashSet<String> = HashSet::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source.fetch_page(window, token.as_deref())?;
        pages += 1;
        items.extend(page.items);

        match page.next_page_token {
            Some(next) if !next.is_empty() => {
                if !seen_tokens.insert(next.clone()) {
                    return Err(SlotError::Pagination(format!(
                        "continuation token '{}' repeated after {} pages",
                        next, pages
                    )));
                }
                token = Some(next);
            }
            _ => break,
        }
    }

    debug!("fetched {} events in {} pages", items.len(), pages);
    Ok(items)
}

/// In-memory source over pre-built pages.
///
/// Page `n` is addressed by the token of page `n - 1`. Tokens that were not
/// set explicitly are generated as `"page-<n>"`.
#[derive(Debug, Clone, Default)]
pub struct PagedSource {
    pages: Vec<EventPage>,
}

impl PagedSource {
    pub fn new(pages: Vec<EventPage>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.next_page_token = if i + 1 < count {
                    page.next_page_token.or_else(|| Some(format!("page-{}", i + 1)))
                } else {
                    None
                };
                page
            })
            .collect();
        Self { pages }
    }

    /// A source holding a single page.
    pub fn single(items: Vec<RawEvent>) -> Self {
        Self::new(vec![EventPage {
            items,
            next_page_token: None,
        }])
    }
}

impl EventSource for PagedSource {
    fn fetch_page(&mut self, _window: &TimeWindow, page_token: Option<&str>) -> Result<EventPage> {
        let index = match page_token {
            None => 0,
            Some(token) => self
                .pages
                .iter()
                .position(|p| p.next_page_token.as_deref() == Some(token))
                .map(|i| i + 1)
                .ok_or_else(|| SlotError::Source(format!("unknown page token '{}'", token)))?,
        };
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }
}

// ── Stale-result guard ──────────────────────────────────────────────────────

/// Identifies one fetch started through a [`RequestSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Keeps only the result of the most recently started request.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; any earlier ticket becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Pass `value` through if `ticket` is still current, otherwise drop it.
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!("discarding result of stale request {}", ticket.0);
            None
        }
    }
}
