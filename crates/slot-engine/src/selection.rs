//! Observable "current selection" of the week grid.
//!
//! A [`SelectionStore`] holds at most one selected value. The grid writes it
//! when a block is clicked; detail views subscribe and re-render on every
//! change. The store is single-threaded and cheap to clone: clones share the
//! same value and listener set.
//!
//! Listener failures never leak: a listener that returns `Err` or panics is
//! logged and skipped, the stored value stays as set, and the remaining
//! listeners are still notified.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use chrono::{DateTime, Timelike, Utc};
use log::warn;
use serde::Serialize;

use crate::event::Event;
use crate::layout::PositionedEvent;

/// Error a listener may return; it is logged and discarded.
pub type ListenerError = Box<dyn std::error::Error>;

type Listener<T> = Rc<RefCell<dyn FnMut(Option<&T>) -> Result<(), ListenerError>>>;

/// The slot a user picked in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSelection {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub day_index: usize,
    /// Local hour at which the selected block starts.
    pub hour: u32,
    pub events: Vec<Event>,
}

impl SlotSelection {
    /// Selection for a clicked block.
    pub fn from_positioned(positioned: &PositionedEvent<'_>, day_index: usize) -> Self {
        Self {
            start: positioned.clipped_start.with_timezone(&Utc),
            end: positioned.clipped_end.with_timezone(&Utc),
            day_index,
            hour: positioned.clipped_start.hour(),
            events: vec![positioned.event.clone()],
        }
    }
}

struct Inner<T> {
    current: Option<T>,
    next_id: u64,
    listeners: BTreeMap<u64, Listener<T>>,
}

/// Single-writer, many-reader observable value.
///
/// Listeners always receive the store's value at the moment they are called.
/// If a listener calls [`set`](Self::set) during a notification, the nested
/// value reaches the remaining listeners first and the outer pass then
/// delivers the same latest value again, so they never see the superseded
/// one.
pub struct SelectionStore<T = SlotSelection> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for SelectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for SelectionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SelectionStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SelectionStore")
            .field("selected", &inner.current.is_some())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T> SelectionStore<T> {
    /// An empty store with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: None,
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl<T: Clone + 'static> SelectionStore<T> {
    /// A copy of the current selection.
    pub fn get(&self) -> Option<T> {
        self.inner.borrow().current.clone()
    }

    /// Replace the selection and notify every listener with the new value.
    pub fn set(&self, selection: Option<T>) {
        self.inner.borrow_mut().current = selection;
        self.notify();
    }

    pub fn clear(&self) {
        self.set(None);
    }

    /// Attach `listener`. It is called once immediately with the current
    /// value, then on every change until the subscription is detached.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: FnMut(Option<&T>) -> Result<(), ListenerError> + 'static,
    {
        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, Rc::clone(&listener));
            id
        };
        self.deliver(id, &listener);
        Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    fn notify(&self) {
        // Snapshot so listeners may subscribe, detach, or set re-entrantly.
        let listeners: Vec<(u64, Listener<T>)> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();
        for (id, listener) in listeners {
            if self.inner.borrow().listeners.contains_key(&id) {
                self.deliver(id, &listener);
            }
        }
    }

    fn deliver(&self, id: u64, listener: &Listener<T>) {
        let Ok(mut callback) = listener.try_borrow_mut() else {
            warn!("selection listener {} is already running; skipping nested delivery", id);
            return;
        };
        // Clone out so the listener may write back to the store.
        let value = self.get();
        match catch_unwind(AssertUnwindSafe(|| (*callback)(value.as_ref()))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("selection listener {} failed: {}", id, e),
            Err(_) => warn!("selection listener {} panicked", id),
        }
    }
}

/// Handle returned by [`SelectionStore::subscribe`].
#[must_use = "dropping a Subscription keeps the listener attached; call unsubscribe() to detach"]
pub struct Subscription<T> {
    id: u64,
    store: Weak<RefCell<Inner<T>>>,
}

impl<T> Subscription<T> {
    /// Detach the listener. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.store.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        let Some(inner) = self.store.upgrade() else {
            return false;
        };
        let inner = inner.borrow();
        inner.listeners.contains_key(&self.id)
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
