//! In-process observer: typed publishers with synchronous delivery.
//!
//! A publisher holds an ordered list of subscriber callbacks and invokes
//! them in registration order when fired. Delivery is synchronous and
//! single-threaded; there is no backpressure and no async hop. Payloads
//! carry everything a handler needs (post-rise geometry included) so
//! handlers never have to query the board mid-tick.

use std::fmt;

/// Ordered list of subscribers for one event type.
pub struct Event<T> {
    subscribers: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Subscribers are invoked in registration order.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    /// Deliver `payload` to every subscriber, synchronously, in order.
    pub fn fire(&mut self, payload: &T) {
        for subscriber in &mut self.subscribers {
            subscriber(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Fired every tick the board rose (even when no whole row shifted).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseEvent {
    /// Fractional rise progress after this tick's normalization.
    pub rise_offset: f64,
    /// Highest currently-playable row given the new rise progress.
    pub top_row: usize,
}

/// Fired once per injected row, immediately after the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEvent {
    /// Highest currently-playable row at the moment of the shift.
    pub top_row: usize,
}

/// Fired when a row shift pushed a non-empty top row off the board.
/// Game-over policy belongs to the driver; the core only signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopoutEvent;

/// One cleared panel within a combo report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboPanel {
    pub row: usize,
    pub col: usize,
    /// Total panels cleared by this match.
    pub combo_size: u32,
    /// Position within the cascade; 1 for a plain combo, 2+ while chaining.
    pub chain_index: u32,
}

/// A match-clear report from the external match logic. The first panel
/// carries the combo-wide size and chain index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboEvent {
    pub panels: Vec<ComboPanel>,
}

impl ComboEvent {
    pub fn first(&self) -> Option<&ComboPanel> {
        self.panels.first()
    }

    /// Shorthand for a single-value report, used by tests and simple
    /// match-logic integrations.
    pub fn of_size(combo_size: u32, chain_index: u32) -> Self {
        Self {
            panels: vec![ComboPanel {
                row: 0,
                col: 0,
                combo_size,
                chain_index,
            }],
        }
    }
}
