//! Native pop notification channel.
//!
//! The host forwards every browser pop (back, forward, hash change) to the
//! interceptor as a [`PopEvent`]. Listeners run strictly in registration
//! order, and any listener may stop propagation so that later listeners never
//! see the event.
//!
//! The interceptor installs three slots of its own when it starts (see
//! [`lifecycle`](crate::lifecycle)). Host listeners registered before `start`
//! run ahead of them; listeners registered afterwards run behind them.

use crate::intent::OutgoingFragment;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// PopEvent
// ============================================================================

/// A native pop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    /// Native history state. `None` is the null state of the initial
    /// page-load pop.
    pub state: Option<String>,
    /// History fragment, stamped by the lifecycle hook.
    pub fragment: OutgoingFragment,
    propagation_stopped: bool,
}

impl PopEvent {
    pub fn new(state: Option<String>) -> Self {
        Self {
            state,
            fragment: OutgoingFragment::Unknown,
            propagation_stopped: false,
        }
    }

    /// The pop some browsers fire when a page first loads.
    pub fn initial_load() -> Self {
        Self::new(None)
    }

    pub fn with_state(state: impl Into<String>) -> Self {
        Self::new(Some(state.into()))
    }

    /// Prevent every later listener from seeing this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

// ============================================================================
// PopListener
// ============================================================================

/// A host listener on the pop channel.
pub trait PopListener: Send + Sync + 'static {
    fn on_pop(&self, event: &mut PopEvent);

    /// Listener name for debugging.
    fn name(&self) -> &'static str {
        "PopListener"
    }
}

/// Create a pop listener from a closure.
pub const fn pop_listener_fn<F>(f: F) -> FnPopListener<F>
where
    F: Fn(&mut PopEvent) + Send + Sync + 'static,
{
    FnPopListener { f }
}

/// Pop listener created from a closure via [`pop_listener_fn`].
pub struct FnPopListener<F> {
    f: F,
}

impl<F> PopListener for FnPopListener<F>
where
    F: Fn(&mut PopEvent) + Send + Sync + 'static,
{
    fn on_pop(&self, event: &mut PopEvent) {
        (self.f)(event);
    }
}

// ============================================================================
// PopChannel
// ============================================================================

/// Token identifying a listener on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// What occupies a position in the listener list.
#[derive(Clone)]
pub(crate) enum ListenerSlot {
    /// Stamps the history fragment onto the event.
    Augment,
    /// The intercepted pop path, standing in for the manager's own listener.
    Route,
    /// Stops echoes of compensating pushes from reaching later listeners.
    Suppress,
    External(Arc<dyn PopListener>),
}

impl fmt::Debug for ListenerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerSlot::Augment => f.write_str("Augment"),
            ListenerSlot::Route => f.write_str("Route"),
            ListenerSlot::Suppress => f.write_str("Suppress"),
            ListenerSlot::External(listener) => write!(f, "External({})", listener.name()),
        }
    }
}

/// Ordered listener list.
#[derive(Debug, Default)]
pub(crate) struct PopChannel {
    listeners: Vec<(ListenerId, ListenerSlot)>,
    next_id: u64,
}

impl PopChannel {
    pub(crate) fn add(&mut self, slot: ListenerSlot) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, slot));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }

    /// Listeners in dispatch order, detached from the channel.
    pub(crate) fn snapshot(&self) -> Vec<ListenerSlot> {
        self.listeners.iter().map(|(_, slot)| slot.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}
