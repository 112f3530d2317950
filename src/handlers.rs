//! Navigation handlers and the registry that holds them.
//!
//! Handlers come in two shapes:
//!
//! | Trait | Kinds | Returns |
//! |-------|-------|---------|
//! | [`BeforeNavigationHandler`] | `pre-pop`, `pre-push` | `Some(message)` to object, `None` to allow |
//! | [`PushHandler`] | `post-push` | [`Propagation::Stop`] to end the chain |
//!
//! The [`HandlerRegistry`] is owned by the host application. It is a cheap,
//! cloneable handle: the host keeps one clone to register and remove handlers,
//! the interceptor keeps another and only ever enumerates it.
//!
//! # Execution order
//!
//! Handlers run in **registration order**. There is no priority: the first
//! registered handler is always asked first, and for before-handlers the first
//! objection the user declines ends the run.
//!
//! # Example
//!
//! ```
//! use navigator_intercept::{before_fn, push_fn, HandlerRegistry, Propagation};
//!
//! let registry = HandlerRegistry::new();
//!
//! let guard = registry.on_pre_push(before_fn(|intent| {
//!     intent.fragment.starts_with("/logout").then(|| "You have unsaved changes.".to_string())
//! }));
//! registry.on_post_push(push_fn(|event| {
//!     println!("navigated to {}", event.fragment);
//!     Propagation::Continue
//! }));
//!
//! assert!(registry.remove(guard));
//! ```

use crate::intent::{IntentKind, NavigationIntent, PushEvent, Propagation};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// ============================================================================
// BeforeNavigationHandler
// ============================================================================

/// Handler consulted before a push or pop is allowed to happen.
///
/// Return `None` for "no objection". Return `Some(message)` to ask the user to
/// confirm leaving; the message is shown through the injected
/// [`Confirm`](crate::Confirm) capability.
///
/// ```
/// use navigator_intercept::{BeforeNavigationHandler, NavigationIntent};
///
/// struct UnsavedForm {
///     dirty: bool,
/// }
///
/// impl BeforeNavigationHandler for UnsavedForm {
///     fn before_navigation(&self, _intent: &NavigationIntent) -> Option<String> {
///         self.dirty.then(|| "The form has unsaved changes.".to_string())
///     }
/// }
/// ```
pub trait BeforeNavigationHandler: Send + Sync + 'static {
    fn before_navigation(&self, intent: &NavigationIntent) -> Option<String>;

    /// Handler name for debugging.
    fn name(&self) -> &'static str {
        "BeforeNavigationHandler"
    }
}

/// Create a before-handler from a closure.
pub const fn before_fn<F>(f: F) -> FnBeforeHandler<F>
where
    F: Fn(&NavigationIntent) -> Option<String> + Send + Sync + 'static,
{
    FnBeforeHandler { f }
}

/// Before-handler created from a closure via [`before_fn`].
pub struct FnBeforeHandler<F> {
    f: F,
}

impl<F> BeforeNavigationHandler for FnBeforeHandler<F>
where
    F: Fn(&NavigationIntent) -> Option<String> + Send + Sync + 'static,
{
    fn before_navigation(&self, intent: &NavigationIntent) -> Option<String> {
        (self.f)(intent)
    }
}

// ============================================================================
// PushHandler
// ============================================================================

/// Handler notified after a program-initiated navigation completed.
pub trait PushHandler: Send + Sync + 'static {
    fn on_push(&self, event: &PushEvent) -> Propagation;

    /// Handler name for debugging.
    fn name(&self) -> &'static str {
        "PushHandler"
    }
}

/// Create a post-push handler from a closure.
pub const fn push_fn<F>(f: F) -> FnPushHandler<F>
where
    F: Fn(&PushEvent) -> Propagation + Send + Sync + 'static,
{
    FnPushHandler { f }
}

/// Post-push handler created from a closure via [`push_fn`].
pub struct FnPushHandler<F> {
    f: F,
}

impl<F> PushHandler for FnPushHandler<F>
where
    F: Fn(&PushEvent) -> Propagation + Send + Sync + 'static,
{
    fn on_push(&self, event: &PushEvent) -> Propagation {
        (self.f)(event)
    }
}

// ============================================================================
// HandlerRegistry
// ============================================================================

/// Registry slot a handler lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    PrePop,
    PrePush,
    PostPush,
}

impl From<IntentKind> for HandlerKind {
    fn from(kind: IntentKind) -> Self {
        match kind {
            IntentKind::PrePop => Self::PrePop,
            IntentKind::PrePush => Self::PrePush,
        }
    }
}

/// Opaque token returned on registration, used to remove the handler again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

type BeforeEntry = (HandlerId, Arc<dyn BeforeNavigationHandler>);
type PushEntry = (HandlerId, Arc<dyn PushHandler>);

#[derive(Default)]
struct Handlers {
    pre_pop: Vec<BeforeEntry>,
    pre_push: Vec<BeforeEntry>,
    post_push: Vec<PushEntry>,
}

/// Shared, ordered collection of handlers keyed by [`HandlerKind`].
///
/// Clones share the same underlying registry. Handlers are snapshotted before
/// they run, so a handler may register or remove handlers without deadlocking;
/// such changes take effect from the next event.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<Handlers>>,
    next_id: Arc<AtomicU64>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Handlers> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Handlers> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate_id(&self) -> HandlerId {
        HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a handler consulted before browser back/forward navigation.
    pub fn on_pre_pop(&self, handler: impl BeforeNavigationHandler) -> HandlerId {
        self.register_before(IntentKind::PrePop, Arc::new(handler))
    }

    /// Register a handler consulted before a program-initiated navigation.
    pub fn on_pre_push(&self, handler: impl BeforeNavigationHandler) -> HandlerId {
        self.register_before(IntentKind::PrePush, Arc::new(handler))
    }

    /// Register a handler notified after a program-initiated navigation.
    pub fn on_post_push(&self, handler: impl PushHandler) -> HandlerId {
        let id = self.allocate_id();
        self.write().post_push.push((id, Arc::new(handler)));
        id
    }

    /// Register an already shared before-handler under `kind`.
    pub fn register_before(
        &self,
        kind: IntentKind,
        handler: Arc<dyn BeforeNavigationHandler>,
    ) -> HandlerId {
        let id = self.allocate_id();
        let mut handlers = self.write();
        match kind {
            IntentKind::PrePop => handlers.pre_pop.push((id, handler)),
            IntentKind::PrePush => handlers.pre_push.push((id, handler)),
        }
        id
    }

    /// Remove a handler of any kind. Returns `false` if it was not registered.
    pub fn remove(&self, id: HandlerId) -> bool {
        let mut handlers = self.write();
        let before = handlers.pre_pop.len() + handlers.pre_push.len() + handlers.post_push.len();
        handlers.pre_pop.retain(|(h, _)| *h != id);
        handlers.pre_push.retain(|(h, _)| *h != id);
        handlers.post_push.retain(|(h, _)| *h != id);
        let after = handlers.pre_pop.len() + handlers.pre_push.len() + handlers.post_push.len();
        after < before
    }

    /// Remove every handler of `kind`.
    pub fn clear(&self, kind: HandlerKind) {
        let mut handlers = self.write();
        match kind {
            HandlerKind::PrePop => handlers.pre_pop.clear(),
            HandlerKind::PrePush => handlers.pre_push.clear(),
            HandlerKind::PostPush => handlers.post_push.clear(),
        }
    }

    /// Number of handlers currently registered under `kind`.
    pub fn count(&self, kind: HandlerKind) -> usize {
        let handlers = self.read();
        match kind {
            HandlerKind::PrePop => handlers.pre_pop.len(),
            HandlerKind::PrePush => handlers.pre_push.len(),
            HandlerKind::PostPush => handlers.post_push.len(),
        }
    }

    /// Snapshot of the before-handlers for `kind`, in registration order.
    pub fn before_handlers(&self, kind: IntentKind) -> Vec<Arc<dyn BeforeNavigationHandler>> {
        let handlers = self.read();
        let entries = match kind {
            IntentKind::PrePop => &handlers.pre_pop,
            IntentKind::PrePush => &handlers.pre_push,
        };
        entries.iter().map(|(_, h)| Arc::clone(h)).collect()
    }

    /// Snapshot of the post-push handlers, in registration order.
    pub fn push_handlers(&self) -> Vec<Arc<dyn PushHandler>> {
        self.read()
            .post_push
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.read();
        f.debug_struct("HandlerRegistry")
            .field("pre_pop", &handlers.pre_pop.len())
            .field("pre_push", &handlers.pre_push.len())
            .field("post_push", &handlers.post_push.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct NamedObjection;

    impl BeforeNavigationHandler for NamedObjection {
        fn before_navigation(&self, intent: &NavigationIntent) -> Option<String> {
            Some(format!("leaving {}", intent.fragment))
        }

        fn name(&self) -> &'static str {
            "NamedObjection"
        }
    }

    #[test]
    fn test_before_fn_passes_intent_through() {
        let handler = before_fn(|intent| Some(intent.fragment.clone()));
        let result = handler.before_navigation(&NavigationIntent::pre_push("/b"));
        assert_eq!(result, Some("/b".to_string()));
        assert_eq!(handler.name(), "BeforeNavigationHandler");
    }

    #[test]
    fn test_custom_handler_name() {
        assert_eq!(NamedObjection.name(), "NamedObjection");
        assert_eq!(
            NamedObjection.before_navigation(&NavigationIntent::pre_pop("/x")),
            Some("leaving /x".to_string())
        );
    }

    #[test]
    fn test_push_fn_returns_propagation() {
        let handler = push_fn(|event| Propagation::from(event.fragment != "/stop"));
        assert_eq!(handler.on_push(&PushEvent::new("/go")), Propagation::Continue);
        assert_eq!(handler.on_push(&PushEvent::new("/stop")), Propagation::Stop);
    }

    #[test]
    fn test_registry_counts_per_kind() {
        let registry = HandlerRegistry::new();
        registry.on_pre_pop(before_fn(|_| None));
        registry.on_pre_push(before_fn(|_| None));
        registry.on_pre_push(before_fn(|_| None));
        registry.on_post_push(push_fn(|_| Propagation::Continue));

        assert_eq!(registry.count(HandlerKind::PrePop), 1);
        assert_eq!(registry.count(HandlerKind::PrePush), 2);
        assert_eq!(registry.count(HandlerKind::PostPush), 1);
    }

    #[test]
    fn test_registry_preserves_registration_order() {
        let registry = HandlerRegistry::new();
        for label in ["first", "second", "third"] {
            registry.on_pre_pop(before_fn(move |_| Some(label.to_string())));
        }

        let intent = NavigationIntent::pre_pop("/a");
        let messages: Vec<_> = registry
            .before_handlers(IntentKind::PrePop)
            .iter()
            .filter_map(|h| h.before_navigation(&intent))
            .collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_by_id() {
        let registry = HandlerRegistry::new();
        let a = registry.on_pre_push(before_fn(|_| None));
        let b = registry.on_post_push(push_fn(|_| Propagation::Continue));

        assert!(registry.remove(a));
        assert!(!registry.remove(a));
        assert!(registry.remove(b));
        assert_eq!(registry.count(HandlerKind::PrePush), 0);
        assert_eq!(registry.count(HandlerKind::PostPush), 0);
    }

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let registry = HandlerRegistry::new();
        let a = registry.on_pre_pop(before_fn(|_| None));
        let b = registry.on_pre_push(before_fn(|_| None));
        let c = registry.on_post_push(push_fn(|_| Propagation::Continue));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(a.to_string(), "handler#0");
    }

    #[test]
    fn test_clones_share_handlers() {
        let host = HandlerRegistry::new();
        let interceptor_side = host.clone();
        host.on_pre_pop(before_fn(|_| None));
        assert_eq!(interceptor_side.count(HandlerKind::PrePop), 1);

        interceptor_side.clear(HandlerKind::PrePop);
        assert_eq!(host.count(HandlerKind::PrePop), 0);
    }

    #[test]
    fn test_handler_may_register_during_snapshot_iteration() {
        let registry = HandlerRegistry::new();
        let inner = registry.clone();
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        registry.on_pre_push(before_fn(move |_| {
            *calls_clone.lock().unwrap() += 1;
            inner.on_pre_push(before_fn(|_| None));
            None
        }));

        for handler in registry.before_handlers(IntentKind::PrePush) {
            handler.before_navigation(&NavigationIntent::pre_push("/a"));
        }

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(registry.count(HandlerKind::PrePush), 2);
    }

    #[test]
    fn test_debug_shows_counts() {
        let registry = HandlerRegistry::new();
        registry.on_post_push(push_fn(|_| Propagation::Continue));
        let debug = format!("{registry:?}");
        assert!(debug.contains("post_push: 1"));
    }
}
