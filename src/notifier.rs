//! Post-navigation notification.
//!
//! After a push has gone through, every `post-push` handler is told about the
//! destination, in registration order. A handler returning
//! [`Propagation::Stop`] ends the chain for that event. The navigation itself
//! has already happened by then and is unaffected.

use crate::handlers::HandlerRegistry;
use crate::intent::{PushEvent, Propagation};
use crate::{debug_log, trace_log};

/// How far a notification got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// Handlers invoked, including the one that stopped the chain.
    pub invoked: usize,
    /// Whether a handler stopped the chain early.
    pub stopped: bool,
}

/// Fires the completion event to `post-push` handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostNavigationNotifier;

impl PostNavigationNotifier {
    pub fn notify(&self, registry: &HandlerRegistry, fragment: &str) -> NotifyOutcome {
        let handlers = registry.push_handlers();
        let mut outcome = NotifyOutcome {
            invoked: 0,
            stopped: false,
        };
        if handlers.is_empty() {
            return outcome;
        }

        debug_log!(
            "Notifying {} post-push handler(s) for '{}'",
            handlers.len(),
            fragment
        );
        let event = PushEvent::new(fragment);
        for handler in &handlers {
            outcome.invoked += 1;
            let propagation = handler.on_push(&event);
            trace_log!("Push handler '{}' → {:?}", handler.name(), propagation);
            if propagation == Propagation::Stop {
                debug_log!(
                    "Push handler '{}' stopped notification for '{}'",
                    handler.name(),
                    fragment
                );
                outcome.stopped = true;
                break;
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::push_fn;
    use std::sync::{Arc, Mutex};

    fn recorder(
        label: &'static str,
        log: &Arc<Mutex<Vec<String>>>,
        propagation: Propagation,
    ) -> impl crate::handlers::PushHandler {
        let log = log.clone();
        push_fn(move |event| {
            log.lock().unwrap().push(format!("{label}:{}", event.fragment));
            propagation
        })
    }

    #[test]
    fn test_no_handlers() {
        let outcome = PostNavigationNotifier.notify(&HandlerRegistry::new(), "/b");
        assert_eq!(
            outcome,
            NotifyOutcome {
                invoked: 0,
                stopped: false
            }
        );
    }

    #[test]
    fn test_all_handlers_fire_in_order() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_post_push(recorder("a", &log, Propagation::Continue));
        registry.on_post_push(recorder("b", &log, Propagation::Continue));

        let outcome = PostNavigationNotifier.notify(&registry, "/b");

        assert_eq!(outcome.invoked, 2);
        assert!(!outcome.stopped);
        assert_eq!(*log.lock().unwrap(), vec!["a:/b", "b:/b"]);
    }

    #[test]
    fn test_stop_skips_later_handlers() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_post_push(recorder("a", &log, Propagation::Stop));
        registry.on_post_push(recorder("b", &log, Propagation::Continue));

        let outcome = PostNavigationNotifier.notify(&registry, "/b");

        assert_eq!(outcome.invoked, 1);
        assert!(outcome.stopped);
        assert_eq!(*log.lock().unwrap(), vec!["a:/b"]);
    }

    #[test]
    fn test_stop_applies_per_event() {
        let registry = HandlerRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.on_post_push(recorder("a", &log, Propagation::Stop));
        registry.on_post_push(recorder("b", &log, Propagation::Continue));

        PostNavigationNotifier.notify(&registry, "/one");
        PostNavigationNotifier.notify(&registry, "/two");

        assert_eq!(*log.lock().unwrap(), vec!["a:/one", "a:/two"]);
    }
}
