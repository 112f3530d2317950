//! The confirmation gate: ask before-handlers, then ask the user.
//!
//! The gate is the only place where a navigation can be vetoed. It runs the
//! registered before-handlers for one [`IntentKind`] in registration order.
//! A handler that returns a message triggers a blocking [`Confirm`] call; the
//! first message the user declines stops the run and cancels navigation.
//!
//! # Fast path
//!
//! Nothing is invoked, and navigation is approved, when either
//!
//! - no handlers are registered for the kind, or
//! - the history stack is empty (there is no earlier location to protect).

use crate::handlers::HandlerRegistry;
use crate::intent::{IntentKind, NavigationIntent};
use crate::{debug_log, trace_log};

/// Text appended to every handler message before it is shown to the user.
pub const DEFAULT_CONFIRM_SUFFIX: &str = "\n\nAre you sure you want to leave this page?";

// ============================================================================
// Confirm capability
// ============================================================================

/// Blocking yes/no prompt supplied by the host.
///
/// Return `true` to proceed with the navigation, `false` to stay.
/// Any `Fn(&str) -> bool` closure implements this trait.
///
/// ```
/// use navigator_intercept::Confirm;
///
/// let always_stay = |_message: &str| false;
/// assert!(!always_stay.confirm("Leave?"));
/// ```
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

// ============================================================================
// GateDecision
// ============================================================================

/// Outcome of running the gate for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Navigation may proceed.
    Approved,
    /// The user declined the message produced by a handler.
    Cancelled {
        /// The handler's message, without the confirmation suffix.
        message: String,
    },
}

impl GateDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

// ============================================================================
// ConfirmationGate
// ============================================================================

/// Runs before-handlers and the [`Confirm`] prompt.
#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    suffix: String,
}

impl ConfirmationGate {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Decide whether a navigation of `kind` touching `fragment` may proceed.
    ///
    /// `history_empty` enables the fast path described in the module docs.
    pub fn run(
        &self,
        registry: &HandlerRegistry,
        kind: IntentKind,
        fragment: &str,
        history_empty: bool,
        confirm: &dyn Confirm,
    ) -> GateDecision {
        if history_empty {
            debug_log!("Gate fast path for {} '{}': no history", kind, fragment);
            return GateDecision::Approved;
        }

        let handlers = registry.before_handlers(kind);
        if handlers.is_empty() {
            debug_log!("Gate fast path for {} '{}': no handlers", kind, fragment);
            return GateDecision::Approved;
        }

        debug_log!(
            "Running {} {} handler(s) for '{}'",
            handlers.len(),
            kind,
            fragment
        );
        for handler in &handlers {
            let intent = NavigationIntent::new(kind, fragment);
            let message = handler.before_navigation(&intent);
            trace_log!("Handler '{}' → {:?}", handler.name(), message);

            let Some(message) = message.filter(|m| !m.is_empty()) else {
                continue;
            };
            let prompt = format!("{}{}", message, self.suffix);
            if !confirm.confirm(&prompt) {
                debug_log!(
                    "User declined {} to '{}' raised by '{}'",
                    kind,
                    fragment,
                    handler.name()
                );
                return GateDecision::Cancelled { message };
            }
        }

        GateDecision::Approved
    }
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_SUFFIX)
    }
}
