//! The navigation interceptor.
//!
//! [`NavigationInterceptor`] decorates a [`NavigationManager`] with
//! confirmable transitions in both directions:
//!
//! - **Push** ([`navigate`](NavigationInterceptor::navigate)): the gate is
//!   asked first; on approval the current location is recorded on the history
//!   stack, the manager navigates, and `post-push` handlers are notified.
//! - **Pop** ([`dispatch_pop`](NavigationInterceptor::dispatch_pop)): by the
//!   time the browser reports a back/forward its history pointer has already
//!   moved. If the gate cancels, the interceptor issues a *compensating push*
//!   back to where the user was and arranges for the echo of that push to be
//!   suppressed.
//!
//! # Pop state machine
//!
//! ```text
//!            pop, gate approves
//!          ┌──────────────────────┐
//!          ▼                      │
//!        Idle ────────────────────┘
//!          │  ▲
//!   pop,   │  │ echo pop suppressed
//!  cancel  │  │ (counter reaches 0)
//!          ▼  │
//!   PendingSuppression
//! ```
//!
//! While a suppression is pending, an incoming pop is treated as the echo of
//! the compensating push: no handler is consulted and nothing is pushed again.
//! A pop that leaves the browser where the manager already is (a late echo or
//! a duplicate notification) is likewise handed straight to the manager.
//!
//! # Example
//!
//! ```
//! use navigator_intercept::{
//!     before_fn, HandlerRegistry, NavigateOptions, NavigationInterceptor, NavigationManager,
//!     PopEvent, StartOptions,
//! };
//! # #[derive(Default)]
//! # struct Router { location: String, fragment: String }
//! # impl NavigationManager for Router {
//! #     fn start(&mut self, _: &StartOptions) -> bool { self.fragment = self.location.clone(); true }
//! #     fn handle_pop(&mut self, _: &PopEvent) -> bool { self.fragment = self.location.clone(); true }
//! #     fn navigate(&mut self, f: &str, _: &NavigateOptions) -> bool {
//! #         self.fragment = f.to_string(); self.location = f.to_string(); true
//! #     }
//! #     fn current_fragment(&self) -> &str { &self.fragment }
//! #     fn location(&self) -> String { self.location.clone() }
//! #     fn sync_fragment(&mut self) { self.fragment = self.location.clone(); }
//! # }
//!
//! let registry = HandlerRegistry::new();
//! registry.on_pre_push(before_fn(|_| Some("Discard the draft?".to_string())));
//!
//! let mut interceptor = NavigationInterceptor::new(Router::default(), registry, |_: &str| false);
//! interceptor.start(&StartOptions::default());
//!
//! // Nothing to protect yet: the first push takes the fast path.
//! assert!(interceptor.navigate("/draft", NavigateOptions::default()).is_success());
//! // The user declines the second.
//! assert!(interceptor.navigate("/elsewhere", NavigateOptions::default()).is_blocked());
//! ```

use crate::channel::{ListenerId, ListenerSlot, PopChannel, PopEvent, PopListener};
use crate::config::{InterceptorConfig, NavigateOptions};
use crate::confirm::{Confirm, ConfirmationGate, GateDecision};
use crate::error::{NavigationResult, RefusalReason};
use crate::handlers::HandlerRegistry;
use crate::history::HistoryStack;
use crate::intent::{Fragment, IntentKind, OutgoingFragment};
use crate::manager::NavigationManager;
use crate::notifier::PostNavigationNotifier;
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use std::sync::Arc;

// ============================================================================
// Pop outcomes
// ============================================================================

/// What the interceptor's pop path did with one native pop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopOutcome {
    /// The interceptor is not started; only host listeners saw the event.
    Ignored,
    /// Approved and handed to the manager.
    Popped {
        /// Whether the manager reported a location change.
        changed: bool,
    },
    /// Declined by the user; a compensating push restored `restored`.
    Cancelled {
        restored: Fragment,
        /// The handler's message, without the confirmation suffix.
        message: String,
    },
    /// The browser already shows the manager's fragment; handed to the manager
    /// without consulting handlers.
    Unchanged,
    /// The echo of an earlier compensating push.
    Echo,
}

impl PopOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result of dispatching one native pop through the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopReport {
    pub outcome: PopOutcome,
    /// Whether a listener stopped propagation.
    pub suppressed: bool,
    /// The history fragment stamped onto the event.
    pub fragment: OutgoingFragment,
}

// ============================================================================
// NavigationInterceptor
// ============================================================================

/// Wraps a [`NavigationManager`] with cancellable push and pop hooks.
///
/// All state (history stack, pending suppressions, listener slots) belongs to
/// the instance and is reset by [`start`](Self::start), so several
/// interceptors can coexist.
pub struct NavigationInterceptor<M> {
    pub(crate) manager: M,
    pub(crate) registry: HandlerRegistry,
    pub(crate) confirm: Box<dyn Confirm>,
    pub(crate) gate: ConfirmationGate,
    pub(crate) notifier: PostNavigationNotifier,
    pub(crate) history: HistoryStack,
    /// Echoes of compensating pushes still to be suppressed.
    pub(crate) pending_suppressions: usize,
    pub(crate) channel: PopChannel,
    /// Slots installed by `start`, removed again by `stop`.
    pub(crate) installed: Vec<ListenerId>,
    pub(crate) started: bool,
}

impl<M: NavigationManager> NavigationInterceptor<M> {
    /// Wrap `manager` using the default [`InterceptorConfig`].
    pub fn new(manager: M, registry: HandlerRegistry, confirm: impl Confirm + 'static) -> Self {
        Self::with_config(manager, registry, confirm, InterceptorConfig::default())
    }

    pub fn with_config(
        manager: M,
        registry: HandlerRegistry,
        confirm: impl Confirm + 'static,
        config: InterceptorConfig,
    ) -> Self {
        Self {
            manager,
            registry,
            confirm: Box::new(confirm),
            gate: ConfirmationGate::new(config.confirm_suffix),
            notifier: PostNavigationNotifier,
            history: HistoryStack::with_capacity(config.history_capacity),
            pending_suppressions: 0,
            channel: PopChannel::default(),
            installed: Vec::new(),
            started: false,
        }
    }

    // ========================================================================
    // Push path
    // ========================================================================

    /// Navigate to `fragment`, asking `pre-push` handlers first.
    ///
    /// Refused without any state change if the interceptor is not started or
    /// the user declines.
    pub fn navigate(&mut self, fragment: &str, options: NavigateOptions) -> NavigationResult {
        if !self.started {
            warn_log!("Navigate to '{}' refused: interceptor not started", fragment);
            return NavigationResult::Blocked(RefusalReason::NotStarted);
        }

        let decision = self.gate.run(
            &self.registry,
            IntentKind::PrePush,
            fragment,
            self.history.is_empty(),
            self.confirm.as_ref(),
        );
        if let GateDecision::Cancelled { message } = decision {
            info_log!("Push to '{}' cancelled by user", fragment);
            return NavigationResult::Blocked(RefusalReason::Declined {
                kind: IntentKind::PrePush,
                fragment: fragment.to_string(),
                message,
            });
        }

        let leaving = self.manager.location();
        info_log!("Navigation push: '{}' → '{}'", leaving, fragment);
        self.history.push(leaving);
        let changed = self.manager.navigate(fragment, &options);

        self.notifier.notify(&self.registry, fragment);

        NavigationResult::Success {
            fragment: fragment.to_string(),
            changed,
        }
    }

    // ========================================================================
    // Pop path
    // ========================================================================

    /// Deliver a native pop notification to every listener, in order.
    ///
    /// The host calls this for each browser pop, including the echoes produced
    /// by compensating pushes.
    pub fn dispatch_pop(&mut self, mut event: PopEvent) -> PopReport {
        let mut outcome = PopOutcome::Ignored;
        let mut suppressed = false;

        for slot in self.channel.snapshot() {
            match slot {
                ListenerSlot::Augment => self.augment_pop(&mut event),
                ListenerSlot::Route => outcome = self.intercept_pop(&event),
                ListenerSlot::Suppress => self.suppress_pop(&mut event, &outcome),
                ListenerSlot::External(listener) => {
                    trace_log!("Pop listener '{}'", listener.name());
                    listener.on_pop(&mut event);
                }
            }
            if event.is_propagation_stopped() {
                suppressed = true;
                break;
            }
        }

        PopReport {
            outcome,
            suppressed,
            fragment: event.fragment,
        }
    }

    /// The intercepted replacement for the manager's own pop listener.
    fn intercept_pop(&mut self, event: &PopEvent) -> PopOutcome {
        if self.pending_suppressions > 0 {
            debug_log!(
                "Pop treated as echo of compensating push ({} pending)",
                self.pending_suppressions
            );
            self.manager.handle_pop(event);
            return PopOutcome::Echo;
        }

        if self.manager.location() == self.manager.current_fragment() {
            trace_log!("Pop does not change location, skipping gate");
            self.manager.handle_pop(event);
            return PopOutcome::Unchanged;
        }

        let decision = match event.fragment.as_known() {
            Some(leaving) => self.gate.run(
                &self.registry,
                IntentKind::PrePop,
                leaving,
                self.history.is_empty(),
                self.confirm.as_ref(),
            ),
            None => {
                debug_log!("Pop without outgoing fragment ({:?})", event.fragment);
                GateDecision::Approved
            }
        };

        match decision {
            GateDecision::Approved => {
                self.history.pop();
                let changed = self.manager.handle_pop(event);
                debug_log!(
                    "Pop approved, now at '{}'",
                    self.manager.current_fragment()
                );
                PopOutcome::Popped { changed }
            }
            GateDecision::Cancelled { message } => {
                let restored = self.compensate();
                PopOutcome::Cancelled { restored, message }
            }
        }
    }

    /// Undo a pop the browser already performed.
    ///
    /// The history stack is left untouched: the user never left.
    fn compensate(&mut self) -> Fragment {
        self.pending_suppressions = self.manager.compensating_pop_echoes();
        let restore_to = self.manager.current_fragment().to_string();
        info_log!(
            "Pop cancelled, restoring '{}' from '{}'",
            restore_to,
            self.manager.location()
        );

        self.manager.sync_fragment();
        if !self.manager.navigate(&restore_to, &NavigateOptions::default()) {
            error_log!("Manager did not apply compensating push to '{}'", restore_to);
            self.pending_suppressions = 0;
        }
        restore_to
    }

    // ========================================================================
    // Host pop listeners
    // ========================================================================

    /// Add a host listener to the end of the pop channel.
    pub fn on_pop(&mut self, listener: impl PopListener) -> ListenerId {
        self.channel.add(ListenerSlot::External(Arc::new(listener)))
    }

    /// Remove a host listener. The interceptor's own slots cannot be removed.
    pub fn remove_pop_listener(&mut self, id: ListenerId) -> bool {
        if self.installed.contains(&id) {
            return false;
        }
        self.channel.remove(id)
    }

    /// Number of listeners on the pop channel, the interceptor's own included.
    pub fn pop_listener_count(&self) -> usize {
        self.channel.len()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a cancelled pop is still waiting for its echo.
    pub fn is_pop_cancelled(&self) -> bool {
        self.pending_suppressions > 0
    }

    pub fn pending_suppressions(&self) -> usize {
        self.pending_suppressions
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    /// Unwrap the manager, dropping the interceptor.
    pub fn into_manager(self) -> M {
        self.manager
    }
}

impl<M: std::fmt::Debug> std::fmt::Debug for NavigationInterceptor<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationInterceptor")
            .field("manager", &self.manager)
            .field("started", &self.started)
            .field("history", &self.history.len())
            .field("pending_suppressions", &self.pending_suppressions)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
