//! Cancellable, user-confirmable transitions for single-page navigation.
//!
//! `navigator-intercept` wraps an existing navigation manager so that both
//! program-initiated pushes and browser-initiated back/forward pops can be
//! vetoed, the way a page-unload prompt guards a full page change.
//!
//! # Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`NavigationInterceptor`] | Wraps a [`NavigationManager`]; push path, pop path, compensating push |
//! | [`HandlerRegistry`] | Host-owned `pre-pop`, `pre-push` and `post-push` handlers |
//! | [`ConfirmationGate`] | Runs before-handlers and the injected [`Confirm`] prompt |
//! | [`PostNavigationNotifier`] | Announces completed pushes, stoppable per event |
//! | [`HistoryStack`] | Bounded record of fragments navigated away from |
//!
//! # Flow
//!
//! ```text
//! navigate(fragment) ─► gate(pre-push) ─► history.push(location) ─► manager.navigate ─► post-push
//!                              └─ declined ─► Blocked
//!
//! dispatch_pop(event) ─► augment ─► gate(pre-pop) ─► history.pop ─► manager.handle_pop
//!                                        └─ declined ─► compensating push ─► suppress echo
//! ```
//!
//! # Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `log` | yes | log through the `log` crate |
//! | `tracing` | no | log through the `tracing` crate |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod channel;
pub mod config;
pub mod confirm;
pub mod error;
pub mod handlers;
pub mod history;
pub mod intent;
pub mod interceptor;
pub mod lifecycle;
pub mod logging;
pub mod manager;
pub mod notifier;

pub use channel::{pop_listener_fn, FnPopListener, ListenerId, PopEvent, PopListener};
pub use config::{InterceptorConfig, NavigateOptions, StartOptions};
pub use confirm::{Confirm, ConfirmationGate, GateDecision, DEFAULT_CONFIRM_SUFFIX};
pub use error::{NavigationResult, RefusalReason};
pub use handlers::{
    before_fn, push_fn, BeforeNavigationHandler, FnBeforeHandler, FnPushHandler, HandlerId,
    HandlerKind, HandlerRegistry, PushHandler,
};
pub use history::{HistoryStack, DEFAULT_HISTORY_CAPACITY};
pub use intent::{Fragment, IntentKind, NavigationIntent, OutgoingFragment, Propagation, PushEvent};
pub use interceptor::{NavigationInterceptor, PopOutcome, PopReport};
pub use manager::NavigationManager;
pub use notifier::{NotifyOutcome, PostNavigationNotifier};
