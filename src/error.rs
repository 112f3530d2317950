//! Outcomes of interception.
//!
//! Nothing in this crate is fatal. A refused navigation is a policy result,
//! reported through these types rather than a panic:
//!
//! - [`NavigationResult`]: what a call to
//!   [`NavigationInterceptor::navigate`](crate::NavigationInterceptor::navigate)
//!   did.
//! - [`RefusalReason`]: why a navigation did not happen. It implements
//!   [`std::error::Error`] so hosts that prefer `?` can use
//!   [`NavigationResult::into_result`].
//!
//! # Examples
//!
//! ```
//! use navigator_intercept::{NavigationResult, RefusalReason};
//!
//! let ok = NavigationResult::Success { fragment: "/b".into(), changed: true };
//! assert!(ok.is_success());
//!
//! let refused = NavigationResult::Blocked(RefusalReason::NotStarted);
//! assert_eq!(refused.to_string(), "navigation refused: interceptor not started");
//! assert!(refused.into_result().is_err());
//! ```

use crate::intent::{Fragment, IntentKind};
use std::fmt;

// ============================================================================
// RefusalReason
// ============================================================================

/// Why a navigation was not performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefusalReason {
    /// `navigate` was called before `start` (or after `stop`).
    NotStarted,

    /// The user declined a handler's confirmation message.
    Declined {
        kind: IntentKind,
        /// Destination for a push, top of the history stack for a pop.
        fragment: Fragment,
        /// The handler's message, without the confirmation suffix.
        message: String,
    },
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefusalReason::NotStarted => write!(f, "interceptor not started"),
            RefusalReason::Declined {
                kind,
                fragment,
                message,
            } => write!(f, "{} '{}' declined: {}", kind, fragment, message),
        }
    }
}

impl std::error::Error for RefusalReason {}

// ============================================================================
// NavigationResult
// ============================================================================

/// Outcome of a program-initiated navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// The gate approved and the manager was asked to navigate.
    Success {
        fragment: Fragment,
        /// Whether the manager reported an actual location change.
        changed: bool,
    },
    /// Navigation was refused; no state changed.
    Blocked(RefusalReason),
}

impl NavigationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, NavigationResult::Blocked(_))
    }

    /// The refusal reason, if navigation was blocked.
    pub fn refusal(&self) -> Option<&RefusalReason> {
        match self {
            NavigationResult::Blocked(reason) => Some(reason),
            NavigationResult::Success { .. } => None,
        }
    }

    /// Convert into a `Result` carrying the destination fragment.
    pub fn into_result(self) -> Result<Fragment, RefusalReason> {
        match self {
            NavigationResult::Success { fragment, .. } => Ok(fragment),
            NavigationResult::Blocked(reason) => Err(reason),
        }
    }
}

impl fmt::Display for NavigationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationResult::Success { fragment, .. } => write!(f, "navigated to '{}'", fragment),
            NavigationResult::Blocked(reason) => write!(f, "navigation refused: {}", reason),
        }
    }
}
