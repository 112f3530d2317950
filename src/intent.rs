//! Typed events passed to navigation handlers.
//!
//! - [`NavigationIntent`]: a cancellable, about-to-happen navigation, handed
//!   to `pre-pop` and `pre-push` handlers.
//! - [`PushEvent`]: the non-cancellable announcement that a push completed,
//!   handed to `post-push` handlers.
//! - [`Propagation`]: what a `post-push` handler returns to keep or stop the
//!   notification chain.
//! - [`OutgoingFragment`]: the history fragment stamped onto a native pop by
//!   the lifecycle hook.

use std::fmt;

/// A client-side location: path, query and hash.
pub type Fragment = String;

// ============================================================================
// OutgoingFragment
// ============================================================================

/// The history fragment a native pop notification is about.
///
/// For a back navigation this is the top of the history stack: the location
/// recorded when the application last pushed away from it. Browsers fire a pop on initial page load with a null state and nothing to
/// leave. That case gets its own [`InitialLoad`](Self::InitialLoad) variant so
/// it is never mistaken for a genuine (possibly empty-string) fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutgoingFragment {
    /// Top of the history stack at the time of the pop.
    Known(Fragment),
    /// Nothing recorded to leave, but the pop carried a native state.
    #[default]
    Unknown,
    /// The synthetic pop fired on initial page load.
    InitialLoad,
}

impl OutgoingFragment {
    /// The fragment, if one is known.
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(fragment) => Some(fragment.as_str()),
            _ => None,
        }
    }

    pub fn is_initial_load(&self) -> bool {
        matches!(self, Self::InitialLoad)
    }
}

// ============================================================================
// NavigationIntent
// ============================================================================

/// Which navigation direction an intent describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    /// Browser-initiated back/forward.
    PrePop,
    /// Program-initiated navigate call.
    PrePush,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrePop => f.write_str("pre-pop"),
            Self::PrePush => f.write_str("pre-push"),
        }
    }
}

/// A cancellable navigation attempt, constructed fresh for every handler call.
///
/// For [`IntentKind::PrePop`] the fragment is the top of the history stack;
/// for [`IntentKind::PrePush`] it is the destination.
///
/// ```
/// use navigator_intercept::{IntentKind, NavigationIntent};
///
/// let intent = NavigationIntent::pre_push("/checkout");
/// assert_eq!(intent.kind, IntentKind::PrePush);
/// assert_eq!(intent.fragment, "/checkout");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub kind: IntentKind,
    pub fragment: Fragment,
}

impl NavigationIntent {
    pub fn new(kind: IntentKind, fragment: impl Into<Fragment>) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
        }
    }

    pub fn pre_pop(fragment: impl Into<Fragment>) -> Self {
        Self::new(IntentKind::PrePop, fragment)
    }

    pub fn pre_push(fragment: impl Into<Fragment>) -> Self {
        Self::new(IntentKind::PrePush, fragment)
    }
}

// ============================================================================
// PushEvent / Propagation
// ============================================================================

/// Completion notice for a program-initiated navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    /// Destination the application navigated to.
    pub fragment: Fragment,
}

impl PushEvent {
    pub fn new(fragment: impl Into<Fragment>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

/// Returned by `post-push` handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    /// Keep notifying later handlers.
    #[default]
    Continue,
    /// Skip every handler registered after this one, for this event only.
    Stop,
}

impl Propagation {
    pub fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<()> for Propagation {
    fn from((): ()) -> Self {
        Self::Continue
    }
}

impl From<bool> for Propagation {
    /// `false` stops the chain, matching the "return false to skip" convention.
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Self::Continue
        } else {
            Self::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_fragment_variants() {
        let known = OutgoingFragment::Known(String::new());
        assert_eq!(known.as_known(), Some(""));
        assert!(!known.is_initial_load());

        assert_eq!(OutgoingFragment::InitialLoad.as_known(), None);
        assert!(OutgoingFragment::InitialLoad.is_initial_load());
        assert_eq!(OutgoingFragment::default(), OutgoingFragment::Unknown);
    }

    #[test]
    fn test_empty_known_fragment_is_not_initial_load() {
        assert_ne!(
            OutgoingFragment::Known(String::new()),
            OutgoingFragment::InitialLoad
        );
    }

    #[test]
    fn test_intent_constructors() {
        let pop = NavigationIntent::pre_pop("/a");
        assert_eq!(pop.kind, IntentKind::PrePop);
        assert_eq!(pop.fragment, "/a");

        let push = NavigationIntent::pre_push(String::from("/b"));
        assert_eq!(push.kind, IntentKind::PrePush);
    }

    #[test]
    fn test_intent_kind_display() {
        assert_eq!(IntentKind::PrePop.to_string(), "pre-pop");
        assert_eq!(IntentKind::PrePush.to_string(), "pre-push");
    }

    #[test]
    fn test_propagation_conversions() {
        assert_eq!(Propagation::from(()), Propagation::Continue);
        assert_eq!(Propagation::from(true), Propagation::Continue);
        assert_eq!(Propagation::from(false), Propagation::Stop);
        assert!(Propagation::Stop.is_stop());
        assert!(!Propagation::default().is_stop());
    }
}
