//! Interceptor configuration and the option types forwarded to the manager.
//!
//! ```
//! use navigator_intercept::{InterceptorConfig, NavigateOptions, StartOptions};
//!
//! let config = InterceptorConfig::new()
//!     .history_capacity(50)
//!     .confirm_suffix("\n\nDiscard your changes?");
//! assert_eq!(config.history_capacity, 50);
//!
//! let start = StartOptions::new().push_state(true).root("/app/");
//! let nav = NavigateOptions::new().trigger(true);
//! assert!(start.push_state && nav.trigger);
//! ```

use crate::confirm::DEFAULT_CONFIRM_SUFFIX;
use crate::history::DEFAULT_HISTORY_CAPACITY;

/// Settings owned by the interceptor itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorConfig {
    /// Fragments kept on the history stack before the oldest is evicted.
    pub history_capacity: usize,
    /// Appended to every handler message shown through `confirm`.
    pub confirm_suffix: String,
}

impl InterceptorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the confirmation suffix. Pass `""` to show handler messages verbatim.
    pub fn confirm_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.confirm_suffix = suffix.into();
        self
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            confirm_suffix: DEFAULT_CONFIRM_SUFFIX.to_string(),
        }
    }
}

/// Options passed unchanged to [`NavigationManager::start`](crate::NavigationManager::start).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOptions {
    /// Use the History API rather than hash changes.
    pub push_state: bool,
    /// Application root the fragments are relative to.
    pub root: String,
    /// Do not route the initial location on start.
    pub silent: bool,
}

impl StartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_state(mut self, push_state: bool) -> Self {
        self.push_state = push_state;
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            push_state: false,
            root: "/".to_string(),
            silent: false,
        }
    }
}

/// Options passed unchanged to [`NavigationManager::navigate`](crate::NavigationManager::navigate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Run the route handler for the new fragment.
    pub trigger: bool,
    /// Replace the current browser entry instead of adding one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(mut self, trigger: bool) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}
