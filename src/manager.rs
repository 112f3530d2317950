//! The navigation manager being wrapped.
//!
//! The interceptor never routes anything itself. It decorates a
//! [`NavigationManager`] and calls through to it once a navigation has been
//! approved. Route matching, URL parsing and rendering all stay behind this
//! trait.

use crate::channel::PopEvent;
use crate::config::{NavigateOptions, StartOptions};
use crate::intent::Fragment;

/// Operations the interceptor needs from the underlying navigation manager.
///
/// # Example
///
/// ```
/// use navigator_intercept::{NavigateOptions, NavigationManager, PopEvent, StartOptions};
///
/// #[derive(Default)]
/// struct HashRouter {
///     location: String,
///     fragment: String,
/// }
///
/// impl NavigationManager for HashRouter {
///     fn start(&mut self, _options: &StartOptions) -> bool {
///         self.fragment = self.location.clone();
///         true
///     }
///
///     fn handle_pop(&mut self, _event: &PopEvent) -> bool {
///         if self.location == self.fragment {
///             return false;
///         }
///         self.fragment = self.location.clone();
///         true
///     }
///
///     fn navigate(&mut self, fragment: &str, _options: &NavigateOptions) -> bool {
///         if fragment == self.fragment {
///             return false;
///         }
///         self.fragment = fragment.to_string();
///         self.location = fragment.to_string();
///         true
///     }
///
///     fn current_fragment(&self) -> &str {
///         &self.fragment
///     }
///
///     fn location(&self) -> String {
///         self.location.clone()
///     }
///
///     fn sync_fragment(&mut self) {
///         self.fragment = self.location.clone();
///     }
/// }
/// ```
pub trait NavigationManager {
    /// Begin listening and route the initial location.
    ///
    /// Returns whether the initial location was routed.
    fn start(&mut self, options: &StartOptions) -> bool;

    /// Stop listening. Called from the interceptor's teardown.
    fn stop(&mut self) {}

    /// Normal pop handling: adopt the browser's new location and route it.
    ///
    /// Returns whether the location changed.
    fn handle_pop(&mut self, event: &PopEvent) -> bool;

    /// Normal push handling: move to `fragment` and record it in the browser.
    ///
    /// Returns whether the location changed.
    fn navigate(&mut self, fragment: &str, options: &NavigateOptions) -> bool;

    /// The fragment the manager last routed.
    ///
    /// During a pop this still names the location being left, because the
    /// manager has not yet seen the browser's change.
    fn current_fragment(&self) -> &str;

    /// The browser's actual location: path, query and hash.
    fn location(&self) -> Fragment;

    /// Adopt the browser's location as the current fragment without routing.
    ///
    /// Used before a compensating push so the manager does not treat the
    /// restore as a navigation to where it already is.
    fn sync_fragment(&mut self);

    /// Native pop notifications one compensating push will produce.
    ///
    /// Hash-change based managers see one echo per push. A manager whose pushes
    /// never fire a pop notification should return `0`.
    fn compensating_pop_echoes(&self) -> usize {
        1
    }
}
