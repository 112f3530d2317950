//! Logging abstraction layer.
//!
//! The macros here forward to either the [`log`](https://docs.rs/log) or the
//! [`tracing`](https://docs.rs/tracing) crate, depending on which feature is
//! enabled. Enable at most one of the two features.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Every record is emitted under the [`LOG_TARGET`] target, so a host can turn
//! interception chatter up or down independently of its own router, e.g.
//! `RUST_LOG=navigator_intercept=trace`.
//!
//! Level conventions used by the interceptor:
//!
//! - `trace_log!`: each handler and listener invocation.
//! - `debug_log!`: gate and notifier decisions, fast paths.
//! - `info_log!`: navigations performed, pops cancelled and restored.
//! - `warn_log!`: navigation refused because the interceptor is not started.
//! - `error_log!`: the manager rejected a compensating push.
//!
//! ```ignore
//! use navigator_intercept::{trace_log, debug_log, info_log, warn_log, error_log};
//!
//! trace_log!("Invoking handler {} for {}", name, fragment);
//! debug_log!("Gate approved pre-push to {}", fragment);
//! info_log!("Pop cancelled, restoring {}", fragment);
//! warn_log!("Navigate called before start");
//! error_log!("Manager refused compensating push to {}", fragment);
//! ```

/// Target name attached to every record emitted by this crate.
pub const LOG_TARGET: &str = "navigator_intercept";

/// Emit a **trace**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!(target: $crate::logging::LOG_TARGET, $($arg)*);
    };
}

/// Emit a **debug**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!(target: $crate::logging::LOG_TARGET, $($arg)*);
    };
}

/// Emit an **info**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::info!(target: $crate::logging::LOG_TARGET, $($arg)*);
    };
}

/// Emit a **warn**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!(target: $crate::logging::LOG_TARGET, $($arg)*);
    };
}

/// Emit an **error**-level record under [`LOG_TARGET`].
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!(target: $crate::logging::LOG_TARGET, $($arg)*);
        #[cfg(feature = "log")]
        ::log::error!(target: $crate::logging::LOG_TARGET, $($arg)*);
    };
}
