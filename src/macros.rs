//! Logging macros for ergonomic channel log calls.
//!
//! These macros provide a convenient interface for emitting on a channel
//! with automatic string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use log_channel_router::prelude::*;
//! use log_channel_router::{info, warning};
//!
//! let router = Router::from_config(RouterConfig::default()).unwrap();
//!
//! // Basic logging
//! info!(router, "api", "request served");
//!
//! // With format arguments
//! let duration_ms = 87;
//! warning!(router, "api", "slow request: {}ms", duration_ms);
//! ```

/// Emit a message on a channel with automatic formatting.
///
/// # Examples
///
/// ```
/// # use log_channel_router::prelude::*;
/// # let router = Router::from_config(RouterConfig::default()).unwrap();
/// use log_channel_router::emit;
/// emit!(router, "api", Severity::Info, "simple message");
/// emit!(router, "api", Severity::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! emit {
    ($router:expr, $channel:expr, $severity:expr, $($arg:tt)+) => {
        $router.log($channel, $severity, format!($($arg)+))
    };
}

/// Emit a debug-level message on a channel.
#[macro_export]
macro_rules! debug {
    ($router:expr, $channel:expr, $($arg:tt)+) => {
        $crate::emit!($router, $channel, $crate::Severity::Debug, $($arg)+)
    };
}

/// Emit an info-level message on a channel.
#[macro_export]
macro_rules! info {
    ($router:expr, $channel:expr, $($arg:tt)+) => {
        $crate::emit!($router, $channel, $crate::Severity::Info, $($arg)+)
    };
}

/// Emit a warning-level message on a channel.
#[macro_export]
macro_rules! warning {
    ($router:expr, $channel:expr, $($arg:tt)+) => {
        $crate::emit!($router, $channel, $crate::Severity::Warning, $($arg)+)
    };
}

/// Emit an error-level message on a channel.
#[macro_export]
macro_rules! error {
    ($router:expr, $channel:expr, $($arg:tt)+) => {
        $crate::emit!($router, $channel, $crate::Severity::Error, $($arg)+)
    };
}
