//! Handler implementations: terminal sinks and decorators

pub mod buffer;
pub mod failure_group;
pub mod file;
pub mod null;
pub mod sampling;
pub mod syslog;

#[cfg(test)]
pub(crate) mod test_support;

pub use buffer::{BufferHandler, DEFAULT_BUFFER_LIMIT};
pub use failure_group::FailureGroupHandler;
pub use file::FileHandler;
pub use null::NullHandler;
pub use sampling::{SamplingHandler, SamplingMode};
pub use syslog::SyslogHandler;

// Re-export the trait alongside its implementations
pub use crate::core::Handler;
