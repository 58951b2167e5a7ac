//! Handler trait for sinks and sink decorators

use super::{error::Result, record::LogRecord};

/// A sink or sink decorator in a channel's handler chain.
///
/// Handlers are shared behind `Arc` so that memoized decorators can wrap a
/// single child instance across channels; any internal state therefore lives
/// behind interior mutability.
pub trait Handler: Send + Sync {
    /// Deliver one record. Sinks perform I/O here; decorators forward to
    /// their children.
    fn handle(&self, record: &LogRecord) -> Result<()>;

    /// Push any pending output to the underlying destination.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// End-of-request signal. Buffering decorators flush the named request's
    /// records; everything else forwards or ignores it.
    fn finish_request(&self, _request_id: &str) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
