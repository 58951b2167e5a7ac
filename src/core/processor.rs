//! Processor trait for record enrichment

use super::record::LogRecord;

/// Pure enrichment applied to a record before handler dispatch.
///
/// Processors run in declaration order. They append to `context`/`extra`,
/// may rewrite the message, and may mark the record dropped to short-circuit
/// dispatch; they never perform I/O.
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
    fn name(&self) -> &str;
}
