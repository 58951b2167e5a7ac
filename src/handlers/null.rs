//! Null sink for disabled channels

use crate::core::{Handler, LogRecord, Result};

/// Discards every record. Disabled channels route here so that `emit`
/// performs no sink I/O for them.
#[derive(Debug, Default)]
pub struct NullHandler;

impl NullHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for NullHandler {
    fn handle(&self, _record: &LogRecord) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "blackhole"
    }
}
