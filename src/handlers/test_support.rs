//! Shared test doubles for handler unit tests

use crate::core::{Handler, LogRecord, Result, RouterError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts records without performing I/O
pub struct CountingHandler {
    handled: AtomicU64,
    flushed: AtomicU64,
    name: String,
}

impl CountingHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            handled: AtomicU64::new(0),
            flushed: AtomicU64::new(0),
            name: name.into(),
        }
    }

    pub fn handled(&self) -> u64 {
        self.handled.load(Ordering::Relaxed)
    }

    pub fn flushed(&self) -> u64 {
        self.flushed.load(Ordering::Relaxed)
    }
}

impl Handler for CountingHandler {
    fn handle(&self, _record: &LogRecord) -> Result<()> {
        self.handled.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flushed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Records messages so tests can assert on delivery order and content
pub struct CollectingHandler {
    messages: Mutex<Vec<String>>,
    name: String,
}

impl CollectingHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            name: name.into(),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Handler for CollectingHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        self.messages.lock().push(record.message.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Always fails, for failure-isolation tests
pub struct FailingHandler {
    attempts: AtomicU64,
    name: String,
}

impl FailingHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attempts: AtomicU64::new(0),
            name: name.into(),
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl Handler for FailingHandler {
    fn handle(&self, _record: &LogRecord) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(RouterError::writer("sink unreachable"))
    }

    fn flush(&self) -> Result<()> {
        Err(RouterError::writer("sink unreachable"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Panics on every record, for panic-isolation tests
pub struct PanickingHandler;

impl Handler for PanickingHandler {
    fn handle(&self, _record: &LogRecord) -> Result<()> {
        panic!("sink exploded");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}
