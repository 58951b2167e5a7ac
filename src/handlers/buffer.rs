//! Buffering decorator
//!
//! Collects records during a request lifecycle and forwards them to the
//! child handler when the request finishes. Buffers are keyed by the
//! record's request id so concurrent requests never interleave; records
//! without a request id share a process-wide key. A buffer that grows past
//! the overflow limit is flushed early.

use crate::core::{Handler, LogRecord, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Buffer key for records that carry no request id
const PROCESS_SCOPE: &str = "::process";

/// Default per-request record limit before an early flush
pub const DEFAULT_BUFFER_LIMIT: usize = 1000;

pub struct BufferHandler {
    inner: Arc<dyn Handler>,
    buffers: Mutex<HashMap<String, Vec<LogRecord>>>,
    /// Serializes batch delivery so concurrently finishing requests reach
    /// the child as contiguous batches. Never held together with `buffers`.
    delivery: Mutex<()>,
    limit: usize,
    name: String,
}

impl BufferHandler {
    pub fn new(inner: Arc<dyn Handler>, limit: usize) -> Self {
        let name = format!("{}-buffered", inner.name());
        Self {
            inner,
            buffers: Mutex::new(HashMap::new()),
            delivery: Mutex::new(()),
            limit: limit.max(1),
            name,
        }
    }

    /// Forward a drained batch, remembering the first error but delivering
    /// the rest of the batch regardless.
    fn forward(&self, records: Vec<LogRecord>) -> Result<()> {
        let _delivery = self.delivery.lock();
        let mut first_error = None;
        for record in &records {
            if let Err(e) = self.inner.handle(record) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn drain(&self, key: &str) -> Option<Vec<LogRecord>> {
        self.buffers.lock().remove(key)
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.buffers.lock().values().map(Vec::len).sum()
    }
}

impl Handler for BufferHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        let key = record
            .request_id
            .as_deref()
            .unwrap_or(PROCESS_SCOPE)
            .to_string();

        let overflow = {
            let mut buffers = self.buffers.lock();
            let buffer = buffers.entry(key.clone()).or_default();
            buffer.push(record.clone());
            buffer.len() >= self.limit
        };

        if overflow {
            if let Some(records) = self.drain(&key) {
                return self.forward(records);
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Drain everything, process-wide key included
        let drained: Vec<Vec<LogRecord>> = {
            let mut buffers = self.buffers.lock();
            buffers.drain().map(|(_, records)| records).collect()
        };

        let mut first_error = None;
        for records in drained {
            if let Err(e) = self.forward(records) {
                first_error.get_or_insert(e);
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }
        self.inner.flush()
    }

    fn finish_request(&self, request_id: &str) -> Result<()> {
        if let Some(records) = self.drain(request_id) {
            self.forward(records)?;
        }
        self.inner.finish_request(request_id)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
