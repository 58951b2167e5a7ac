//! Log record structure

use super::fields::{FieldMap, FieldValue};
use super::severity::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single log event travelling through a channel pipeline.
///
/// Processors may enrich `context`/`extra` (append-only) and rewrite the
/// message; a processor may also mark the record dropped, which stops
/// dispatch before any sink is reached.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub channel: String,
    pub severity: Severity,
    pub message: String,
    pub context: FieldMap,
    pub extra: FieldMap,
    pub timestamp: DateTime<Utc>,
    /// Scopes buffered emission; records without one share a process-wide
    /// buffer key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip)]
    dropped: bool,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(channel: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            severity,
            message: Self::sanitize_message(&message.into()),
            context: FieldMap::new(),
            extra: FieldMap::new(),
            timestamp: Utc::now(),
            request_id: None,
            dropped: false,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: FieldMap) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add a processor supplied field
    pub fn add_extra<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extra.insert(key.into(), value.into());
    }

    /// Mark the record as dropped; remaining processors and all handlers
    /// are skipped.
    pub fn mark_dropped(&mut self) {
        self.dropped = true;
    }

    pub fn is_dropped(&self) -> bool {
        self.dropped
    }
}
