//! Record formatting for sink output
//!
//! Two formats are used by the built-in sinks:
//! - `Line`: human-readable single line for local debug files
//! - `Logstash`: JSON event for the remote collector

use super::error::Result;
use super::fields::format_fields;
use super::record::LogRecord;
use chrono::SecondsFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFormat {
    /// `[2025-01-08 10:30:45.123] [warning] [api] message | k=v`
    Line,

    /// Logstash style JSON event with `@timestamp`, `type`, `host`,
    /// `channel`, `level`, `message` and flattened context/extra fields.
    Logstash { tag: String, hostname: String },
}

impl RecordFormat {
    pub fn format(&self, record: &LogRecord) -> Result<String> {
        match self {
            RecordFormat::Line => Ok(Self::format_line(record)),
            RecordFormat::Logstash { tag, hostname } => Self::format_logstash(record, tag, hostname),
        }
    }

    fn format_line(record: &LogRecord) -> String {
        let mut output = format!(
            "[{}] [{}] [{}] {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.severity.to_str(),
            record.channel,
            record.message
        );

        if !record.context.is_empty() {
            output.push_str(" | ");
            output.push_str(&format_fields(&record.context));
        }
        if !record.extra.is_empty() {
            output.push_str(" | ");
            output.push_str(&format_fields(&record.extra));
        }

        output
    }

    fn format_logstash(record: &LogRecord, tag: &str, hostname: &str) -> Result<String> {
        let mut event = serde_json::Map::new();

        event.insert(
            "@timestamp".to_string(),
            serde_json::Value::String(
                record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        event.insert(
            "type".to_string(),
            serde_json::Value::String(tag.to_string()),
        );
        event.insert(
            "host".to_string(),
            serde_json::Value::String(hostname.to_string()),
        );
        event.insert(
            "channel".to_string(),
            serde_json::Value::String(record.channel.clone()),
        );
        event.insert(
            "level".to_string(),
            serde_json::Value::String(record.severity.to_str().to_string()),
        );
        event.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );
        if let Some(ref request_id) = record.request_id {
            event.insert(
                "request_id".to_string(),
                serde_json::Value::String(request_id.clone()),
            );
        }

        // Flatten context and extra into the event; extra wins on key clashes
        // since it is produced by trusted processors.
        for (key, value) in &record.context {
            event.insert(key.clone(), value.to_json_value());
        }
        for (key, value) in &record.extra {
            event.insert(key.clone(), value.to_json_value());
        }

        Ok(serde_json::to_string(&serde_json::Value::Object(event))?)
    }
}
