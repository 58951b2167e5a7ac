//! Message placeholder interpolation
//!
//! Replaces `{key}` placeholders in the message with the matching context
//! field, PSR-3 style. Unknown placeholders are left intact so a malformed
//! log call still produces a readable message.

use crate::core::{LogRecord, Processor};

#[derive(Debug, Default)]
pub struct PlaceholderProcessor;

impl PlaceholderProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Processor for PlaceholderProcessor {
    fn process(&self, record: &mut LogRecord) {
        if !record.message.contains('{') || record.context.is_empty() {
            return;
        }

        let mut message = record.message.clone();
        for (key, value) in &record.context {
            let placeholder = format!("{{{}}}", key);
            if message.contains(&placeholder) {
                message = message.replace(&placeholder, &value.to_string());
            }
        }
        record.message = message;
    }

    fn name(&self) -> &str {
        "placeholder"
    }
}
