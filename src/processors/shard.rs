//! Site and shard tagging
//!
//! Tags every record with the current site name and the shard (database
//! section) it lives on, so collector-side queries can group by either.
//! Unmapped sites get the configured default shard label.

use crate::core::{LogRecord, Processor, ShardConfig};
use std::collections::BTreeMap;

pub struct ShardProcessor {
    site: Option<String>,
    sections: BTreeMap<String, String>,
    default_section: String,
}

impl ShardProcessor {
    pub fn new(config: &ShardConfig) -> Self {
        Self {
            site: config.site.clone(),
            sections: config.sections.clone(),
            default_section: config.default_section.clone(),
        }
    }

    fn shard(&self) -> &str {
        self.site
            .as_ref()
            .and_then(|site| self.sections.get(site))
            .unwrap_or(&self.default_section)
    }
}

impl Processor for ShardProcessor {
    fn process(&self, record: &mut LogRecord) {
        if let Some(site) = &self.site {
            record.add_extra("site", site.as_str());
        }
        record.add_extra("shard", self.shard());
    }

    fn name(&self) -> &str {
        "shard"
    }
}
