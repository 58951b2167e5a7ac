//! Request metadata enrichment
//!
//! Tags every record with the current request's method, URL and client IP,
//! supplied by a host-application provider (request-local storage, a task
//! local, whatever the host uses). When the provider yields a request id the
//! record adopts it unless the caller already set one, which is what scopes
//! buffered emission to the request.

use crate::core::{LogRecord, Processor};
use std::sync::Arc;

/// Request metadata as seen by the host application
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub method: String,
    pub url: String,
    pub client_ip: String,
    pub request_id: Option<String>,
}

/// Returns the metadata of the request currently being served, if any
pub type RequestMetadataProvider = Arc<dyn Fn() -> Option<RequestMetadata> + Send + Sync>;

pub struct RequestMetadataProcessor {
    provider: RequestMetadataProvider,
}

impl RequestMetadataProcessor {
    pub fn new(provider: RequestMetadataProvider) -> Self {
        Self { provider }
    }

    /// A processor that never finds request metadata (CLI contexts)
    pub fn detached() -> Self {
        Self {
            provider: Arc::new(|| None),
        }
    }
}

impl Processor for RequestMetadataProcessor {
    fn process(&self, record: &mut LogRecord) {
        let Some(meta) = (self.provider)() else {
            return;
        };

        record.add_extra("http_method", meta.method.as_str());
        record.add_extra("url", meta.url.as_str());
        record.add_extra("ip", meta.client_ip.as_str());

        if record.request_id.is_none() {
            record.request_id = meta.request_id;
        }
    }

    fn name(&self) -> &str {
        "request_meta"
    }
}
