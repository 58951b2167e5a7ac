//! # Log Channel Router
//!
//! A declarative log-routing layer: configuration builds an immutable
//! registry mapping named log channels to processor lists and composed
//! handler chains; at runtime a log call resolves its channel, enriches the
//! record, and pushes it through the chain.
//!
//! ## Features
//!
//! - **Channel Registry**: Per-channel severity, sampling and buffering,
//!   with a default pipeline for undeclared channels
//! - **Composable Handlers**: Syslog, file and null sinks wrapped by
//!   sampling, buffering and failure-isolating decorators
//! - **Shared Decorators**: Identical decorator chains are memoized and
//!   shared across channels
//! - **Best-Effort Emission**: A broken sink can never fail the request
//!   that logged
//!
//! ## Example
//!
//! ```
//! use log_channel_router::prelude::*;
//!
//! let config = RouterConfig::from_json(r#"{
//!     "channels": {
//!         "api": { "severity": "warning", "buffer": true, "sample": 10 },
//!         "chatter": false
//!     }
//! }"#).unwrap();
//!
//! let router = Router::from_config(config).unwrap();
//! router.warning("api", "slow request");
//! router.end_request("req-1");
//! ```

pub mod core;
pub mod handlers;
pub mod macros;
pub mod processors;

pub mod prelude {
    pub use crate::core::{
        ChannelPipeline, FieldMap, FieldValue, Handler, LogRecord, Processor, RecordFormat,
        Registry, RegistryBuilder, Result, Router, RouterConfig, RouterError, RouterMetrics,
        Severity,
    };
    pub use crate::handlers::{
        BufferHandler, FailureGroupHandler, FileHandler, NullHandler, SamplingHandler,
        SamplingMode,
    };
    pub use crate::processors::{
        PlaceholderProcessor, RequestMetadata, RequestMetadataProcessor, RequestMetadataProvider,
        ShardProcessor,
    };
}

pub use crate::core::{
    ChannelOptions, ChannelPipeline, ChannelSettings, FieldMap, FieldValue, Handler, LogRecord,
    Processor, RecordFormat, Registry, RegistryBuilder, Result, Router, RouterConfig, RouterError,
    RouterMetrics, SampleRate, Severity, SyslogConfig, SyslogProtocol, BLACKHOLE,
};
pub use crate::handlers::{
    BufferHandler, FailureGroupHandler, FileHandler, NullHandler, SamplingHandler, SamplingMode,
};
pub use crate::processors::{
    PlaceholderProcessor, RequestMetadata, RequestMetadataProcessor, RequestMetadataProvider,
    ShardProcessor,
};
