//! Core router types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod format;
pub mod handler;
pub mod metrics;
pub mod processor;
pub mod record;
pub mod registry;
pub mod router;
pub mod severity;

pub use config::{
    ChannelOptions, ChannelSettings, FileLogConfig, FileTarget, RouterConfig, SampleRate,
    ShardConfig, SyslogConfig, SyslogProtocol,
};
pub use error::{Result, RouterError};
pub use fields::{format_fields, FieldMap, FieldValue};
pub use format::RecordFormat;
pub use handler::Handler;
pub use metrics::RouterMetrics;
pub use processor::Processor;
pub use record::LogRecord;
pub use registry::{ChannelPipeline, Registry, RegistryBuilder, BLACKHOLE};
pub use router::Router;
pub use severity::Severity;
