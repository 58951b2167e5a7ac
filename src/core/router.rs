//! Record dispatch
//!
//! The router owns a shared registry and drives the per-record control flow:
//! resolve the channel (default fallback), reject below-threshold records,
//! run processors in order (honoring drop short-circuits), then hand the
//! record to the channel's composed handler chain. Emission is best-effort;
//! nothing in this module returns an error to the caller.

use super::config::RouterConfig;
use super::error::Result;
use super::fields::FieldMap;
use super::metrics::RouterMetrics;
use super::record::LogRecord;
use super::registry::{Registry, RegistryBuilder};
use super::severity::Severity;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

#[derive(Clone)]
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Build a router straight from configuration with builder defaults
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        Ok(Self::new(RegistryBuilder::new(config).build()?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> &RouterMetrics {
        self.registry.metrics()
    }

    /// Dispatch a prepared record. Never fails: threshold rejections and
    /// processor drops are counted, sink failures are swallowed inside the
    /// chain's failure group.
    pub fn emit(&self, mut record: LogRecord) {
        let pipeline = self.registry.pipeline(&record.channel);
        let metrics = self.registry.metrics();

        if record.severity < pipeline.threshold() {
            metrics.record_filtered();
            return;
        }

        for processor in pipeline.processors() {
            processor.process(&mut record);
            if record.is_dropped() {
                metrics.record_processor_dropped();
                return;
            }
        }

        metrics.record_emitted();
        if let Err(e) = pipeline.handler().handle(&record) {
            // Chains built by the registry end in a failure group, so this
            // only fires for hand-assembled pipelines.
            metrics.record_failure_swallowed();
            eprintln!(
                "[ROUTER ERROR] handler '{}' failed: {}",
                pipeline.handler().name(),
                e
            );
        }
    }

    /// Log a message on a channel
    pub fn log(&self, channel: &str, severity: Severity, message: impl Into<String>) {
        self.emit(LogRecord::new(channel, severity, message));
    }

    /// Log a message with caller supplied context fields
    pub fn log_with_context(
        &self,
        channel: &str,
        severity: Severity,
        message: impl Into<String>,
        context: FieldMap,
    ) {
        self.emit(LogRecord::new(channel, severity, message).with_context(context));
    }

    #[inline]
    pub fn debug(&self, channel: &str, message: impl Into<String>) {
        self.log(channel, Severity::Debug, message);
    }

    #[inline]
    pub fn info(&self, channel: &str, message: impl Into<String>) {
        self.log(channel, Severity::Info, message);
    }

    #[inline]
    pub fn warning(&self, channel: &str, message: impl Into<String>) {
        self.log(channel, Severity::Warning, message);
    }

    #[inline]
    pub fn error(&self, channel: &str, message: impl Into<String>) {
        self.log(channel, Severity::Error, message);
    }

    /// End-of-request signal: every buffering decorator flushes the
    /// request's records to its child. Safe to call more than once; a
    /// drained buffer is simply empty. Failures are swallowed.
    pub fn end_request(&self, request_id: &str) {
        for (name, handler) in self.registry.handlers() {
            self.guard(name, "finish request", || handler.finish_request(request_id));
        }
    }

    /// Flush every handler, buffered records included. Intended for process
    /// shutdown; failures are swallowed.
    pub fn flush(&self) {
        for (name, handler) in self.registry.handlers() {
            self.guard(name, "flush", || handler.flush());
        }
    }

    /// Handlers here are called outside their failure group (the registry
    /// table holds the bare decorators too), so errors and panics are
    /// contained at this level as well.
    fn guard<F>(&self, name: &str, action: &str, call: F)
    where
        F: FnOnce() -> Result<()>,
    {
        match catch_unwind(AssertUnwindSafe(call)) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.registry.metrics().record_failure_swallowed();
                eprintln!(
                    "[ROUTER ERROR] handler '{}' failed to {}: {}",
                    name, action, e
                );
            }
            Err(_) => {
                self.registry.metrics().record_failure_swallowed();
                eprintln!(
                    "[ROUTER ERROR] handler '{}' panicked during {}",
                    name, action
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::BLACKHOLE;
    use crate::handlers::test_support::{CountingHandler, FailingHandler, PanickingHandler};

    fn router(json: &str) -> (Router, Arc<CountingHandler>) {
        let sink = Arc::new(CountingHandler::new("syslog-debug"));
        let config = RouterConfig::from_json(json).unwrap();
        let mut builder = Registry::builder(config).handler("syslog-debug", sink.clone());
        for name in ["syslog-info", "syslog-warning", "syslog-error"] {
            builder = builder.handler(name, Arc::new(CountingHandler::new(name)));
        }
        (Router::new(builder.build().unwrap()), sink)
    }

    #[test]
    fn test_emit_reaches_default_pipeline() {
        let (router, sink) = router("{}");
        router.info("undeclared", "hello");
        assert_eq!(sink.handled(), 1);
        assert_eq!(router.metrics().emitted_count(), 1);
    }

    #[test]
    fn test_threshold_filters_before_processors() {
        let (router, _) = router(r#"{ "channels": { "api": "warning" } }"#);
        router.debug("api", "too quiet");
        assert_eq!(router.metrics().filtered_count(), 1);
        assert_eq!(router.metrics().emitted_count(), 0);
    }

    #[test]
    fn test_disabled_channel_produces_no_sink_io() {
        let (router, sink) = router(r#"{ "channels": { "chatter": false } }"#);
        router.error("chatter", "into the void");
        assert_eq!(sink.handled(), 0);
        assert_eq!(
            router.registry().pipeline("chatter").handler().name(),
            BLACKHOLE
        );
    }

    #[test]
    fn test_failing_sink_never_reaches_caller() {
        let config = RouterConfig::from_json(r#"{ "channels": { "api": "error" } }"#).unwrap();
        let registry = Registry::builder(config)
            .handler("syslog-error", Arc::new(FailingHandler::new("syslog-error")))
            .build()
            .unwrap();
        let router = Router::new(registry);

        // Must not panic or propagate
        router.error("api", "sink is down");
        assert_eq!(router.metrics().failures_swallowed(), 1);
    }

    #[test]
    fn test_end_request_contains_sink_panic() {
        let config =
            RouterConfig::from_json(r#"{ "channels": { "api": { "buffer": true } } }"#).unwrap();
        let registry = Registry::builder(config)
            .handler("syslog-debug", Arc::new(PanickingHandler))
            .build()
            .unwrap();
        let router = Router::new(registry);

        router.emit(LogRecord::new("api", Severity::Error, "held").with_request_id("req-1"));

        // Draining the buffer hits the panicking sink; neither call may
        // propagate to the caller.
        router.end_request("req-1");
        assert!(router.metrics().failures_swallowed() >= 1);
    }

    #[test]
    fn test_flush_contains_sink_panic() {
        let config =
            RouterConfig::from_json(r#"{ "channels": { "api": { "buffer": true } } }"#).unwrap();
        let registry = Registry::builder(config)
            .handler("syslog-debug", Arc::new(PanickingHandler))
            .build()
            .unwrap();
        let router = Router::new(registry);

        // No request id, so only flush() drains the buffer
        router.error("api", "held");
        router.flush();
        assert!(router.metrics().failures_swallowed() >= 1);
    }

    #[test]
    fn test_dropped_record_never_reaches_sink() {
        let (router, sink) = router("{}");

        let mut record = LogRecord::new("undeclared", Severity::Info, "x");
        record.mark_dropped();
        router.emit(record);

        assert_eq!(sink.handled(), 0);
        assert_eq!(router.metrics().processor_dropped_count(), 1);
        assert_eq!(router.metrics().emitted_count(), 0);
    }
}
