//! Failure-isolating fan-out group
//!
//! The outermost decorator of every enabled channel chain. Forwards each
//! record to all children and swallows anything that goes wrong, including
//! panics, so a broken sink can never abort the request that logged. The
//! first failure emits a one-shot stderr diagnostic; after that failures are
//! only counted.

use crate::core::{Handler, LogRecord, Result, RouterError, RouterMetrics};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct FailureGroupHandler {
    children: Vec<Arc<dyn Handler>>,
    metrics: Arc<RouterMetrics>,
    warned: AtomicBool,
    name: String,
}

impl FailureGroupHandler {
    pub fn new(children: Vec<Arc<dyn Handler>>, metrics: Arc<RouterMetrics>) -> Self {
        let name = std::iter::once("failuregroup".to_string())
            .chain(children.iter().map(|c| c.name().to_string()))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            children,
            metrics,
            warned: AtomicBool::new(false),
            name,
        }
    }

    fn swallow(&self, child: &str, error: &RouterError) {
        self.metrics.record_failure_swallowed();
        if !self.warned.swap(true, Ordering::Relaxed) {
            eprintln!(
                "[ROUTER ERROR] handler '{}' failed: {} (further failures suppressed)",
                child, error
            );
        }
    }

    fn swallow_panic(&self, child: &str, panic_info: Box<dyn std::any::Any + Send>) {
        self.metrics.record_failure_swallowed();
        if !self.warned.swap(true, Ordering::Relaxed) {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[ROUTER ERROR] handler '{}' panicked: {} (further failures suppressed)",
                child, panic_msg
            );
        }
    }

    fn isolate<F>(&self, child: &Arc<dyn Handler>, call: F)
    where
        F: FnOnce(&Arc<dyn Handler>) -> Result<()>,
    {
        match catch_unwind(AssertUnwindSafe(|| call(child))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.swallow(child.name(), &e),
            Err(panic_info) => self.swallow_panic(child.name(), panic_info),
        }
    }
}

impl Handler for FailureGroupHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        for child in &self.children {
            self.isolate(child, |c| c.handle(record));
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        for child in &self.children {
            self.isolate(child, |c| c.flush());
        }
        Ok(())
    }

    fn finish_request(&self, request_id: &str) -> Result<()> {
        for child in &self.children {
            self.isolate(child, |c| c.finish_request(request_id));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::handlers::test_support::{CountingHandler, FailingHandler, PanickingHandler};

    fn record() -> LogRecord {
        LogRecord::new("api", Severity::Error, "boom")
    }

    #[test]
    fn test_errors_never_propagate() {
        let metrics = Arc::new(RouterMetrics::new());
        let failing = Arc::new(FailingHandler::new("broken"));
        let group = FailureGroupHandler::new(vec![failing.clone()], metrics.clone());

        for _ in 0..10 {
            assert!(group.handle(&record()).is_ok());
        }
        assert_eq!(failing.attempts(), 10);
        assert_eq!(metrics.failures_swallowed(), 10);
    }

    #[test]
    fn test_panics_are_contained() {
        let metrics = Arc::new(RouterMetrics::new());
        let group =
            FailureGroupHandler::new(vec![Arc::new(PanickingHandler)], metrics.clone());

        assert!(group.handle(&record()).is_ok());
        assert_eq!(metrics.failures_swallowed(), 1);
    }

    #[test]
    fn test_healthy_children_still_receive_records() {
        let metrics = Arc::new(RouterMetrics::new());
        let healthy = Arc::new(CountingHandler::new("healthy"));
        let group = FailureGroupHandler::new(
            vec![Arc::new(FailingHandler::new("broken")), healthy.clone()],
            metrics,
        );

        group.handle(&record()).unwrap();
        assert_eq!(healthy.handled(), 1);
    }

    #[test]
    fn test_group_name() {
        let metrics = Arc::new(RouterMetrics::new());
        let group = FailureGroupHandler::new(
            vec![
                Arc::new(CountingHandler::new("syslog-warning")),
                Arc::new(CountingHandler::new("file:api.log")),
            ],
            metrics,
        );
        assert_eq!(group.name(), "failuregroup|syslog-warning|file:api.log");
    }

    #[test]
    fn test_flush_and_finish_are_isolated() {
        let metrics = Arc::new(RouterMetrics::new());
        let group = FailureGroupHandler::new(
            vec![Arc::new(FailingHandler::new("broken"))],
            metrics.clone(),
        );

        assert!(group.flush().is_ok());
        assert!(group.finish_request("req-1").is_ok());
        assert_eq!(metrics.failures_swallowed(), 1); // finish_request default is Ok
    }
}
