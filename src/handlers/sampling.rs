//! Sampling decorator
//!
//! Forwards one in N records to its child handler. Instances are memoized by
//! the registry builder, so channels configured with the same (child, rate)
//! pair share a single decorator and its gate state.

use crate::core::{Handler, LogRecord, Result, RouterError, RouterMetrics};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How the 1-in-N gate decides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// Atomic counter; the first record is forwarded, then every Nth.
    /// Deterministic, which keeps buffered flush volumes predictable.
    #[default]
    Deterministic,
    /// Forward with probability 1/N, independent per record.
    Probabilistic,
}

enum Gate {
    Counter(AtomicU64),
    Random,
}

pub struct SamplingHandler {
    inner: Arc<dyn Handler>,
    rate: u64,
    gate: Gate,
    metrics: Arc<RouterMetrics>,
    name: String,
}

impl SamplingHandler {
    pub fn new(
        inner: Arc<dyn Handler>,
        rate: u64,
        mode: SamplingMode,
        metrics: Arc<RouterMetrics>,
    ) -> Result<Self> {
        if rate < 2 {
            return Err(RouterError::config(
                "SamplingHandler",
                format!("sample rate must be >= 2, got {}", rate),
            ));
        }

        let name = format!("{}-sampled-{}", inner.name(), rate);
        Ok(Self {
            inner,
            rate,
            gate: match mode {
                SamplingMode::Deterministic => Gate::Counter(AtomicU64::new(0)),
                SamplingMode::Probabilistic => Gate::Random,
            },
            metrics,
            name,
        })
    }

    pub fn rate(&self) -> u64 {
        self.rate
    }

    fn passes(&self) -> bool {
        match &self.gate {
            Gate::Counter(counter) => {
                let seen = counter.fetch_add(1, Ordering::Relaxed);
                seen % self.rate == 0
            }
            Gate::Random => rand::Rng::gen_range(&mut rand::thread_rng(), 0..self.rate) == 0,
        }
    }
}

impl Handler for SamplingHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        if self.passes() {
            self.inner.handle(record)
        } else {
            self.metrics.record_sampled_out();
            Ok(())
        }
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn finish_request(&self, request_id: &str) -> Result<()> {
        self.inner.finish_request(request_id)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use crate::handlers::test_support::CountingHandler;

    fn record() -> LogRecord {
        LogRecord::new("api", Severity::Info, "msg")
    }

    #[test]
    fn test_rate_validation() {
        let metrics = Arc::new(RouterMetrics::new());
        let sink = Arc::new(CountingHandler::new("sink"));
        assert!(
            SamplingHandler::new(sink.clone(), 1, SamplingMode::Deterministic, metrics.clone())
                .is_err()
        );
        assert!(SamplingHandler::new(sink, 0, SamplingMode::Deterministic, metrics).is_err());
    }

    #[test]
    fn test_deterministic_one_in_n() {
        let metrics = Arc::new(RouterMetrics::new());
        let sink = Arc::new(CountingHandler::new("sink"));
        let sampler = SamplingHandler::new(
            sink.clone(),
            10,
            SamplingMode::Deterministic,
            metrics.clone(),
        )
        .unwrap();

        for _ in 0..100 {
            sampler.handle(&record()).unwrap();
        }

        assert_eq!(sink.handled(), 10);
        assert_eq!(metrics.sampled_out_count(), 90);
    }

    #[test]
    fn test_first_record_is_forwarded() {
        let metrics = Arc::new(RouterMetrics::new());
        let sink = Arc::new(CountingHandler::new("sink"));
        let sampler =
            SamplingHandler::new(sink.clone(), 1000, SamplingMode::Deterministic, metrics).unwrap();

        sampler.handle(&record()).unwrap();
        assert_eq!(sink.handled(), 1);
    }

    #[test]
    fn test_probabilistic_statistical_rate() {
        let metrics = Arc::new(RouterMetrics::new());
        let sink = Arc::new(CountingHandler::new("sink"));
        let sampler =
            SamplingHandler::new(sink.clone(), 2, SamplingMode::Probabilistic, metrics).unwrap();

        let total = 10_000;
        for _ in 0..total {
            sampler.handle(&record()).unwrap();
        }

        // ~50% with tolerance
        let forwarded = sink.handled() as f64 / total as f64;
        assert!(
            (0.45..=0.55).contains(&forwarded),
            "Expected ~50% forwarded, got {}%",
            forwarded * 100.0
        );
    }

    #[test]
    fn test_decorator_name() {
        let metrics = Arc::new(RouterMetrics::new());
        let sink = Arc::new(CountingHandler::new("syslog-warning"));
        let sampler =
            SamplingHandler::new(sink, 10, SamplingMode::Deterministic, metrics).unwrap();
        assert_eq!(sampler.name(), "syslog-warning-sampled-10");
    }
}
