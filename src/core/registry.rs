//! Channel registry and registry builder
//!
//! The registry is built once from [`RouterConfig`] and read-only afterwards:
//! a mapping from channel name to its pipeline (ordered processors plus one
//! composed handler chain), a default pipeline for undeclared channels, and
//! the name-to-instance handler table the chains were resolved from.
//!
//! Chains compose outermost-first as
//! `failuregroup -> buffered -> sampled -> sink`. Decorators are memoized by
//! name (`syslog-warning-sampled-10`, `syslog-warning-buffered`, ...) so
//! channels with identical wrapping share one decorator instance.

use super::config::RouterConfig;
use super::error::{Result, RouterError};
use super::handler::Handler;
use super::metrics::RouterMetrics;
use super::processor::Processor;
use super::severity::Severity;
use crate::handlers::{
    BufferHandler, FailureGroupHandler, FileHandler, NullHandler, SamplingHandler, SamplingMode,
    DEFAULT_BUFFER_LIMIT,
};
use crate::processors::{
    PlaceholderProcessor, RequestMetadataProcessor, RequestMetadataProvider, ShardProcessor,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Handler name the null sink is registered under
pub const BLACKHOLE: &str = "blackhole";

/// One channel's resolved routing: processors in declaration order, the
/// composed handler chain, and the severity below which records are not
/// dispatched at all.
pub struct ChannelPipeline {
    processors: Vec<Arc<dyn Processor>>,
    handler: Arc<dyn Handler>,
    threshold: Severity,
}

impl ChannelPipeline {
    pub fn processors(&self) -> &[Arc<dyn Processor>] {
        &self.processors
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }
}

/// Immutable channel-to-pipeline mapping, safe to share across threads
pub struct Registry {
    channels: HashMap<String, ChannelPipeline>,
    default_pipeline: ChannelPipeline,
    handlers: HashMap<String, Arc<dyn Handler>>,
    metrics: Arc<RouterMetrics>,
}

impl Registry {
    pub fn builder(config: RouterConfig) -> RegistryBuilder {
        RegistryBuilder::new(config)
    }

    /// Resolve a channel, falling back to the default pipeline for channels
    /// the configuration never declared.
    pub fn pipeline(&self, channel: &str) -> &ChannelPipeline {
        self.channels.get(channel).unwrap_or(&self.default_pipeline)
    }

    /// Look up a handler instance by name
    pub fn handler(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.handlers.get(name)
    }

    /// All registered handlers, decorators included
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Handler>)> {
        self.handlers.iter().map(|(name, h)| (name.as_str(), h))
    }

    pub fn metrics(&self) -> &Arc<RouterMetrics> {
        &self.metrics
    }
}

/// Builds a [`Registry`] from configuration.
///
/// Construction order per channel: base syslog sink for the configured
/// severity, optional file sink, sampling wrap, buffering wrap, and finally
/// the failure-isolating group. Every referenced handler name must resolve
/// during `build`; a dangling reference or unknown severity aborts with a
/// configuration error.
pub struct RegistryBuilder {
    config: RouterConfig,
    handlers: HashMap<String, Arc<dyn Handler>>,
    sampling_mode: SamplingMode,
    buffer_limit: usize,
    request_metadata: Option<RequestMetadataProvider>,
    metrics: Arc<RouterMetrics>,
}

impl RegistryBuilder {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            handlers: HashMap::new(),
            sampling_mode: SamplingMode::default(),
            buffer_limit: DEFAULT_BUFFER_LIMIT,
            request_metadata: None,
            metrics: Arc::new(RouterMetrics::new()),
        }
    }

    /// Pre-register a handler under a name. A pre-registered name takes
    /// precedence over the sink the builder would otherwise create, which is
    /// how custom sinks (and test doubles) slot into chains.
    #[must_use = "builder methods return a new value"]
    pub fn handler(mut self, name: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Choose between deterministic and probabilistic sampling gates
    #[must_use = "builder methods return a new value"]
    pub fn sampling_mode(mut self, mode: SamplingMode) -> Self {
        self.sampling_mode = mode;
        self
    }

    /// Per-request record limit before a buffering decorator flushes early
    #[must_use = "builder methods return a new value"]
    pub fn buffer_limit(mut self, limit: usize) -> Self {
        self.buffer_limit = limit;
        self
    }

    /// Provider the request metadata processor pulls from
    #[must_use = "builder methods return a new value"]
    pub fn request_metadata(mut self, provider: RequestMetadataProvider) -> Self {
        self.request_metadata = Some(provider);
        self
    }

    pub fn build(mut self) -> Result<Registry> {
        self.handlers
            .entry(BLACKHOLE.to_string())
            .or_insert_with(|| Arc::new(NullHandler::new()));

        // One base remote sink per severity threshold
        for severity in Severity::all() {
            let name = base_sink_name(severity);
            if !self.handlers.contains_key(&name) {
                let sink = crate::handlers::SyslogHandler::new(&self.config.syslog, severity)?;
                self.handlers.insert(name, Arc::new(sink));
            }
        }

        let processors: Vec<Arc<dyn Processor>> = vec![
            Arc::new(PlaceholderProcessor::new()),
            Arc::new(match self.request_metadata.take() {
                Some(provider) => RequestMetadataProcessor::new(provider),
                None => RequestMetadataProcessor::detached(),
            }),
            Arc::new(ShardProcessor::new(&self.config.shard)),
        ];

        let mut channels = HashMap::new();
        for (channel, options) in self.config.channels.clone() {
            let pipeline = match options.settings(&channel)? {
                None => ChannelPipeline {
                    processors: Vec::new(),
                    handler: self.resolve(BLACKHOLE, &channel)?,
                    threshold: Severity::Debug,
                },
                Some(settings) => self.build_channel(&channel, &settings, &processors)?,
            };
            channels.insert(channel, pipeline);
        }

        // Template for all undeclared channels: failure-wrapped debug sink
        let default_pipeline = ChannelPipeline {
            processors: processors.clone(),
            handler: self.failure_group(&[base_sink_name(Severity::Debug)], "default channel")?,
            threshold: Severity::Debug,
        };

        Ok(Registry {
            channels,
            default_pipeline,
            handlers: self.handlers,
            metrics: self.metrics,
        })
    }

    fn build_channel(
        &mut self,
        channel: &str,
        settings: &super::config::ChannelSettings,
        processors: &[Arc<dyn Processor>],
    ) -> Result<ChannelPipeline> {
        let severity = settings.parse_severity(channel)?;
        let referrer = format!("channel '{}'", channel);

        let base = base_sink_name(severity);
        if !self.handlers.contains_key(&base) {
            return Err(RouterError::unknown_handler(base, referrer));
        }
        let mut chain = vec![base];
        let mut threshold = severity;

        // Local debug file, with its own severity override
        if let Some(files) = self.config.files.clone() {
            if let Some(target) = files.channels.get(channel) {
                let level = target.level(channel)?;
                let name = format!("file-{}", channel);
                if !self.handlers.contains_key(&name) {
                    let sink = FileHandler::new(target.resolve(&files.directory), level)?;
                    self.handlers.insert(name.clone(), Arc::new(sink));
                }
                chain.push(name);
                threshold = threshold.min(level);
            }
        }

        if let Some(rate) = settings.sample.rate(channel)? {
            for name in chain.iter_mut() {
                let sampled = format!("{}-sampled-{}", name, rate);
                if !self.handlers.contains_key(&sampled) {
                    let child = self.resolve(name, &referrer)?;
                    let decorator =
                        SamplingHandler::new(child, rate, self.sampling_mode, self.metrics.clone())?;
                    self.handlers.insert(sampled.clone(), Arc::new(decorator));
                }
                *name = sampled;
            }
        }

        if settings.buffer {
            for name in chain.iter_mut() {
                let buffered = format!("{}-buffered", name);
                if !self.handlers.contains_key(&buffered) {
                    let child = self.resolve(name, &referrer)?;
                    let decorator = BufferHandler::new(child, self.buffer_limit);
                    self.handlers.insert(buffered.clone(), Arc::new(decorator));
                }
                *name = buffered;
            }
        }

        Ok(ChannelPipeline {
            processors: processors.to_vec(),
            handler: self.failure_group(&chain, &referrer)?,
            threshold,
        })
    }

    /// Wrap a handler list in a (memoized) failure-isolating group
    fn failure_group(&mut self, chain: &[String], referrer: &str) -> Result<Arc<dyn Handler>> {
        let name = format!("failuregroup|{}", chain.join("|"));
        if !self.handlers.contains_key(&name) {
            let children = chain
                .iter()
                .map(|child| self.resolve(child, referrer))
                .collect::<Result<Vec<_>>>()?;
            let group = FailureGroupHandler::new(children, self.metrics.clone());
            self.handlers.insert(name.clone(), Arc::new(group));
        }
        self.resolve(&name, referrer)
    }

    fn resolve(&self, name: &str, referrer: &str) -> Result<Arc<dyn Handler>> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| RouterError::unknown_handler(name, referrer))
    }
}

fn base_sink_name(severity: Severity) -> String {
    format!("syslog-{}", severity.to_str())
}
