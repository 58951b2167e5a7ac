//! Declarative routing configuration
//!
//! The configuration is a plain serde structure so it can be loaded from any
//! serde format; tests use JSON. A channel maps to either `false` (disabled),
//! a bare severity string, or an options object:
//!
//! ```json
//! {
//!     "channels": {
//!         "api": { "severity": "warning", "buffer": true, "sample": 10 },
//!         "thumbnail": "info",
//!         "chatter": false
//!     }
//! }
//! ```

use super::error::{Result, RouterError};
use super::severity::Severity;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top level routing configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Channel name to channel options
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelOptions>,

    /// Remote collector endpoint backing the per-severity base sinks
    #[serde(default)]
    pub syslog: SyslogConfig,

    /// Optional per-channel local debug files
    #[serde(default)]
    pub files: Option<FileLogConfig>,

    /// Shard tagging for the shard processor
    #[serde(default)]
    pub shard: ShardConfig,
}

impl RouterConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-channel options as written in configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ChannelOptions {
    /// `false` disables the channel. `true` is rejected at build time.
    Toggle(bool),
    /// Bare severity string, shorthand for `{ "severity": ... }`
    Severity(String),
    Settings(ChannelSettings),
}

impl ChannelOptions {
    /// Normalize to settings; `None` means the channel is disabled.
    pub fn settings(&self, channel: &str) -> Result<Option<ChannelSettings>> {
        match self {
            ChannelOptions::Toggle(false) => Ok(None),
            ChannelOptions::Toggle(true) => Err(RouterError::config(
                format!("channel '{}'", channel),
                "'true' is not a valid channel option; use a severity or an options object",
            )),
            ChannelOptions::Severity(severity) => Ok(Some(ChannelSettings {
                severity: severity.clone(),
                buffer: false,
                sample: SampleRate::default(),
            })),
            ChannelOptions::Settings(settings) => Ok(Some(settings.clone())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSettings {
    /// Minimum severity forwarded to the remote collector
    #[serde(default = "default_severity_name")]
    pub severity: String,

    /// Defer emission until end-of-request
    #[serde(default)]
    pub buffer: bool,

    /// Forward one in N records, or `false` to forward all
    #[serde(default)]
    pub sample: SampleRate,
}

impl ChannelSettings {
    /// Parse the configured severity name; unknown names are fatal.
    pub fn parse_severity(&self, channel: &str) -> Result<Severity> {
        self.severity
            .parse::<Severity>()
            .map_err(|_| RouterError::unknown_severity(&self.severity, format!("channel '{}'", channel)))
    }
}

fn default_severity_name() -> String {
    "debug".to_string()
}

/// Sampling rate: `false` or an integer N meaning one in N
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SampleRate {
    Toggle(bool),
    EveryNth(u64),
}

impl Default for SampleRate {
    fn default() -> Self {
        SampleRate::Toggle(false)
    }
}

impl SampleRate {
    /// Validated rate; `None` means no sampling. A rate of 0 or 1 is a
    /// configuration error (1 would mean "forward everything").
    pub fn rate(&self, channel: &str) -> Result<Option<u64>> {
        match self {
            SampleRate::Toggle(false) => Ok(None),
            SampleRate::Toggle(true) => Err(RouterError::config(
                format!("channel '{}'", channel),
                "sample must be false or an integer rate",
            )),
            SampleRate::EveryNth(n) if *n < 2 => Err(RouterError::config(
                format!("channel '{}'", channel),
                format!("sample rate must be >= 2, got {}", n),
            )),
            SampleRate::EveryNth(n) => Ok(Some(*n)),
        }
    }
}

/// Remote syslog collector endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyslogConfig {
    #[serde(default = "default_syslog_host")]
    pub host: String,

    #[serde(default = "default_syslog_port")]
    pub port: u16,

    #[serde(default)]
    pub protocol: SyslogProtocol,

    /// Application tag carried in the syslog header and JSON event
    #[serde(default = "default_syslog_tag")]
    pub tag: String,

    /// Reported origin host in the JSON event
    #[serde(default = "default_hostname")]
    pub hostname: String,
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self {
            host: default_syslog_host(),
            port: default_syslog_port(),
            protocol: SyslogProtocol::default(),
            tag: default_syslog_tag(),
            hostname: default_hostname(),
        }
    }
}

impl SyslogConfig {
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyslogProtocol {
    #[default]
    Udp,
    Tcp,
}

fn default_syslog_host() -> String {
    "127.0.0.1".to_string()
}

fn default_syslog_port() -> u16 {
    10514
}

fn default_syslog_tag() -> String {
    "webapp".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}

/// Local debug log files, one per channel
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLogConfig {
    /// Directory that bare file targets are resolved against
    pub directory: PathBuf,

    #[serde(default)]
    pub channels: BTreeMap<String, FileTarget>,
}

/// File destination: a bare path or a path with a severity override
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FileTarget {
    Path(String),
    Options {
        destination: String,
        level: String,
    },
}

impl FileTarget {
    pub fn destination(&self) -> &str {
        match self {
            FileTarget::Path(path) => path,
            FileTarget::Options { destination, .. } => destination,
        }
    }

    /// Per-channel minimum severity; bare paths default to `debug`.
    pub fn level(&self, channel: &str) -> Result<Severity> {
        match self {
            FileTarget::Path(_) => Ok(Severity::Debug),
            FileTarget::Options { level, .. } => level.parse::<Severity>().map_err(|_| {
                RouterError::unknown_severity(level, format!("file target for channel '{}'", channel))
            }),
        }
    }

    /// Resolve the destination against the configured directory
    pub fn resolve(&self, directory: &std::path::Path) -> PathBuf {
        let destination = std::path::Path::new(self.destination());
        if destination.is_absolute() {
            destination.to_path_buf()
        } else {
            directory.join(destination)
        }
    }
}

/// Shard tagging configuration for the shard processor
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShardConfig {
    /// Current site/database name
    #[serde(default)]
    pub site: Option<String>,

    /// Site name to shard label
    #[serde(default)]
    pub sections: BTreeMap<String, String>,

    /// Label applied when the site is absent from `sections`
    #[serde(default = "default_section")]
    pub default_section: String,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            site: None,
            sections: BTreeMap::new(),
            default_section: default_section(),
        }
    }
}

fn default_section() -> String {
    "c1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_variants() {
        let config = RouterConfig::from_json(
            r#"{
                "channels": {
                    "api": { "severity": "warning", "buffer": true, "sample": 10 },
                    "thumbnail": "info",
                    "chatter": false
                }
            }"#,
        )
        .unwrap();

        let api = config.channels["api"].settings("api").unwrap().unwrap();
        assert_eq!(api.parse_severity("api").unwrap(), Severity::Warning);
        assert!(api.buffer);
        assert_eq!(api.sample.rate("api").unwrap(), Some(10));

        let thumbnail = config.channels["thumbnail"]
            .settings("thumbnail")
            .unwrap()
            .unwrap();
        assert_eq!(thumbnail.parse_severity("thumbnail").unwrap(), Severity::Info);
        assert!(!thumbnail.buffer);

        assert!(config.channels["chatter"].settings("chatter").unwrap().is_none());
    }

    #[test]
    fn test_channel_true_is_rejected() {
        let config = RouterConfig::from_json(r#"{ "channels": { "api": true } }"#).unwrap();
        assert!(config.channels["api"].settings("api").is_err());
    }

    #[test]
    fn test_sample_rate_validation() {
        assert!(SampleRate::EveryNth(1).rate("api").is_err());
        assert!(SampleRate::EveryNth(0).rate("api").is_err());
        assert_eq!(SampleRate::EveryNth(100).rate("api").unwrap(), Some(100));
        assert_eq!(SampleRate::Toggle(false).rate("api").unwrap(), None);
    }

    #[test]
    fn test_unknown_severity_is_fatal() {
        let settings = ChannelSettings {
            severity: "verbose".to_string(),
            buffer: false,
            sample: SampleRate::default(),
        };
        assert!(matches!(
            settings.parse_severity("api"),
            Err(RouterError::UnknownSeverity { .. })
        ));
    }

    #[test]
    fn test_syslog_defaults() {
        let config = RouterConfig::from_json("{}").unwrap();
        assert_eq!(config.syslog.endpoint(), "127.0.0.1:10514");
        assert_eq!(config.syslog.protocol, SyslogProtocol::Udp);
    }

    #[test]
    fn test_file_targets() {
        let config = RouterConfig::from_json(
            r#"{
                "files": {
                    "directory": "/var/log/webapp/debuglogs",
                    "channels": {
                        "api": "api.log",
                        "redis": { "destination": "redis.log", "level": "warning" }
                    }
                }
            }"#,
        )
        .unwrap();

        let files = config.files.unwrap();
        let api = &files.channels["api"];
        assert_eq!(
            api.resolve(&files.directory),
            PathBuf::from("/var/log/webapp/debuglogs/api.log")
        );
        assert_eq!(api.level("api").unwrap(), Severity::Debug);

        let redis = &files.channels["redis"];
        assert_eq!(redis.level("redis").unwrap(), Severity::Warning);
    }
}
