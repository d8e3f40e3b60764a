//! Server settings: an optional config file overridden by environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use httplog_core::{Delimiter, SharedSink, SinkKind, SinkSettings, open_sink};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::middleware::{BodyCapture, LoggerOptions};

/// Prefix of environment overrides, e.g. `HTTPLOG__SERVER__ADDR`.
pub const ENV_PREFIX: &str = "HTTPLOG";

/// Separator between nested keys in environment overrides.
pub const ENV_SEPARATOR: &str = "__";

/// Base name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
}

/// Listener and timeout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: SocketAddr,

    /// Seconds allowed to receive a request body; 0 disables the limit.
    pub read_timeout_secs: u64,

    /// Seconds allowed to produce a response; 0 disables the limit.
    pub write_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            read_timeout_secs: 0,
            write_timeout_secs: 0,
        }
    }
}

impl ServerSettings {
    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.write_timeout_secs)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Where log records go and how the middleware captures them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub writer: SinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub delimiter: Delimiter,
    pub restore_request_body: bool,
    pub body_capture: BodyCapture,
}

impl Default for LogSettings {
    fn default() -> Self {
        let options = LoggerOptions::default();
        Self {
            writer: SinkKind::default(),
            path: None,
            delimiter: Delimiter::default(),
            restore_request_body: options.restore_request_body,
            body_capture: options.body_capture,
        }
    }
}

impl LogSettings {
    pub fn sink_settings(&self) -> SinkSettings {
        SinkSettings {
            writer: self.writer,
            path: self.path.clone(),
            delimiter: self.delimiter,
        }
    }

    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions::builder()
            .restore_request_body(self.restore_request_body)
            .body_capture(self.body_capture)
            .build()
    }

    /// Opens the configured sink.
    pub fn open_sink(&self) -> Result<SharedSink, ConfigError> {
        Ok(open_sink(&self.sink_settings())?)
    }
}

impl Settings {
    /// Loads settings from `path` (or `./config.*` when `None`) and applies
    /// `HTTPLOG__*` environment overrides.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`Settings::load`] with a caller-supplied environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(env.separator(ENV_SEPARATOR).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log.writer == SinkKind::File && self.log.path.is_none() {
            return Err(ConfigError::invalid(
                "log.path",
                "required when log.writer is 'file'",
            ));
        }
        if self.log.writer != SinkKind::File && self.log.path.is_some() {
            tracing::warn!(writer = ?self.log.writer, "log.path is ignored for this writer");
        }
        Ok(())
    }
}
