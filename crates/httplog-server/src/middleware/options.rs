use serde::{Deserialize, Serialize};

/// How the response logger records body writes.
///
/// Every data frame the handler produces counts as one write. All frames are
/// always forwarded to the client; this only controls what ends up in the
/// response record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyCapture {
    /// Only the bytes of the last write are recorded.
    #[default]
    LastWrite,
    /// Every write is appended to the recorded body.
    Concatenate,
}

/// Options shared by the request and response loggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerOptions {
    /// Hand downstream handlers a fresh body holding the bytes the request
    /// logger consumed. When false they see an empty body.
    #[serde(default = "default_restore_request_body")]
    pub restore_request_body: bool,

    #[serde(default)]
    pub body_capture: BodyCapture,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            restore_request_body: default_restore_request_body(),
            body_capture: BodyCapture::default(),
        }
    }
}

impl LoggerOptions {
    pub fn builder() -> LoggerOptionsBuilder {
        LoggerOptionsBuilder::new()
    }
}

fn default_restore_request_body() -> bool {
    true
}

/// Builder for LoggerOptions
#[must_use = "builder does nothing until you call build()"]
#[derive(Debug, Default)]
pub struct LoggerOptionsBuilder {
    options: LoggerOptions,
}

impl LoggerOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore_request_body(mut self, restore: bool) -> Self {
        self.options.restore_request_body = restore;
        self
    }

    pub fn body_capture(mut self, capture: BodyCapture) -> Self {
        self.options.body_capture = capture;
        self
    }

    pub fn build(self) -> LoggerOptions {
        self.options
    }
}
