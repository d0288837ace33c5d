use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Client error: {0}")]
    Client(String),
}

/// Failures of a single report invocation. Each one ends up as the text of
/// the error reply, so the messages are written for the chat user.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("metrics collection failed: {0}")]
    Collect(String),
    #[error("canvas error: {0}")]
    Render(String),
    #[error("png encoding failed: {0}")]
    Encode(String),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("reply failed: {0}")]
    Delivery(String),
    #[error("reply timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, BotError>;
