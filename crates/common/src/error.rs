//! Common error types for check_prometheus components.

use std::fmt;

/// A specialized Result type for check_prometheus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for check_prometheus operations.
///
/// Transport and info-retrieval errors display their raw text, because the
/// plugin prints them verbatim after `UNKNOWN - `.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),

    /// The build-info endpoint could not be queried or decoded.
    #[error("{0}")]
    InfoRetrieval(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a transport error from a client error, keeping its cause chain.
    pub fn transport(err: impl std::error::Error) -> Self {
        Error::Transport(error_chain(&err))
    }

    /// Create a new build-info retrieval error.
    pub fn info_retrieval(msg: impl fmt::Display) -> Self {
        Error::InfoRetrieval(msg.to_string())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl fmt::Display) -> Self {
        Error::Config(msg.to_string())
    }

    /// Whether the error happened before any HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Render an error followed by each of its sources, separated by `": "`.
///
/// Sources whose text is already part of the message are skipped, since many
/// client errors repeat their cause in their own `Display`.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !msg.contains(&cause_msg) {
            msg.push_str(": ");
            msg.push_str(&cause_msg);
        }
        source = cause.source();
    }

    msg
}
