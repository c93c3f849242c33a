use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the stockboard workspace.
///
/// Covers data-source failures, malformed time labels, undecodable documents,
/// and argument validation. A date without data is not an error: it is a
/// [`Resolution`](crate::Resolution) without payload.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StockboardError {
    /// The data source failed to deliver the document.
    #[error("{source_name} fetch failed: {msg}")]
    Fetch {
        /// Data source name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A fetch exceeded the configured timeout.
    #[error("{source_name} fetch timed out after {timeout_ms}ms")]
    Timeout {
        /// Data source name that timed out.
        source_name: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// A time label could not be parsed as `H:MM AM|PM`.
    #[error("malformed time label {label:?}: {reason}")]
    Format {
        /// The offending label.
        label: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The document body could not be decoded.
    #[error("data issue: {0}")]
    Data(String),

    /// The data source reported the document as missing.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource.
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl StockboardError {
    /// Helper: build a `Fetch` error with the source name and message.
    pub fn fetch(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Timeout` error.
    pub fn timeout(source_name: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            source_name: source_name.into(),
            timeout_ms,
        }
    }

    /// Helper: build a `Format` error for a malformed time label.
    pub fn format(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if the error came from retrieving the document.
    ///
    /// These failures leave the last good document in place and are retried
    /// on the next trigger.
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Timeout { .. } | Self::NotFound { .. } | Self::Data(_)
        )
    }
}
