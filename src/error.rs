//! Error types for aggregation and report rendering

use std::fmt;
use thiserror::Error;

/// Result type for aggregation and rendering operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Fatal report errors.
///
/// Per-host failures are data, not errors: they travel through the error table.
/// Everything here aborts the report for the current invocation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Host identifier cannot be represented in range notation
    #[error("invalid host identifier {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },

    /// Range notation could not be expanded
    #[error("invalid host range {range:?}: {reason}")]
    InvalidRange { range: String, reason: String },

    /// The same host reported two different payloads
    #[error("host {0} reported conflicting results")]
    DuplicateHost(String),

    /// Two payloads produced the same key but are not equal
    #[error("result key collision for {0}")]
    HashCollision(String),

    /// Management opcode not recognized
    #[error("unsupported opcode {0:?}")]
    UnsupportedOpcode(String),

    /// A single-host operation returned results for some other number of hosts
    #[error("unexpected number of results: expected 1 host, got {0}")]
    UnexpectedResults(usize),

    /// Input batch could not be decoded
    #[error("input error: {0}")]
    Input(#[from] serde_json::Error),

    /// Configuration could not be resolved
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the batch or writing the report failed
    #[error("i/o error: {0}")]
    Sink(#[from] std::io::Error),
}

impl ReportError {
    /// Create an invalid host error
    pub fn invalid_host<E: fmt::Display>(host: &str, reason: E) -> Self {
        Self::InvalidHost { host: host.to_string(), reason: reason.to_string() }
    }

    /// Create an invalid range error
    pub fn invalid_range<E: fmt::Display>(range: &str, reason: E) -> Self {
        Self::InvalidRange { range: range.to_string(), reason: reason.to_string() }
    }

    /// Create a configuration error
    pub fn config<E: fmt::Display>(err: E) -> Self {
        Self::Config(err.to_string())
    }
}
