//! Shared error type across ebx crates.

use thiserror::Error;

/// Stable error codes, used in logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Config file missing fields, unknown fields, or out-of-range values.
    Config,
    /// Bad metric name or bucket layout.
    InvalidMetric,
    /// Listener could not be bound.
    Bind,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG",
            ErrorCode::InvalidMetric => "INVALID_METRIC",
            ErrorCode::Bind => "BIND",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("config: {0}")]
    Config(String),
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("bind {addr} failed: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl ExporterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExporterError::Config(_) => ErrorCode::Config,
            ExporterError::InvalidMetric(_) => ErrorCode::InvalidMetric,
            ExporterError::Bind { .. } => ErrorCode::Bind,
            ExporterError::Internal(_) => ErrorCode::Internal,
        }
    }
}
