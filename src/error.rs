//! Error types for configuration, loading and export

use thiserror::Error;

/// Invalid investment inputs, detected before any month is projected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("loan term of 0 months cannot amortize a principal of {principal:.2}")]
    ZeroLoanTerm { principal: f64 },

    #[error("invalid {kind} for month {month}: {value}")]
    InvalidOverlay {
        kind: &'static str,
        month: u32,
        value: f64,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure reading an investment file or overlay CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Failure inside an export sink
///
/// Never escapes `export::export_ledgers`; the computed ledgers stay valid.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Sink(String),
}
