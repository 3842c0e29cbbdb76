//! Error handling for trace-charts
//!
//! The normalizer itself never fails. These errors cover everything around
//! it: loading series files, reading and writing settings, and exporting
//! rendered charts.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trace-charts operations
#[derive(Error, Debug)]
pub enum TraceChartsError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed series input at a specific line (1-based)
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Series file with an extension we cannot read
    #[error("Unsupported series format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Errors writing an exported chart
    #[error("Export error: {0}")]
    Export(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TraceChartsError>,
    },
}

impl TraceChartsError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TraceChartsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a parse error for the given 1-based line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        TraceChartsError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TraceChartsError {
    fn from(err: serde_json::Error) -> Self {
        TraceChartsError::Serialization(err.to_string())
    }
}

/// Result type alias for trace-charts operations
pub type Result<T> = std::result::Result<T, TraceChartsError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| TraceChartsError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| TraceChartsError::Io(e).with_context(f()))
    }
}
