//! Error types for schema loading and conversion.
//!
//! The text transformer itself never fails. These errors only cover the
//! surroundings: reading stored schema documents, rendering them, and
//! building a pipeline from a user-supplied grammar.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading, checking or converting a schema.
#[derive(Debug, Error)]
pub enum ConvertError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported data type \"{name}\" at {path}")]
    UnsupportedType { path: String, name: String },

    #[error("invalid grammar: {message}")]
    InvalidGrammar { message: String },

    #[error("cannot compile pattern for {stage} stage: {source}")]
    InvalidPattern {
        stage: &'static str,
        #[source]
        source: regex::Error,
    },

    // Document shape errors (exit code 1)
    #[error("schema document is invalid with {} error(s)", errors.len())]
    InvalidDocument { errors: Vec<SchemaError> },
}

/// Single document error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the offending value.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl ConvertError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::FileNotFound { .. } | ConvertError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            ConvertError::NetworkError { .. } => 3,
            ConvertError::InvalidDocument { .. } => 1,
            _ => 2,
        }
    }
}
