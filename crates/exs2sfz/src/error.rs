use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the code around the conversion engine.
///
/// The translation passes themselves never fail: anomalies inside an
/// instrument are reported as [`Diagnostic`](crate::Diagnostic)s. These errors
/// cover reading inputs that are not instruments at all:
///
/// - File access errors while reading SFZ text, record files or configuration
/// - Syntax errors in SFZ text that cannot be tokenized
/// - Malformed EXS24 record documents or configuration files
#[derive(Error, Debug)]
pub enum Error {
    /// Input/Output error when reading files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// SFZ syntax problem with its location in the source text
    #[error("Failed to parse SFZ at line {line}, column {column}: {message}")]
    ParseAt {
        /// Line number where the error occurred (1-based)
        line: usize,
        /// Column position where the error occurred (1-based)
        column: usize,
        /// Error message describing the problem
        message: String,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Configuration file could not be decoded
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// EXS24 record document could not be decoded
    #[error("Invalid EXS24 records: {0}")]
    Records(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
