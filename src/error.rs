//! Error types for vfd operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, compiling or exporting descriptions.
#[derive(Error, Debug)]
pub enum Error {
    /// The description does not match the shape expected for its `type`.
    #[error("schema violation at '{path}': {message}")]
    Schema {
        /// Location of the offending field (e.g. `series[2].x`).
        path: String,
        /// What is wrong with it.
        message: String,
    },

    /// The `type` field is missing or names no known variant.
    #[error("unknown description type: {0}")]
    UnknownVariant(String),

    /// A valid but unimplemented combination of features.
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// The plotting runtime needed to execute a script is not available.
    #[error("{tool} is not available: {reason}")]
    ExternalToolMissing {
        /// Interpreter or library that was probed.
        tool: String,
        /// Why the probe failed.
        reason: String,
    },

    /// A generated script exited unsuccessfully.
    #[error("script {} failed: {status}", script.display())]
    ScriptFailed {
        /// Script that was run.
        script: PathBuf,
        /// Exit status reported by the interpreter.
        status: String,
    },

    /// I/O error on a specific file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// I/O error without a file context.
    #[error("I/O error: {0}")]
    Stdio(#[from] io::Error),

    /// The input is not well-formed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern.
    #[error("invalid file pattern: {0}")]
    Pattern(String),

    /// A glob pattern matched no file.
    #[error("no file matching {0}")]
    NoMatch(String),

    /// Requested export is not implemented for this description type.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Spreadsheet writer error.
    #[cfg(feature = "xlsx")]
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    Config {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },
}

impl Error {
    /// Builds a [`Error::Schema`] for the given location.
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attaches a file path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
