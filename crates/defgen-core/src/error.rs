//! Error types for the defgen-core library.
//!
//! Every failure is fatal to a generation pass; callers are expected to
//! propagate these rather than recover from them.

use crate::scanner::Rule;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for defgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all defgen operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to open or read the input header
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create, write or flush the output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line passed a rule's guard but the extraction pattern found nothing
    #[error("{rule} rule matched line {line_number} but no symbol could be extracted from '{line}'")]
    MissingCapture {
        /// The rule whose guard matched
        rule: Rule,
        /// 0-indexed header line being classified
        line_number: usize,
        /// Text the extraction pattern was applied to
        line: String,
    },

    /// I/O failure on a stream that has no path (in-memory readers and sinks)
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new missing capture error
    pub fn missing_capture(rule: Rule, line_number: usize, line: impl Into<String>) -> Self {
        Self::MissingCapture {
            rule,
            line_number,
            line: line.into(),
        }
    }
}
