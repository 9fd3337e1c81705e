//! Error and warning types for the colorcheck library
//!
//! Errors abort the analysis of a single file. Warnings never abort anything:
//! they are collected on the report so callers decide how to present them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for colorcheck operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures that stop the analysis of one file (or the loading of a config)
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// File exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not on disk
    #[error("File {} not found", path.display())]
    NotFound { path: PathBuf },

    /// Magic number is not `P6`
    #[error("{} is not a binary PPM file (P6), found magic {found:?}", path.display())]
    Format { path: PathBuf, found: String },

    /// Dimensions or max value line could not be parsed
    #[error("Malformed PPM header in {}: {reason}", path.display())]
    Header { path: PathBuf, reason: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create an I/O error, mapping `NotFound` to its own variant
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Create a header error with context
    pub fn header(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Header {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with its underlying cause
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether a batch run can skip this file and carry on
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AnalysisError::Config { .. })
    }
}

/// Non-fatal conditions noticed while loading or analysing an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Declared `width * height * 3` disagrees with the bytes present
    SizeMismatch { expected: usize, actual: usize },

    /// Bytes at the end of the buffer that do not form a whole pixel
    PartialTrailingPixel { bytes: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::SizeMismatch { expected, actual } => write!(
                f,
                "size mismatch: header declares {} bytes, file holds {}",
                expected, actual
            ),
            Warning::PartialTrailingPixel { bytes } => {
                write!(f, "ignored {} trailing byte(s) of a partial pixel", bytes)
            }
        }
    }
}
