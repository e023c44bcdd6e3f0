use std::path::PathBuf;

use thiserror::Error;

/// Core error type for tether operations.
#[derive(Error, Debug)]
pub enum TetherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generated region drifted in {}: {detail}", path.display())]
    Drift { path: PathBuf, detail: String },

    #[error("Required fixture {} could not be read: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Translation error: {0}")]
    Translation(String),
}

impl TetherError {
    /// Attach a path to an IO error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TetherError::File {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means a generated file no longer matches its expected shape.
    pub fn is_drift(&self) -> bool {
        matches!(self, TetherError::Drift { .. })
    }
}

/// Result type alias using TetherError.
pub type Result<T> = std::result::Result<T, TetherError>;
