//! Error types for balcp
//!
//! Every fallible operation in the crate returns a [`Result`]; the binary
//! decides whether an error aborts the run. Errors carry the path of the
//! failing operation wherever one exists.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for balcp operations
#[derive(Error, Debug)]
pub enum BalcpError {
    /// I/O error during a file operation
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File or directory not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error (worker count, buffer size, size strings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A copy worker thread panicked
    #[error("Copy worker {worker_id} panicked")]
    WorkerPanic { worker_id: usize },
}

impl BalcpError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::NotFound(path) => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for balcp operations
pub type Result<T> = std::result::Result<T, BalcpError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| BalcpError::io(path, e))
    }
}
