/// Error types for the sentiment correlation loader
///
/// Every failure in this program is fatal. The variants exist so that the
/// binary can report a precise message and a distinct exit status per kind.

use std::io;
use std::path::PathBuf;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SentimentError>;

#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    /// The input file does not exist
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Opening, inspecting or reading the input file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The buffer for the file contents could not be allocated
    #[error("Could not allocate {requested} bytes for {}", .path.display())]
    OutOfMemory { path: PathBuf, requested: u64 },

    /// The file yielded fewer bytes than its reported length
    #[error("Short read on {}: expected {expected} bytes, got {actual}", .path.display())]
    TruncatedRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// The correlation runtime (isolate) could not be created
    #[error("Runtime initialization failed: {0}")]
    RuntimeInit(String),

    /// The configuration file is missing or invalid
    #[error("Invalid configuration {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// Input content does not have the expected shape (only checked with --check)
    #[error("Malformed input in {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },
}

impl SentimentError {
    /// Process exit status for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            SentimentError::FileNotFound { .. } => 3,
            SentimentError::Io { .. } => 4,
            SentimentError::OutOfMemory { .. } => 5,
            SentimentError::TruncatedRead { .. } => 6,
            SentimentError::Config { .. } => 7,
            SentimentError::MalformedInput { .. } => 8,
            // Reported as -1 by the native launcher
            SentimentError::RuntimeInit(_) => 255,
        }
    }

    /// Build the error for an I/O failure, separating out missing files
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            SentimentError::FileNotFound { path }
        } else {
            SentimentError::Io { path, source }
        }
    }
}
