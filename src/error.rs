//! Error types for the outliner library.

use std::io;
use thiserror::Error;

/// Result type alias for outliner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the I/O and serialization boundaries.
///
/// The inference engine itself never fails: degenerate input produces an
/// empty [`DocumentResult`](crate::DocumentResult) instead of an error.
/// These variants cover file handling, input deserialization, model loading,
/// and output rendering.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input could not be deserialized as an extracted document.
    #[error("Invalid extracted document: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// A learned-classifier artifact could not be loaded.
    #[error("Model loading error: {0}")]
    Model(String),

    /// A path did not resolve to a usable file or directory.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Error serializing the result artifact.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Model("missing font map".to_string());
        assert_eq!(err.to_string(), "Model loading error: missing font map");

        let err = Error::InvalidPath("/does/not/exist".to_string());
        assert_eq!(err.to_string(), "Invalid path: /does/not/exist");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
