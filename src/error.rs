//! Error types for textconv library.

use std::io;
use thiserror::Error;

/// Result type alias for textconv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during text conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested text encoding label is not recognized.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// An id hash key does not name a document attribute.
    #[error("Invalid id hash key '{0}' (expected one of: content, content_type, meta)")]
    InvalidIdHashKey(String),

    /// Per-file metadata does not line up with the list of files.
    #[error("Got {metas} metadata entries for {files} files")]
    MetaCountMismatch {
        /// Number of files in the batch
        files: usize,
        /// Number of metadata maps supplied
        metas: usize,
    },

    /// A metadata entry could not be parsed.
    #[error("Invalid metadata entry: {0}")]
    InvalidMeta(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownEncoding("klingon-8".to_string());
        assert_eq!(err.to_string(), "Unknown encoding: klingon-8");

        let err = Error::MetaCountMismatch { files: 3, metas: 2 };
        assert_eq!(err.to_string(), "Got 2 metadata entries for 3 files");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
