//! Error types for the pdfbrief library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfbrief operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting document structure or
/// delegating summarization.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the document or writing the transient body file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF structure is corrupted or could not be parsed.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// A page's text content could not be decoded.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Serializing an outline or brief to JSON failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external summarization collaborator could not be launched,
    /// exited non-zero, or timed out.
    #[error("Summarization failed: {0}")]
    Summarization(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::Summarization("exited with code 1".to_string());
        assert_eq!(err.to_string(), "Summarization failed: exited with code 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
