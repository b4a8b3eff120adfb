//! Error types for the preflight library.

use std::io;
use thiserror::Error;

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analyzing a PDF.
///
/// Errors raised before any check runs (loading, decryption, structural
/// parse failures) abort the scan. Errors raised inside an individual
/// check are recovered by the runner and reported as a failing finding
/// for that check only.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version header is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// The PDF document is encrypted; encrypted input cannot be analyzed.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF structure is corrupted or malformed.
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error while rasterizing a page region.
    #[error("Render error: {0}")]
    Render(String),

    /// A check could not complete its measurement.
    #[error("{0}")]
    Check(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Parse(err.to_string()),
        }
    }
}
