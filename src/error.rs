//! Error types for pdfhtml library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfhtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing pages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An `<img>` source could not be resolved to a readable file.
    #[error("Cannot inline image {}: {source}", path.display())]
    ImageResolution {
        /// Resolved path that was read
        path: PathBuf,
        /// Underlying read failure
        #[source]
        source: io::Error,
    },

    /// Page numbers are 1-indexed.
    #[error("Invalid page number: {0} (pages are numbered from 1)")]
    InvalidPageNumber(u32),

    /// The option bag contained an unknown key or a bad value.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error serializing or navigating the HTML tree.
    #[error("HTML processing error: {0}")]
    Html(String),

    /// Error serializing the page collection.
    #[error("JSON serialization error: {0}")]
    Json(String),
}
