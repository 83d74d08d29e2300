// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can kill a document run.
///
/// Missing record identity is deliberately absent: an event without a usable
/// `(id, epoch)` pair is skipped and counted, it never fails the run.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured marker substring never occurs in the document.
    #[error("marker not found: {0}")]
    MarkerNotFound(String),

    /// No '{' after the marker, so there is no literal to extract.
    #[error("object start '{{' not found after marker")]
    ObjectStartNotFound,

    /// Brace scan exhausted the document before depth returned to zero.
    #[error("unbalanced braces while extracting object literal")]
    UnbalancedLiteral,

    /// Normalized text still rejected by the strict decoder.
    /// Position is the decoder's line/column; no repair is attempted.
    #[error("literal rejected by decoder at line {line}, column {column}: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        line: usize,
        column: usize,
    },

    /// Input snapshot file does not exist.
    #[error("input document missing: {0}")]
    InputMissing(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line.
    #[error("{0}")]
    Usage(String),
}
