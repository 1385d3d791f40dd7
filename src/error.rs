//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by `flipcss`.
///
/// The engines themselves tolerate any input text; the only failing input is a
/// direction literal that is neither `ltr` nor `rtl`.
#[derive(Debug, Error)]
pub enum Error {
    /// Direction argument was not one of the recognized literals.
    #[error("invalid direction '{0}' (expected 'ltr' or 'rtl')")]
    InvalidDirection(String),

    /// Failed to read or write a stylesheet.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
