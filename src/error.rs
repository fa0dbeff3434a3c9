use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to library callers.
///
/// Per-record parse problems are warnings on the diagnostic channel, not
/// errors; only conditions that abort a batch appear here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was missing or an illegal format/charset/flag
    /// combination was requested.
    #[error("bad input: {0}")]
    BadInput(String),

    /// A file could not be opened, or the single-reference-per-file
    /// collision limit was exhausted.
    #[error("cannot open {0}")]
    CantOpen(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn bad_input(msg: impl Into<String>) -> Self {
        Error::BadInput(msg.into())
    }

    /// One-word category for the CLI's single-line stderr report.
    pub fn category(&self) -> &'static str {
        match self {
            Error::BadInput(_) => "bad input",
            Error::CantOpen(_) => "cannot open",
            Error::Io(_) => "i/o error",
        }
    }
}
