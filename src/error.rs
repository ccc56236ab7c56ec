use std::io;

use thiserror::Error;

use crate::text_source::TextSourceError;

/// Errors raised when a session cannot be built from its inputs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("target text is empty")]
    EmptyTarget,

    #[error("terminal is too narrow for the running line (width {0})")]
    ViewportTooNarrow(u16),
}

/// Anything that ends the application loop early
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    TextSource(#[from] TextSourceError),
}

pub type Result<T> = std::result::Result<T, Error>;
