use std::io;

use thiserror::Error;

use super::input::InputError;

/// Errors returned by console session operations.
#[derive(Debug, Error)]
pub enum UiError {
    /// The input channel is gone: interrupted, ended, or released by `stop`.
    /// Terminal for the session.
    #[error("console session closed")]
    Closed,
    #[error("console session used before start")]
    NotStarted,
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl UiError {
    pub fn is_closed(&self) -> bool {
        matches!(self, UiError::Closed)
    }
}

impl From<InputError> for UiError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::Interrupted | InputError::Eof => UiError::Closed,
            InputError::Io(e) => UiError::Io(e),
        }
    }
}
