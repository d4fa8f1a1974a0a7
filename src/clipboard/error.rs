use thiserror::Error;

/// Errors that can occur while writing to the clipboard.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The clipboard could not be opened.
    #[error("Clipboard access error: {0}")]
    Access(String),

    /// The clipboard rejected the content.
    #[error("Clipboard write error: {0}")]
    Write(String),

    /// The copy was cancelled before anything was written.
    #[error("Clipboard write cancelled")]
    Cancelled,
}

#[cfg(not(target_arch = "wasm32"))]
impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        ClipboardError::Write(err.to_string())
    }
}

/// A specialized Result type for clipboard operations.
pub type Result<T> = std::result::Result<T, ClipboardError>;
