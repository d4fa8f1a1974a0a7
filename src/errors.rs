use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::models::theme::UnknownTheme;
use crate::renderers::RenderError;
use crate::upload::UploadError;

/// Errors surfaced by the crate's public operations.
#[derive(Error, Debug)]
pub enum LogGenError {
    /// Rendering a theme failed.
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    /// The requested theme does not exist.
    #[error(transparent)]
    Theme(#[from] UnknownTheme),

    /// An uploaded file was rejected.
    #[error("Upload rejected: {0}")]
    Upload(#[from] UploadError),

    /// Neither the rich nor the plain-text clipboard write succeeded.
    #[error("Copy failed: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Configuration (de)serialization failed.
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred while reading or writing stored configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A type alias for `Result<T, LogGenError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, LogGenError>;
