use thiserror::Error;

/// Errors that can occur while turning a configuration into an HTML fragment.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Formatting error during HTML generation: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("Configuration value is not usable: {0}")]
    InvalidConfig(String),
}

/// A specialized Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
