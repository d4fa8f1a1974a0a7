use thiserror::Error;

/// Why a single image reference could not be turned into a data reference.
/// These never escape [`super::ImageInliner::inline`]; they only drive the fallback chain.
#[derive(Error, Debug)]
pub enum InlineError {
    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(u16),

    #[error("Response is not an image (content type: {0})")]
    NotAnImage(String),

    #[error("Image could not be decoded or encoded: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Reference cannot be resolved to a URL: {0}")]
    Unresolvable(String),
}

/// A specialized Result type for image inlining.
pub type Result<T> = std::result::Result<T, InlineError>;
