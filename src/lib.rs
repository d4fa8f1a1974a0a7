pub mod cancel;
pub mod clipboard;
pub mod errors;
pub mod inliner;
pub mod models;
pub mod recovery;
pub mod renderers;
pub mod storage;
pub mod text;
pub mod upload;
pub mod wasm;

pub use cancel::CancellationToken;
pub use clipboard::{Clipboard, ClipboardPublisher};
pub use errors::{LogGenError, Result};
pub use inliner::ImageInliner;
pub use models::{Theme, ThemeConfig, WordReplacement};
pub use renderers::{render_theme, ThemeRenderer};

/// Renders `config.content` with `theme`. Shorthand for [`renderers::render_theme`]
/// with the crate-level error type.
pub fn generate(theme: Theme, config: &ThemeConfig) -> Result<String> {
    Ok(render_theme(theme, config)?)
}
