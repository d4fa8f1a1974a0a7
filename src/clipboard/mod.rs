//! Copies a rendered fragment to the clipboard as HTML plus a plain-text alternative,
//! inlining its images first.
//!
//! When the clipboard cannot hold several formats, or the rich write fails, only the
//! plain text is written and the copy reports `false`. An error is returned only when
//! that plain-text write fails too.

mod error;
#[cfg(not(target_arch = "wasm32"))]
mod system;

pub use error::{ClipboardError, Result};
#[cfg(not(target_arch = "wasm32"))]
pub use system::SystemClipboard;

use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

use crate::cancel::CancellationToken;
use crate::inliner::{Fetch, HttpFetcher, ImageInliner};

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_HTML: &str = "text/html";

/// The two representations written in one clipboard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub plain_text: String,
    pub html: String,
}

impl ClipboardPayload {
    /// The payload as `(mime, content)` pairs, plain text first.
    pub fn parts(&self) -> [(&'static str, &str); 2] {
        [(MIME_PLAIN_TEXT, &self.plain_text), (MIME_HTML, &self.html)]
    }
}

/// A clipboard the publisher can write to.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// Whether [`Clipboard::write_payload`] can store several formats at once.
    fn supports_multi_format(&self) -> bool;

    async fn write_text(&mut self, text: &str) -> Result<()>;

    /// Writes both representations atomically.
    async fn write_payload(&mut self, payload: &ClipboardPayload) -> Result<()>;
}

/// Writes rendered fragments to a [`Clipboard`].
pub struct ClipboardPublisher<C, F = HttpFetcher> {
    clipboard: C,
    inliner: ImageInliner<F>,
}

impl<C: Clipboard> ClipboardPublisher<C, HttpFetcher> {
    pub fn new(clipboard: C) -> Self {
        Self::with_inliner(clipboard, ImageInliner::new())
    }
}

impl<C: Clipboard, F: Fetch> ClipboardPublisher<C, F> {
    pub fn with_inliner(clipboard: C, inliner: ImageInliner<F>) -> Self {
        Self { clipboard, inliner }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Copies `html` with `plain_text` as its fallback.
    ///
    /// Returns `Ok(true)` when the rich payload was written and `Ok(false)` when only
    /// plain text could be written.
    pub async fn publish(&mut self, html: &str, plain_text: &str) -> Result<bool> {
        self.publish_inner(html, plain_text, None).await
    }

    /// Like [`ClipboardPublisher::publish`], deriving the plain text from `html`.
    pub async fn publish_fragment(&mut self, html: &str) -> Result<bool> {
        let plain_text = plain_text_from_html(html);
        self.publish_inner(html, &plain_text, None).await
    }

    /// Like [`ClipboardPublisher::publish`], but nothing is written once `token` is
    /// cancelled; the call then fails with [`ClipboardError::Cancelled`].
    pub async fn publish_cancellable(
        &mut self,
        html: &str,
        plain_text: &str,
        token: &CancellationToken,
    ) -> Result<bool> {
        self.publish_inner(html, plain_text, Some(token)).await
    }

    async fn publish_inner(
        &mut self,
        html: &str,
        plain_text: &str,
        token: Option<&CancellationToken>,
    ) -> Result<bool> {
        if token.is_some_and(CancellationToken::is_cancelled) {
            return Err(ClipboardError::Cancelled);
        }

        if !self.clipboard.supports_multi_format() {
            warn!("Clipboard cannot hold HTML; copying plain text only");
            self.clipboard.write_text(plain_text).await?;
            return Ok(false);
        }

        match self.write_rich(html, plain_text, token).await {
            Ok(()) => Ok(true),
            Err(ClipboardError::Cancelled) => Err(ClipboardError::Cancelled),
            Err(e) => {
                warn!("Rich clipboard write failed ({}); falling back to plain text", e);
                self.clipboard.write_text(plain_text).await?;
                Ok(false)
            }
        }
    }

    async fn write_rich(
        &mut self,
        html: &str,
        plain_text: &str,
        token: Option<&CancellationToken>,
    ) -> Result<()> {
        let inlined = match token {
            Some(token) => self
                .inliner
                .inline_cancellable(html, token)
                .await
                .ok_or(ClipboardError::Cancelled)?,
            None => self.inliner.inline(html).await,
        };
        if token.is_some_and(CancellationToken::is_cancelled) {
            return Err(ClipboardError::Cancelled);
        }

        let payload = ClipboardPayload {
            plain_text: plain_text.to_string(),
            html: inlined,
        };
        debug!(
            "Writing {} bytes of HTML and {} bytes of text",
            payload.html.len(),
            payload.plain_text.len()
        );
        self.clipboard.write_payload(&payload).await
    }
}

fn block_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6])\s*>").expect("valid regex"))
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn blank_lines_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// A readable plain-text version of a fragment: line breaks and block ends become
/// newlines, tags are dropped and the common entities decoded.
pub fn plain_text_from_html(html: &str) -> String {
    let with_breaks = block_end_regex().replace_all(html, "\n");
    let stripped = tag_regex().replace_all(&with_breaks, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    blank_lines_regex()
        .replace_all(decoded.trim(), "\n\n")
        .into_owned()
}
