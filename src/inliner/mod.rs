//! Best-effort inlining of `<img>` references as base64 data references, so a copied
//! fragment carries its images with it.
//!
//! Each reference goes through an ordered list of [`Strategy`] values and the first one
//! that succeeds wins:
//! 1. `data:` references are left untouched (no request is made).
//! 2. The reference is normalized to an absolute `https://` URL.
//! 3. [`Strategy::Direct`]: fetch and encode the bytes as they are.
//! 4. [`Strategy::Reencode`]: fetch anonymously, downscale and re-encode as JPEG.
//! 5. [`Strategy::Relay`]: fetch through each third-party relay in turn.
//! 6. When everything fails the original reference is kept.
//!
//! Inlining never fails as a whole; the finished fragment is passed through
//! [`clean_fragment`].

mod cleanup;
mod encode;
mod error;
mod fetch;
mod strategy;

pub use cleanup::clean_fragment;
pub use encode::{data_url, reencode_jpeg};
pub use error::{InlineError, Result};
pub use fetch::{Fetch, FetchMode, Fetched, HttpFetcher};
pub use strategy::{default_relays, default_strategies, normalize_reference, RelayEndpoint, Strategy};

use log::{debug, info, warn};
use std::collections::HashMap;
use url::Url;

use crate::cancel::CancellationToken;
use cleanup::{collect_image_sources, replace_image_sources};

/// Largest width or height of a re-encoded image, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1600;
/// JPEG quality used by the re-encode strategy.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Rewrites the images of an HTML fragment into data references.
pub struct ImageInliner<F = HttpFetcher> {
    fetcher: F,
    strategies: Vec<Strategy>,
    base_url: Option<Url>,
    max_dimension: u32,
    jpeg_quality: u8,
}

impl ImageInliner<HttpFetcher> {
    /// An inliner using `reqwest` and the default strategy chain.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }
}

impl Default for ImageInliner<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetch> ImageInliner<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            strategies: default_strategies(),
            base_url: None,
            max_dimension: DEFAULT_MAX_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Replaces the strategy chain. Order is the order of attempts.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Base for resolving path-only references such as `/img/a.png`.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Inlines every image it can and returns the cleaned fragment.
    /// Images that cannot be converted keep their original reference.
    pub async fn inline(&self, html: &str) -> String {
        match self.run(html, None).await {
            Some(out) => out,
            None => html.to_string(),
        }
    }

    /// Like [`ImageInliner::inline`], but stops as soon as `token` is cancelled and
    /// returns `None` so a stale result is never used.
    pub async fn inline_cancellable(&self, html: &str, token: &CancellationToken) -> Option<String> {
        self.run(html, Some(token)).await
    }

    async fn run(&self, html: &str, token: Option<&CancellationToken>) -> Option<String> {
        let cancelled = || token.is_some_and(CancellationToken::is_cancelled);

        let sources = collect_image_sources(html);
        let mut replacements = HashMap::new();
        for src in sources {
            if cancelled() {
                debug!("Image inlining cancelled");
                return None;
            }
            if src.starts_with("data:") {
                continue;
            }
            if let Some(data) = self.convert(&src).await {
                replacements.insert(src, data);
            }
        }
        if cancelled() {
            return None;
        }

        if !replacements.is_empty() {
            info!("Inlined {} image reference(s)", replacements.len());
        }
        let rewritten = if replacements.is_empty() {
            html.to_string()
        } else {
            replace_image_sources(html, &replacements)
        };
        Some(clean_fragment(&rewritten))
    }

    /// Converts one reference into a data reference, or `None` when every strategy failed.
    pub async fn convert(&self, src: &str) -> Option<String> {
        if src.starts_with("data:") {
            return Some(src.to_string());
        }
        let url = match normalize_reference(src, self.base_url.as_ref()) {
            Ok(url) => url,
            Err(e) => {
                warn!("Keeping image reference {}: {}", src, e);
                return None;
            }
        };

        for strategy in &self.strategies {
            match self.attempt(strategy, &url).await {
                Ok(data) => {
                    debug!("Inlined {} via {}", url, strategy.name());
                    return Some(data);
                }
                Err(e) => debug!("Strategy {} failed for {}: {}", strategy.name(), url, e),
            }
        }

        warn!("All strategies failed for {}; keeping the original reference", url);
        None
    }

    async fn attempt(&self, strategy: &Strategy, url: &Url) -> Result<String> {
        match strategy {
            Strategy::Direct => {
                let fetched = self.fetcher.fetch(url, FetchMode::Direct).await?;
                encode::to_data_url(&fetched)
            }
            Strategy::Reencode => {
                let fetched = self.fetcher.fetch(url, FetchMode::Anonymous).await?;
                let jpeg = reencode_jpeg(&fetched.bytes, self.max_dimension, self.jpeg_quality)?;
                Ok(data_url("image/jpeg", &jpeg))
            }
            Strategy::Relay(relay) => {
                let relay_url = relay.url_for(url)?;
                let fetched = self.fetcher.fetch(&relay_url, FetchMode::Direct).await?;
                encode::to_data_url(&fetched)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Serves canned responses and records every request.
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        responses: HashMap<(String, FetchMode), Fetched>,
        pub(crate) calls: RefCell<Vec<(String, FetchMode)>>,
    }

    impl FakeFetcher {
        pub(crate) fn respond(mut self, url: &str, mode: FetchMode, bytes: Vec<u8>, ct: &str) -> Self {
            self.responses.insert(
                (url.to_string(), mode),
                Fetched {
                    bytes,
                    content_type: Some(ct.to_string()),
                },
            );
            self
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &Url, mode: FetchMode) -> Result<Fetched> {
            self.calls.borrow_mut().push((url.to_string(), mode));
            self.responses
                .get(&(url.to_string(), mode))
                .cloned()
                .ok_or(InlineError::Status(404))
        }
    }

    pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([10, 120, 200]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    const IMG: &str = "https://img.test/a.png";

    #[tokio::test]
    async fn data_references_pass_through_without_requests() {
        let inliner = ImageInliner::with_fetcher(FakeFetcher::default());
        let html = r#"<p>hi <img src="data:image/png;base64,iVBORw0KGgo="></p>"#;
        assert_eq!(inliner.inline(html).await, html);
        assert!(inliner.fetcher.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn direct_fetch_keeps_the_original_format() {
        let fetcher = FakeFetcher::default().respond(IMG, FetchMode::Direct, png(4, 4), "image/png");
        let inliner = ImageInliner::with_fetcher(fetcher);
        let out = inliner.inline(&format!(r#"<img src="{IMG}">"#)).await;
        assert!(out.starts_with(r#"<img src="data:image/png;base64,"#));
        assert_eq!(inliner.fetcher.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn reencode_runs_when_direct_fetch_fails() {
        let fetcher =
            FakeFetcher::default().respond(IMG, FetchMode::Anonymous, png(300, 150), "image/png");
        let inliner = ImageInliner::with_fetcher(fetcher).with_max_dimension(100);
        let out = inliner.inline(&format!(r#"<img src="{IMG}">"#)).await;

        let prefix = r#"<img src="data:image/jpeg;base64,"#;
        assert!(out.starts_with(prefix));
        let b64 = out[prefix.len()..].trim_end_matches("\">");
        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[tokio::test]
    async fn relays_are_tried_in_order() {
        let relay_url = default_relays()[1].url_for(&Url::parse(IMG).unwrap()).unwrap();
        let fetcher =
            FakeFetcher::default().respond(relay_url.as_str(), FetchMode::Direct, png(2, 2), "image/png");
        let inliner = ImageInliner::with_fetcher(fetcher);
        let out = inliner.inline(&format!(r#"<img src="{IMG}">"#)).await;
        assert!(out.contains("data:image/png;base64,"));

        let calls = inliner.fetcher.calls.borrow();
        let modes: Vec<FetchMode> = calls.iter().map(|(_, m)| *m).collect();
        assert_eq!(
            modes,
            [FetchMode::Direct, FetchMode::Anonymous, FetchMode::Direct, FetchMode::Direct]
        );
        assert!(calls[2].0.starts_with("https://images.weserv.nl/"));
        assert_eq!(calls[3].0, relay_url.as_str());
    }

    #[tokio::test]
    async fn failed_images_keep_their_reference() {
        let inliner = ImageInliner::with_fetcher(FakeFetcher::default());
        let html = format!(r#"<p>a&nbsp;b</p><img src="{IMG}">"#);
        let out = inliner.inline(&html).await;
        assert_eq!(out, format!(r#"<p>a b</p><img src="{IMG}">"#));
        assert_eq!(inliner.fetcher.calls.borrow().len(), 5);
    }

    #[tokio::test]
    async fn repeated_references_are_fetched_once() {
        let fetcher = FakeFetcher::default().respond(IMG, FetchMode::Direct, png(2, 2), "image/png");
        let inliner = ImageInliner::with_fetcher(fetcher);
        let out = inliner
            .inline(&format!(r#"<img src="{IMG}"><img src="{IMG}">"#))
            .await;
        assert_eq!(out.matches("data:image/png").count(), 2);
        assert_eq!(inliner.fetcher.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn protocol_relative_references_are_fetched_over_https() {
        let inliner = ImageInliner::with_fetcher(FakeFetcher::default())
            .with_strategies(vec![Strategy::Direct]);
        inliner.inline(r#"<img src="//img.test/a.png">"#).await;
        assert_eq!(inliner.fetcher.calls.borrow()[0].0, IMG);
    }

    #[tokio::test]
    async fn cancelled_inlining_returns_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let inliner = ImageInliner::with_fetcher(FakeFetcher::default());
        let out = inliner
            .inline_cancellable(&format!(r#"<img src="{IMG}">"#), &token)
            .await;
        assert!(out.is_none());
        assert!(inliner.fetcher.calls.borrow().is_empty());
    }
}
