//! The network seam of the inliner. [`HttpFetcher`] is the production
//! implementation; tests plug in their own [`Fetch`].

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use super::error::{InlineError, Result};

/// How a request should look to the remote server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMode {
    /// A plain request for the resource.
    Direct,
    /// An anonymous image request, the way an `<img crossorigin="anonymous">` loads it.
    Anonymous,
}

/// A downloaded resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    /// The `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
}

/// Downloads image bytes.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &Url, mode: FetchMode) -> Result<Fetched>;
}

/// [`Fetch`] backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuses an existing client (connection pool, proxy settings, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url, mode: FetchMode) -> Result<Fetched> {
        let mut request = self.client.get(url.as_str());
        if mode == FetchMode::Anonymous {
            request = request.header(ACCEPT, "image/avif,image/webp,image/apng,image/*,*/*;q=0.8");
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InlineError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(Fetched {
            bytes,
            content_type,
        })
    }
}
