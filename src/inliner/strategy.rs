//! The ordered conversion strategies and reference normalization.

use url::{form_urlencoded, Url};

use super::error::{InlineError, Result};

/// A third-party relay that fetches an image on our behalf.
/// `template` contains `{url}`, replaced by the percent-encoded target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    pub name: String,
    template: String,
}

impl RelayEndpoint {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }

    /// The relay URL that serves `target`.
    pub fn url_for(&self, target: &Url) -> Result<Url> {
        let encoded: String = form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
        let relay = self.template.replace("{url}", &encoded);
        Url::parse(&relay).map_err(|e| InlineError::Unresolvable(format!("{relay}: {e}")))
    }
}

/// Relays in the order they are tried.
pub fn default_relays() -> Vec<RelayEndpoint> {
    vec![
        RelayEndpoint::new("weserv", "https://images.weserv.nl/?url={url}"),
        RelayEndpoint::new("corsproxy", "https://corsproxy.io/?url={url}"),
        RelayEndpoint::new("allorigins", "https://api.allorigins.win/raw?url={url}"),
    ]
}

/// One way of turning an image URL into a data reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch the bytes and encode them as they are.
    Direct,
    /// Fetch anonymously, decode, downscale and re-encode as JPEG.
    Reencode,
    /// Fetch through a relay and encode the bytes as they are.
    Relay(RelayEndpoint),
}

impl Strategy {
    pub fn name(&self) -> &str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Reencode => "re-encode",
            Strategy::Relay(relay) => &relay.name,
        }
    }
}

/// Direct fetch, then re-encode, then every default relay.
pub fn default_strategies() -> Vec<Strategy> {
    let mut strategies = vec![Strategy::Direct, Strategy::Reencode];
    strategies.extend(default_relays().into_iter().map(Strategy::Relay));
    strategies
}

fn looks_like_host(reference: &str) -> bool {
    let host = reference.split(['/', '?', '#']).next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.contains('.')
        && !host.starts_with('.')
        && !host.ends_with('.')
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Turns an `src` value into an absolute http(s) URL.
///
/// Protocol-relative (`//host/a.png`) and bare-host (`host.com/a.png`) references become
/// `https://`. Paths are resolved against `base` when one is given.
pub fn normalize_reference(src: &str, base: Option<&Url>) -> Result<Url> {
    let src = src.trim().replace("&amp;", "&");
    if src.is_empty() {
        return Err(InlineError::Unresolvable(src));
    }

    if let Some(rest) = src.strip_prefix("//") {
        return Url::parse(&format!("https://{rest}"))
            .map_err(|e| InlineError::Unresolvable(format!("{src}: {e}")));
    }

    if let Ok(url) = Url::parse(&src) {
        return match url.scheme() {
            "http" | "https" => Ok(url),
            // `host.com:8080/a.png` parses with `host.com` as its scheme.
            _ if looks_like_host(&src) => Url::parse(&format!("https://{src}"))
                .map_err(|e| InlineError::Unresolvable(format!("{src}: {e}"))),
            scheme => Err(InlineError::Unresolvable(format!(
                "unsupported scheme `{scheme}` in {src}"
            ))),
        };
    }

    if !src.starts_with('/') && !src.starts_with('.') && looks_like_host(&src) {
        return Url::parse(&format!("https://{src}"))
            .map_err(|e| InlineError::Unresolvable(format!("{src}: {e}")));
    }

    match base {
        Some(base) => base
            .join(&src)
            .map_err(|e| InlineError::Unresolvable(format!("{src}: {e}"))),
        None => Err(InlineError::Unresolvable(src)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_absolute_urls() {
        let url = normalize_reference("https://a.com/x.png?s=1&amp;t=2", None).unwrap();
        assert_eq!(url.as_str(), "https://a.com/x.png?s=1&t=2");
    }

    #[test]
    fn protocol_relative_becomes_https() {
        let url = normalize_reference("//cdn.example.com/x.png", None).unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/x.png");
    }

    #[test]
    fn bare_host_becomes_https() {
        let url = normalize_reference("img.example.com/x.png", None).unwrap();
        assert_eq!(url.as_str(), "https://img.example.com/x.png");
    }

    #[test]
    fn bare_host_with_port_becomes_https() {
        let url = normalize_reference("img.example.com:8443/x.png", None).unwrap();
        assert_eq!(url.as_str(), "https://img.example.com:8443/x.png");
    }

    #[test]
    fn paths_need_a_base() {
        assert!(normalize_reference("/static/x.png", None).is_err());
        let base = Url::parse("https://site.org/page/").unwrap();
        let url = normalize_reference("/static/x.png", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "https://site.org/static/x.png");
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(normalize_reference("blob:https://a.com/1234", None).is_err());
        assert!(normalize_reference("javascript:alert(1)", None).is_err());
    }

    #[test]
    fn relay_encodes_the_target() {
        let relay = RelayEndpoint::new("r", "https://relay.test/?url={url}");
        let target = Url::parse("https://a.com/x.png?a=1&b=2").unwrap();
        assert_eq!(
            relay.url_for(&target).unwrap().as_str(),
            "https://relay.test/?url=https%3A%2F%2Fa.com%2Fx.png%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn default_order_is_direct_reencode_then_relays() {
        let names: Vec<String> = default_strategies().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["direct", "re-encode", "weserv", "corsproxy", "allorigins"]);
    }
}
