//! Finding and swapping `<img>` references, and the structural cleanup run on the
//! final fragment.

use indexmap::IndexSet;
use lol_html::html_content::ContentType;
use lol_html::{doc_text, element, rewrite_str, RewriteStrSettings};
use log::warn;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn inter_tag_whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">(\s+)<").expect("valid regex"))
}

fn nbsp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)&amp;nbsp;|&nbsp;|&#160;|&#x0*a0;|\u{00A0}").expect("valid regex")
    })
}

fn zero_width_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)&#8203;|&#x200b;|&zwnj;|&zwj;|[\u{200B}\u{200C}\u{200D}\u{FEFF}]")
            .expect("valid regex")
    })
}

/// Every distinct `src` of an `<img>` in `html`, in document order.
pub(crate) fn collect_image_sources(html: &str) -> IndexSet<String> {
    let mut sources = IndexSet::new();
    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img[src]", |el| {
                if let Some(src) = el.get_attribute("src") {
                    let src = src.trim();
                    if !src.is_empty() {
                        sources.insert(src.to_string());
                    }
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );
    if let Err(e) = result {
        warn!("Could not parse fragment while collecting images: {}", e);
    }
    sources
}

/// Points every `<img>` whose `src` is a key of `replacements` at the mapped value.
/// A `srcset` on a replaced image is dropped so it cannot override the new source.
pub(crate) fn replace_image_sources(html: &str, replacements: &HashMap<String, String>) -> String {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img[src]", |el| {
                let replacement = el
                    .get_attribute("src")
                    .and_then(|src| replacements.get(src.trim()));
                if let Some(data) = replacement {
                    el.set_attribute("src", data)?;
                    el.remove_attribute("srcset");
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .unwrap_or_else(|e| {
        warn!("Could not rewrite image sources: {}", e);
        html.to_string()
    })
}

/// Structural cleanup of a finished fragment.
///
/// Whitespace between tags that spans a line break is removed and other runs shrink to
/// one space. In text nodes, non-breaking spaces (raw or as entities, including the
/// double-escaped `&amp;nbsp;`) become plain spaces and zero-width characters are dropped.
pub fn clean_fragment(html: &str) -> String {
    let collapsed = inter_tag_whitespace_regex().replace_all(html, |caps: &regex::Captures| {
        if caps[1].contains('\n') {
            "><".to_string()
        } else {
            "> <".to_string()
        }
    });

    rewrite_str(
        &collapsed,
        RewriteStrSettings {
            document_content_handlers: vec![doc_text!(|chunk| {
                let cleaned = {
                    let text = chunk.as_str();
                    if !nbsp_regex().is_match(text) && !zero_width_regex().is_match(text) {
                        return Ok(());
                    }
                    let spaced = nbsp_regex().replace_all(text, " ");
                    zero_width_regex().replace_all(&spaced, "").into_owned()
                };
                chunk.replace(&cleaned, ContentType::Html);
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
    .unwrap_or_else(|e| {
        warn!("Could not clean fragment: {}", e);
        collapsed.into_owned()
    })
}
