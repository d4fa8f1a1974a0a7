use regex::Regex;
use std::sync::OnceLock;

use super::quotes::{find_pair, QuoteKind, INLINE_ELEMENTS};

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

/// Inline regions that already carry styling and must not be wrapped again.
fn styled_region_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = INLINE_ELEMENTS.join("|");
        Regex::new(&format!(r"(?is)<(?:{names})\b[^>]*>.*?</(?:{names})\s*>")).expect("valid regex")
    })
}

/// Token delimiters already present in the input; stashed first so they restore verbatim.
fn token_char_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[\u{E000}\u{E001}]").expect("valid regex"))
}

fn bare_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[A-Za-z/!][^>]*>").expect("valid regex"))
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("\u{E000}(\\d+)\u{E001}").expect("valid regex"))
}

/// Holds protected fragments while the text is scanned for quotes.
#[derive(Default)]
struct Stash {
    fragments: Vec<String>,
}

impl Stash {
    fn token(&mut self, fragment: String) -> String {
        self.fragments.push(fragment);
        format!("{}{}{}", TOKEN_OPEN, self.fragments.len() - 1, TOKEN_CLOSE)
    }

    fn protect(&mut self, text: &str, re: &Regex) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in re.find_iter(text) {
            out.push_str(&text[last..m.start()]);
            let token = self.token(m.as_str().to_string());
            out.push_str(&token);
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }

    /// Replaces every token with its fragment. A fragment only refers to fragments
    /// stashed before it, so the recursion ends; restored text is never rescanned.
    fn restore(&self, text: &str) -> String {
        token_regex()
            .replace_all(text, |caps: &regex::Captures| {
                match caps[1].parse::<usize>().ok().and_then(|idx| self.fragments.get(idx)) {
                    Some(fragment) => self.restore(fragment),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Wraps quoted spans in styled `<span>` markers.
///
/// Double-quoted spans get emphasis A (dialogue), single-quoted spans get emphasis B
/// (thoughts). Regions that are already tagged are left alone, which makes the
/// highlighter idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteHighlighter {
    speech_style: String,
    thought_style: String,
}

impl QuoteHighlighter {
    /// `speech_style` and `thought_style` are inline CSS declarations.
    pub fn new(speech_style: impl Into<String>, thought_style: impl Into<String>) -> Self {
        Self {
            speech_style: speech_style.into(),
            thought_style: thought_style.into(),
        }
    }

    pub fn highlight(&self, text: &str) -> String {
        let mut stash = Stash::default();
        let protected = stash.protect(text, token_char_regex());
        let protected = stash.protect(&protected, styled_region_regex());
        let protected = stash.protect(&protected, bare_tag_regex());

        let with_speech = self.wrap_all(&protected, QuoteKind::Double, &mut stash);
        let with_thoughts = self.wrap_all(&with_speech, QuoteKind::Single, &mut stash);

        stash.restore(&with_thoughts)
    }

    fn wrap_all(&self, text: &str, kind: QuoteKind, stash: &mut Stash) -> String {
        let (marker, style) = match kind {
            QuoteKind::Double => ("a", &self.speech_style),
            QuoteKind::Single => ("b", &self.thought_style),
        };
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(range) = find_pair(rest, kind) {
            out.push_str(&rest[..range.start]);
            let wrapped = format!(
                r#"<span data-emphasis="{}" style="{}">{}</span>"#,
                marker,
                style,
                &rest[range.clone()]
            );
            // The wrapped span is stashed right away so later scans cannot see into it.
            let token = stash.token(wrapped);
            out.push_str(&token);
            rest = &rest[range.end..];
        }
        out.push_str(rest);
        out
    }
}
