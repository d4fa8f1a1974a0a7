//! Quote-pair detection shared by the highlighter and the paragraph classifier.

use std::ops::Range;

/// The two quote families that get their own emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteKind {
    /// `"..."` or `“...”`: dialogue.
    Double,
    /// `'...'` or `‘...’`: thoughts.
    Single,
}

impl QuoteKind {
    /// The closing character for `open`, if `open` starts a quote of this kind.
    fn closing(self, open: char) -> Option<char> {
        match (self, open) {
            (QuoteKind::Double, '"') => Some('"'),
            (QuoteKind::Double, '\u{201C}') => Some('\u{201D}'),
            (QuoteKind::Single, '\'') => Some('\''),
            (QuoteKind::Single, '\u{2018}') => Some('\u{2019}'),
            _ => None,
        }
    }

    /// Single quotes double as apostrophes, so they only count at word boundaries.
    fn word_bounded(self) -> bool {
        self == QuoteKind::Single
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric()
}

/// Inline elements whose content belongs to the author's own formatting.
pub(super) const INLINE_ELEMENTS: [&str; 10] =
    ["span", "strong", "b", "em", "i", "u", "mark", "font", "code", "a"];

/// Lowercased name of the tag starting at `i` (after `<` or `</`), if any.
fn tag_name(chars: &[(usize, char)], i: usize) -> Option<String> {
    let name: String = chars
        .get(i..)?
        .iter()
        .map(|&(_, c)| c)
        .take_while(char::is_ascii_alphanumeric)
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}

/// If an inline element opens at `i` and is closed later in `chars`, returns the index
/// of the `>` ending its closing tag. Nested elements of the same name are counted.
fn skip_element(chars: &[(usize, char)], i: usize) -> Option<usize> {
    let open_end = skip_tag(chars, i)?;
    let name = tag_name(chars, i + 1)?;
    if !INLINE_ELEMENTS.contains(&name.as_str()) || chars[open_end - 1].1 == '/' {
        return None;
    }
    let mut depth = 1usize;
    let mut j = open_end + 1;
    while j < chars.len() {
        let Some(end) = skip_tag(chars, j) else {
            j += 1;
            continue;
        };
        if chars[j + 1].1 == '/' {
            if tag_name(chars, j + 2).as_deref() == Some(name.as_str()) {
                depth -= 1;
                if depth == 0 {
                    return Some(end);
                }
            }
        } else if tag_name(chars, j + 1).as_deref() == Some(name.as_str()) {
            depth += 1;
        }
        j = end + 1;
    }
    None
}

/// Index of the last character covered by the tag or inline element starting at `i`.
fn skip_markup(chars: &[(usize, char)], i: usize) -> Option<usize> {
    skip_element(chars, i).or_else(|| skip_tag(chars, i))
}

/// If a markup tag starts at `i`, returns the index of its closing `>`.
fn skip_tag(chars: &[(usize, char)], i: usize) -> Option<usize> {
    if chars[i].1 != '<' {
        return None;
    }
    let next = chars.get(i + 1)?.1;
    if !(next.is_ascii_alphabetic() || next == '/' || next == '!') {
        return None;
    }
    chars[i + 1..]
        .iter()
        .position(|&(_, c)| c == '>')
        .map(|offset| i + 1 + offset)
}

fn find_close(chars: &[(usize, char)], from: usize, close: char, kind: QuoteKind) -> Option<usize> {
    let mut j = from;
    while j < chars.len() {
        let ch = chars[j].1;
        if ch == '\n' {
            return None;
        }
        if let Some(end) = skip_markup(chars, j) {
            j = end + 1;
            continue;
        }
        if ch == close {
            if j == from {
                // Empty quotes never form a pair.
                return None;
            }
            let followed_by_word = chars.get(j + 1).is_some_and(|&(_, c)| is_word(c));
            if !kind.word_bounded() || !followed_by_word {
                return Some(j);
            }
        }
        j += 1;
    }
    None
}

/// Finds the first quote pair of `kind` in `text` and returns its byte range,
/// quote characters included.
///
/// Matching is non-greedy and never crosses a newline. Text inside markup tags is
/// skipped, so attribute values are not mistaken for quotes, and a closed inline
/// element counts as one unit: a pair never starts or ends inside one. An opening quote with
/// no partner on its line is ignored and scanning continues after it.
pub fn find_pair(text: &str, kind: QuoteKind) -> Option<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;
    while i < chars.len() {
        if let Some(end) = skip_markup(&chars, i) {
            i = end + 1;
            continue;
        }
        let (start, ch) = chars[i];
        if let Some(close) = kind.closing(ch) {
            let after_word = i > 0 && is_word(chars[i - 1].1);
            if !kind.word_bounded() || !after_word {
                if let Some(j) = find_close(&chars, i + 1, close, kind) {
                    let (pos, c) = chars[j];
                    return Some(start..pos + c.len_utf8());
                }
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(text: &'a str, kind: QuoteKind) -> Option<&'a str> {
        find_pair(text, kind).map(|r| &text[r])
    }

    #[test]
    fn finds_double_quotes_non_greedy() {
        assert_eq!(
            first(r#"He said "hello" and "bye"."#, QuoteKind::Double),
            Some(r#""hello""#)
        );
    }

    #[test]
    fn typographic_quotes_pair_up() {
        assert_eq!(first("She said “fine”.", QuoteKind::Double), Some("“fine”"));
        assert_eq!(first("He wondered ‘why’.", QuoteKind::Single), Some("‘why’"));
    }

    #[test]
    fn pairs_do_not_cross_lines() {
        assert_eq!(first("\"open\nclose\"", QuoteKind::Double), None);
    }

    #[test]
    fn unbalanced_quote_is_ignored() {
        assert_eq!(first(r#"Nothing "here"#, QuoteKind::Double), None);
    }

    #[test]
    fn apostrophes_are_not_quotes() {
        assert_eq!(first("I can't and won't.", QuoteKind::Single), None);
        assert_eq!(
            first("'I can't go' she thought", QuoteKind::Single),
            Some("'I can't go'")
        );
    }

    #[test]
    fn tags_are_skipped() {
        let text = r#"<span style="color:red">x</span> plain"#;
        assert_eq!(first(text, QuoteKind::Double), None);
    }

    #[test]
    fn quotes_inside_inline_elements_are_skipped() {
        assert_eq!(first(r#"<b>"Hi"</b> there"#, QuoteKind::Double), None);
        assert_eq!(
            first(r#"<em>a <em>"x"</em></em> "y""#, QuoteKind::Double),
            Some(r#""y""#)
        );
        assert_eq!(
            first(r#""Hi <b>you</b>" she said"#, QuoteKind::Double),
            Some(r#""Hi <b>you</b>""#)
        );
    }

    #[test]
    fn unclosed_or_void_tags_only_skip_themselves() {
        assert_eq!(first(r#"<b>"Hi" there"#, QuoteKind::Double), Some(r#""Hi""#));
        assert_eq!(first(r#"<br/>"Hi""#, QuoteKind::Double), Some(r#""Hi""#));
    }

    #[test]
    fn empty_quotes_are_not_a_pair() {
        assert_eq!(first(r#""" then "x""#, QuoteKind::Double), Some(r#"" then ""#));
    }
}
