use regex::Regex;
use std::sync::OnceLock;

use crate::models::Paragraph;

/// Paragraph splitting policies. Each theme picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmentation {
    /// Split on blank lines and drop empty units. Used by the card-style chat themes.
    Blocks,
    /// Keep manual line breaks; every blank line becomes a spacer. Used by the bookmarklet theme.
    Lines,
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n\s*").expect("valid regex"))
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits `text` on blank-line separators. Runs of blank lines count as one separator,
/// and units are trimmed; empty units are dropped.
pub fn split_blocks(text: &str) -> Vec<String> {
    let normalized = normalize_newlines(text);
    blank_run_regex()
        .split(&normalized)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits `text` on single newlines, grouping consecutive non-blank lines into one
/// paragraph (joined with `\n`) and turning each inner blank line into a
/// [`Paragraph::Spacer`]. Blank lines at the very start and end are dropped.
pub fn split_lines(text: &str) -> Vec<Paragraph> {
    let normalized = normalize_newlines(text);
    let lines: Vec<&str> = normalized.split('\n').map(str::trim_end).collect();

    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for &line in &lines[first..=last] {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(Paragraph::Text(current.join("\n")));
                current.clear();
            }
            paragraphs.push(Paragraph::Spacer);
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(Paragraph::Text(current.join("\n")));
    }
    paragraphs
}

/// Splits `text` with the given policy.
pub fn segment(text: &str, policy: Segmentation) -> Vec<Paragraph> {
    match policy {
        Segmentation::Blocks => split_blocks(text).into_iter().map(Paragraph::Text).collect(),
        Segmentation::Lines => split_lines(text),
    }
}
