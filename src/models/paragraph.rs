/// A unit of content produced by paragraph segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    /// Text content. May contain `\n` when the line-preserving policy grouped several lines.
    Text(String),
    /// A blank line kept as a visual spacer (line-preserving policy only).
    Spacer,
}

impl Paragraph {
    pub fn text(&self) -> Option<&str> {
        match self {
            Paragraph::Text(t) => Some(t),
            Paragraph::Spacer => None,
        }
    }
}

/// How a piece of a paragraph is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Plain narration, outside any quote pair.
    Narration,
    /// A double-quoted span (spoken dialogue, emphasis A).
    Speech,
    /// A single-quoted span (internal thought, emphasis B).
    Thought,
}

/// A classified slice of a paragraph. Quote characters are kept in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
