use super::quotes::{find_pair, QuoteKind};
use crate::models::{Segment, SegmentKind};

/// Breaks a paragraph into narration, speech and thought segments.
///
/// The first double-quote pair wins; only when the remaining text holds no double-quote
/// pair is the first single-quote pair used. The text on either side of the pair is
/// classified again, so every pair ends up as its own segment wherever it sits:
/// `'a' "b" 'c'` gives thought, speech, thought. Narration segments are trimmed and
/// dropped when blank. Unmatched quotes stay in narration untouched.
pub fn classify(paragraph: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = paragraph;

    loop {
        let hit = find_pair(rest, QuoteKind::Double)
            .map(|r| (r, SegmentKind::Speech))
            .or_else(|| find_pair(rest, QuoteKind::Single).map(|r| (r, SegmentKind::Thought)));

        let Some((range, kind)) = hit else {
            push_narration(&mut segments, rest);
            break;
        };

        // No double-quote pair can precede the first one, so this only finds thoughts.
        segments.extend(classify(&rest[..range.start]));
        segments.push(Segment::new(kind, &rest[range.clone()]));
        rest = &rest[range.end..];
    }

    segments
}

fn push_narration(segments: &mut Vec<Segment>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::new(SegmentKind::Narration, trimmed));
    }
}
