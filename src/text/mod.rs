//! The string-level stages of the pipeline: word replacement, quote detection,
//! quote highlighting, paragraph segmentation and paragraph classification.
//!
//! Everything here is synchronous and pure over its inputs.

mod classify;
mod highlight;
mod quotes;
mod replace;
mod segment;

pub use classify::classify;
pub use highlight::QuoteHighlighter;
pub use quotes::{find_pair, QuoteKind};
pub use replace::apply_replacements;
pub use segment::{segment, split_blocks, split_lines, Segmentation};
