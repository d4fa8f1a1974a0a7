//! Plain data types shared by the text pipeline, the renderers and the browser bindings.

pub mod config;
pub mod paragraph;
pub mod replacement;
pub mod theme;

pub use config::ThemeConfig;
pub use paragraph::{Paragraph, Segment, SegmentKind};
pub use replacement::WordReplacement;
pub use theme::Theme;
