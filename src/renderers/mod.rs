//! Renders log content into pre-styled HTML fragments for pasting into external editors.
//!
//! The entry point is [`render_theme`], which runs the whole text pipeline:
//! word replacement, paragraph segmentation (policy chosen by the theme) and the
//! theme template itself.
//!
//! # Themes
//! *   `bookmarklet`: one container, paragraphs with highlighted dialogue and thoughts,
//!     manual line breaks and blank lines preserved.
//! *   `bubble`: chat layout. Dialogue in left bubbles with a tail, thoughts in dashed
//!     right bubbles, narration centered between them.
//! *   `pill`: chat layout. Dialogue in gradient pills, thoughts in outlined pills,
//!     narration as plain paragraphs.
//!
//! All styling is inline so the fragment survives being pasted into rich-text editors.

mod bookmarklet;
mod bubble;
pub mod constants;
mod error;
mod pill;
pub mod utils;

pub use bookmarklet::BookmarkletRenderer;
pub use bubble::BubbleRenderer;
pub use error::{RenderError, Result};
pub use pill::PillRenderer;

use log::debug;

use crate::models::{Paragraph, SegmentKind, Theme, ThemeConfig};
use crate::text::{apply_replacements, classify, segment, Segmentation};

/// One visual convention for turning paragraphs into markup.
pub trait ThemeRenderer {
    fn theme(&self) -> Theme;

    /// How content is split into paragraphs before it reaches [`ThemeRenderer::render`].
    fn segmentation(&self) -> Segmentation;

    /// Renders the paragraphs into a finished fragment. An empty slice (or one holding
    /// only spacers) yields a single placeholder paragraph.
    fn render(&self, paragraphs: &[Paragraph], config: &ThemeConfig) -> Result<String>;
}

/// Returns the renderer for `theme`.
pub fn renderer_for(theme: Theme) -> Box<dyn ThemeRenderer> {
    match theme {
        Theme::Bookmarklet => Box::new(BookmarkletRenderer),
        Theme::Bubble => Box::new(BubbleRenderer),
        Theme::Pill => Box::new(PillRenderer),
    }
}

/// Runs the full pipeline for `config.content` and returns the HTML fragment.
pub fn render_theme(theme: Theme, config: &ThemeConfig) -> Result<String> {
    if config.font_size == 0 {
        return Err(RenderError::InvalidConfig("fontSize must be at least 1".to_string()));
    }
    let renderer = renderer_for(theme);
    let content = apply_replacements(&config.content, &config.word_replacements);
    let paragraphs = segment(&content, renderer.segmentation());
    debug!(
        "Rendering {} paragraph(s) with the {} theme",
        paragraphs.len(),
        renderer.theme()
    );
    renderer.render(&paragraphs, config)
}

/// The block-level kind of a whole paragraph: speech if it holds dialogue, otherwise
/// thought if it holds a thought, otherwise narration.
pub fn paragraph_kind(text: &str) -> SegmentKind {
    let segments = classify(text);
    if segments.iter().any(|s| s.kind == SegmentKind::Speech) {
        SegmentKind::Speech
    } else if segments.iter().any(|s| s.kind == SegmentKind::Thought) {
        SegmentKind::Thought
    } else {
        SegmentKind::Narration
    }
}

/// True when nothing but spacers would be rendered.
pub(crate) fn has_no_text(paragraphs: &[Paragraph]) -> bool {
    paragraphs.iter().all(|p| p.text().is_none())
}

/// Drops the surrounding quote characters of a speech or thought segment.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordReplacement;
    use crate::renderers::constants::EMPTY_CONTENT_PROMPT;

    #[test]
    fn empty_content_renders_one_placeholder_for_every_theme() {
        for theme in Theme::ALL {
            for content in ["", "   \n\n \t"] {
                let html = render_theme(theme, &ThemeConfig::with_content(content)).unwrap();
                assert_eq!(html.matches(EMPTY_CONTENT_PROMPT).count(), 1, "{theme}");
                assert_eq!(html.matches("<p").count(), 1, "{theme}");
            }
        }
    }

    #[test]
    fn replacements_run_before_rendering() {
        let config = ThemeConfig {
            content: "NAME waved.".into(),
            word_replacements: vec![WordReplacement::new("NAME", "Mira")],
            ..Default::default()
        };
        for theme in Theme::ALL {
            let html = render_theme(theme, &config).unwrap();
            assert!(html.contains("Mira waved."), "{theme}");
            assert!(!html.contains("NAME"), "{theme}");
        }
    }

    #[test]
    fn renderer_for_matches_the_theme() {
        for theme in Theme::ALL {
            assert_eq!(renderer_for(theme).theme(), theme);
        }
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let config = ThemeConfig {
            font_size: 0,
            ..ThemeConfig::with_content("x")
        };
        assert!(matches!(
            render_theme(Theme::Pill, &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn paragraph_kind_prefers_dialogue() {
        assert_eq!(paragraph_kind(r#"'hm' and "yes""#), SegmentKind::Speech);
        assert_eq!(paragraph_kind("He thought 'no'."), SegmentKind::Thought);
        assert_eq!(paragraph_kind("Quiet."), SegmentKind::Narration);
    }

    #[test]
    fn strip_quotes_handles_multibyte() {
        assert_eq!(strip_quotes("“hi”"), "hi");
        assert_eq!(strip_quotes("'x'"), "x");
        assert_eq!(strip_quotes("\""), "\"");
    }
}
