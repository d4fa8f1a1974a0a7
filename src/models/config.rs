use serde::{Deserialize, Serialize};

use super::replacement::WordReplacement;

/// Everything a renderer needs: the content, the word replacements and the styling scalars.
/// Missing fields fall back to the stock palette when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    /// Raw log text as typed by the user.
    pub content: String,
    /// Ordered find/replace rules applied before segmentation.
    pub word_replacements: Vec<WordReplacement>,

    /// CSS font stack.
    pub font_family: String,
    /// Base font size in px.
    pub font_size: u32,
    /// Unitless line height multiplier.
    pub line_height: f32,

    pub text_color: String,
    pub background_color: String,
    /// Color of narration blocks in the chat themes.
    pub narration_color: String,
    /// Emphasis A: double-quoted dialogue.
    pub speech_color: String,
    /// Emphasis B: single-quoted thoughts.
    pub thought_color: String,
    /// Fill of speech bubbles (bubble theme).
    pub bubble_color: String,
    /// Fill of thought bubbles (bubble theme).
    pub thought_bubble_color: String,
    /// Gradient stops of the speech pill (pill theme).
    pub gradient_start: String,
    pub gradient_end: String,

    /// Container width in px.
    pub container_width: u32,
    /// Container padding in px.
    pub container_padding: u32,
    /// Vertical gap between paragraphs in px.
    pub paragraph_spacing: u32,
    /// Corner radius of containers and bubbles in px.
    pub border_radius: u32,
    /// CSS `box-shadow` value. Empty disables the shadow.
    pub box_shadow: String,

    pub bold_speech: bool,
    pub italic_thoughts: bool,
    /// Indent the first line of narration paragraphs.
    pub indent: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            word_replacements: Vec::new(),
            font_family: "-apple-system, BlinkMacSystemFont, 'Segoe UI', 'PingFang SC', sans-serif"
                .to_string(),
            font_size: 15,
            line_height: 1.8,
            text_color: "#333333".to_string(),
            background_color: "#ffffff".to_string(),
            narration_color: "#888888".to_string(),
            speech_color: "#2b6cb0".to_string(),
            thought_color: "#805ad5".to_string(),
            bubble_color: "#e8f4fd".to_string(),
            thought_bubble_color: "#f5f0ff".to_string(),
            gradient_start: "#667eea".to_string(),
            gradient_end: "#764ba2".to_string(),
            container_width: 680,
            container_padding: 24,
            paragraph_spacing: 12,
            border_radius: 12,
            box_shadow: "0 2px 12px rgba(0, 0, 0, 0.08)".to_string(),
            bold_speech: false,
            italic_thoughts: true,
            indent: false,
        }
    }
}

impl ThemeConfig {
    /// Default styling around the given content.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }
}
