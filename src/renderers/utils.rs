//! Helpers shared by the theme templates: inline style building, escaping and
//! the common text styles derived from a [`ThemeConfig`].

use indexmap::IndexMap;
use std::fmt::{self, Write};

use super::{constants::*, error::Result};
use crate::models::ThemeConfig;
use crate::text::QuoteHighlighter;

// --- Escaping ---

/// Escapes a value placed inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Turns manual line breaks in paragraph content into `<br>` tags.
/// Content is author markup and is otherwise passed through as is.
pub fn line_breaks_to_html(text: &str) -> String {
    text.replace('\n', "<br>")
}

// --- Inline styles ---

/// An ordered set of CSS declarations rendered as a `style` attribute value.
/// Setting a property twice keeps its first position and the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    props: IndexMap<&'static str, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, prop: &'static str, value: impl ToString) -> Self {
        self.props.insert(prop, value.to_string());
        self
    }

    pub fn set_if(self, condition: bool, prop: &'static str, value: impl ToString) -> Self {
        if condition {
            self.set(prop, value)
        } else {
            self
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prop, value)) in self.props.iter().enumerate() {
            if i > 0 {
                f.write_char(';')?;
            }
            write!(f, "{}:{}", prop, escape_attr(value))?;
        }
        Ok(())
    }
}

pub fn px(value: u32) -> String {
    format!("{}px", value)
}

/// Scaled font size in px, rounded to one decimal.
pub fn scaled_px(value: u32, scale: f32) -> String {
    let scaled = (value as f32 * scale * 10.0).round() / 10.0;
    format!("{}px", scaled)
}

// --- Styles derived from the configuration ---

/// Font and color settings every theme starts from.
pub fn base_text_style(config: &ThemeConfig) -> Style {
    Style::new()
        .set("font-family", &config.font_family)
        .set("font-size", px(config.font_size))
        .set("line-height", config.line_height)
        .set("color", &config.text_color)
}

/// The outer box: width, padding, background, radius and the optional shadow.
pub fn container_style(config: &ThemeConfig) -> Style {
    base_text_style(config)
        .set("box-sizing", "border-box")
        .set("max-width", px(config.container_width))
        .set("margin", "0 auto")
        .set("padding", px(config.container_padding))
        .set("background", &config.background_color)
        .set("border-radius", px(config.border_radius))
        .set_if(!config.box_shadow.trim().is_empty(), "box-shadow", config.box_shadow.trim())
}

/// Emphasis A, applied to dialogue.
pub fn speech_emphasis(config: &ThemeConfig) -> Style {
    Style::new()
        .set("color", &config.speech_color)
        .set_if(config.bold_speech, "font-weight", "bold")
}

/// Emphasis B, applied to thoughts.
pub fn thought_emphasis(config: &ThemeConfig) -> Style {
    Style::new()
        .set("color", &config.thought_color)
        .set_if(config.italic_thoughts, "font-style", "italic")
}

/// A highlighter using the configured emphasis styles.
pub fn highlighter_for(config: &ThemeConfig) -> QuoteHighlighter {
    QuoteHighlighter::new(
        speech_emphasis(config).to_string(),
        thought_emphasis(config).to_string(),
    )
}

/// Writes the single paragraph shown when there is nothing to render.
pub fn write_placeholder(out: &mut String, config: &ThemeConfig) -> Result<()> {
    let style = Style::new()
        .set("margin", "0")
        .set("text-align", "center")
        .set("color", &config.narration_color);
    write!(out, r#"<p style="{}">{}</p>"#, style, EMPTY_CONTENT_PROMPT)?;
    Ok(())
}
