use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    has_no_text, strip_quotes,
    utils::{container_style, line_breaks_to_html, px, write_placeholder, Style},
    ThemeRenderer,
};
use crate::models::{Paragraph, SegmentKind, Theme, ThemeConfig};
use crate::text::{classify, Segmentation};

/// Chat layout with gradient pills for dialogue, outlined pills for thoughts and
/// plain paragraphs for narration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PillRenderer;

impl ThemeRenderer for PillRenderer {
    fn theme(&self) -> Theme {
        Theme::Pill
    }

    fn segmentation(&self) -> Segmentation {
        Segmentation::Blocks
    }

    fn render(&self, paragraphs: &[Paragraph], config: &ThemeConfig) -> Result<String> {
        let mut html = String::new();
        write!(html, r#"<div style="{}">"#, container_style(config))?;

        if has_no_text(paragraphs) {
            write_placeholder(&mut html, config)?;
            html.push_str("</div>");
            return Ok(html);
        }

        let row_margin = format!("0 0 {}", px(config.paragraph_spacing));
        let pill_padding = format!("{} {}", px(BUBBLE_PADDING_Y_PX), px(BUBBLE_PADDING_X_PX));

        for text in paragraphs.iter().filter_map(Paragraph::text) {
            for seg in classify(text) {
                match seg.kind {
                    SegmentKind::Narration => {
                        let style = Style::new()
                            .set("margin", &row_margin)
                            .set("color", &config.narration_color)
                            .set_if(config.indent, "text-indent", INDENT);
                        write!(html, r#"<p style="{}">{}</p>"#, style, line_breaks_to_html(&seg.text))?;
                    }
                    SegmentKind::Speech => {
                        let row = Style::new().set("margin", &row_margin).set("text-align", "left");
                        let pill = Style::new()
                            .set("display", "inline-block")
                            .set("max-width", BUBBLE_MAX_WIDTH)
                            .set("padding", &pill_padding)
                            .set("border-radius", PILL_RADIUS)
                            .set(
                                "background",
                                format!(
                                    "linear-gradient(135deg, {} 0%, {} 100%)",
                                    config.gradient_start, config.gradient_end
                                ),
                            )
                            .set("color", "#ffffff")
                            .set_if(config.bold_speech, "font-weight", "bold");
                        write!(
                            html,
                            r#"<div style="{}"><span style="{}">{}</span></div>"#,
                            row,
                            pill,
                            line_breaks_to_html(strip_quotes(&seg.text))
                        )?;
                    }
                    SegmentKind::Thought => {
                        let row = Style::new().set("margin", &row_margin).set("text-align", "right");
                        let pill = Style::new()
                            .set("display", "inline-block")
                            .set("max-width", BUBBLE_MAX_WIDTH)
                            .set("padding", &pill_padding)
                            .set("border-radius", PILL_RADIUS)
                            .set("border", format!("1px solid {}", config.gradient_end))
                            .set("color", &config.thought_color)
                            .set("text-align", "left")
                            .set_if(config.italic_thoughts, "font-style", "italic");
                        write!(
                            html,
                            r#"<div style="{}"><span style="{}">{}</span></div>"#,
                            row,
                            pill,
                            line_breaks_to_html(strip_quotes(&seg.text))
                        )?;
                    }
                }
            }
        }

        html.push_str("</div>");
        Ok(html)
    }
}
