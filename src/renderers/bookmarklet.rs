use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    has_no_text, paragraph_kind,
    utils::{container_style, highlighter_for, line_breaks_to_html, px, write_placeholder, Style},
    ThemeRenderer,
};
use crate::models::{Paragraph, SegmentKind, Theme, ThemeConfig};
use crate::text::Segmentation;

/// A single container with one `<p>` per paragraph. Dialogue and thoughts are
/// highlighted in place; blank lines survive as spacers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookmarkletRenderer;

impl ThemeRenderer for BookmarkletRenderer {
    fn theme(&self) -> Theme {
        Theme::Bookmarklet
    }

    fn segmentation(&self) -> Segmentation {
        Segmentation::Lines
    }

    fn render(&self, paragraphs: &[Paragraph], config: &ThemeConfig) -> Result<String> {
        let mut html = String::new();
        write!(html, r#"<div style="{}">"#, container_style(config))?;

        if has_no_text(paragraphs) {
            write_placeholder(&mut html, config)?;
            html.push_str("</div>");
            return Ok(html);
        }

        let highlighter = highlighter_for(config);
        for paragraph in paragraphs {
            match paragraph {
                Paragraph::Spacer => {
                    let style = Style::new()
                        .set("height", format!("{}em", SPACER_LINES * config.line_height))
                        .set("margin", "0");
                    write!(html, r#"<div style="{}"></div>"#, style)?;
                }
                Paragraph::Text(text) => {
                    let kind = paragraph_kind(text);
                    // Dialogue and thought lines start flush; only narration is indented.
                    let indented = config.indent && kind == SegmentKind::Narration;
                    let style = Style::new()
                        .set("margin", format!("0 0 {}", px(config.paragraph_spacing)))
                        .set_if(indented, "text-indent", INDENT);
                    let body = line_breaks_to_html(&highlighter.highlight(text));
                    write!(html, r#"<p style="{}">{}</p>"#, style, body)?;
                }
            }
        }

        html.push_str("</div>");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::render_theme;

    fn render(content: &str, config: ThemeConfig) -> String {
        render_theme(
            Theme::Bookmarklet,
            &ThemeConfig {
                content: content.into(),
                ..config
            },
        )
        .unwrap()
    }

    #[test]
    fn keeps_manual_line_breaks_and_spacers() {
        let html = render("line one\nline two\n\nnext", ThemeConfig::default());
        assert!(html.contains("line one<br>line two</p>"));
        assert_eq!(html.matches("<p ").count(), 2);
        assert!(html.contains(r#"<div style="height:1.8em;margin:0"></div>"#));
    }

    #[test]
    fn highlights_dialogue_with_configured_color() {
        let config = ThemeConfig {
            speech_color: "#ff0000".into(),
            ..Default::default()
        };
        let html = render(r#"He said "hello" and left."#, config);
        assert!(html.contains(r#"<span data-emphasis="a" style="color:#ff0000">"hello"</span>"#));
    }

    #[test]
    fn indent_applies_to_narration_only() {
        let config = ThemeConfig {
            indent: true,
            ..Default::default()
        };
        let html = render("Plain line.\n\n\"Talking.\"", config);
        assert_eq!(html.matches("text-indent:2em").count(), 1);
    }

    #[test]
    fn container_uses_config_sizes() {
        let config = ThemeConfig {
            container_width: 500,
            container_padding: 10,
            ..Default::default()
        };
        let html = render("x", config);
        assert!(html.starts_with("<div style=\""));
        assert!(html.contains("max-width:500px"));
        assert!(html.contains("padding:10px"));
        assert!(html.ends_with("</div>"));
    }
}
