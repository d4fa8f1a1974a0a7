use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    has_no_text, strip_quotes,
    utils::{container_style, line_breaks_to_html, px, scaled_px, write_placeholder, Style},
    ThemeRenderer,
};
use crate::models::{Paragraph, SegmentKind, Theme, ThemeConfig};
use crate::text::{classify, Segmentation};

/// Chat layout: dialogue in left-hand bubbles with a tail, thoughts in dashed
/// right-hand bubbles, narration as small centered lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleRenderer;

impl ThemeRenderer for BubbleRenderer {
    fn theme(&self) -> Theme {
        Theme::Bubble
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

        for text in paragraphs.iter().filter_map(Paragraph::text) {
            for seg in classify(text) {
                match seg.kind {
                    SegmentKind::Narration => write_narration(&mut html, &seg.text, config)?,
                    SegmentKind::Speech => write_bubble(&mut html, &seg.text, config, Side::Left)?,
                    SegmentKind::Thought => write_bubble(&mut html, &seg.text, config, Side::Right)?,
                }
            }
        }

        html.push_str("</div>");
        Ok(html)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn write_narration(html: &mut String, text: &str, config: &ThemeConfig) -> Result<()> {
    let style = Style::new()
        .set("margin", format!("0 0 {}", px(config.paragraph_spacing)))
        .set("text-align", "center")
        .set("color", &config.narration_color)
        .set("font-size", scaled_px(config.font_size, NARRATION_SCALE));
    write!(html, r#"<p style="{}">{}</p>"#, style, line_breaks_to_html(text))?;
    Ok(())
}

/// Speech goes left in a filled bubble; thoughts go right in a dashed one.
fn write_bubble(html: &mut String, text: &str, config: &ThemeConfig, side: Side) -> Result<()> {
    let (align, fill) = match side {
        Side::Left => ("left", &config.bubble_color),
        Side::Right => ("right", &config.thought_bubble_color),
    };
    let row = Style::new()
        .set("margin", format!("0 0 {}", px(config.paragraph_spacing)))
        .set("text-align", align);

    let is_thought = side == Side::Right;
    let bubble = Style::new()
        .set("position", "relative")
        .set("display", "inline-block")
        .set("max-width", BUBBLE_MAX_WIDTH)
        .set("padding", format!("{} {}", px(BUBBLE_PADDING_Y_PX), px(BUBBLE_PADDING_X_PX)))
        .set("background", fill)
        .set("border-radius", px(config.border_radius))
        .set("text-align", "left")
        .set("color", if is_thought { &config.thought_color } else { &config.text_color })
        .set_if(is_thought, "border", format!("1px dashed {}", config.thought_color))
        .set_if(is_thought && config.italic_thoughts, "font-style", "italic")
        .set_if(!is_thought && config.bold_speech, "font-weight", "bold");

    let tail_edge = match side {
        Side::Left => "border-right",
        Side::Right => "border-left",
    };
    let tail = Style::new()
        .set("position", "absolute")
        .set("top", px(BUBBLE_PADDING_Y_PX + 2))
        .set(if side == Side::Left { "left" } else { "right" }, format!("-{}", px(BUBBLE_TAIL_PX)))
        .set("width", "0")
        .set("height", "0")
        .set("border-top", format!("{} solid transparent", px(BUBBLE_TAIL_PX)))
        .set("border-bottom", format!("{} solid transparent", px(BUBBLE_TAIL_PX)))
        .set(tail_edge, format!("{} solid {}", px(BUBBLE_TAIL_PX), fill));

    write!(
        html,
        r#"<div style="{}"><div style="{}">{}<span style="{}"></span></div></div>"#,
        row,
        bubble,
        line_breaks_to_html(strip_quotes(text)),
        tail
    )?;
    Ok(())
}
