//! Fixed strings and sizes used by the theme templates.

/// Shown as the only paragraph when there is no content to render.
pub const EMPTY_CONTENT_PROMPT: &str =
    "No content provided. Type something in the content box to generate a log.";

/// Chat bubbles never grow wider than this share of the container.
pub const BUBBLE_MAX_WIDTH: &str = "78%";
/// Size of the bubble tail triangle in px.
pub const BUBBLE_TAIL_PX: u32 = 8;
/// Horizontal padding inside bubbles and pills in px.
pub const BUBBLE_PADDING_X_PX: u32 = 14;
/// Vertical padding inside bubbles and pills in px.
pub const BUBBLE_PADDING_Y_PX: u32 = 9;
/// Pills are fully rounded regardless of the configured radius.
pub const PILL_RADIUS: &str = "999px";
/// Narration in the chat themes is set slightly smaller than dialogue.
pub const NARRATION_SCALE: f32 = 0.9;
/// First-line indent when `indent` is enabled.
pub const INDENT: &str = "2em";
/// Height of a spacer produced by a blank line, in line-heights.
pub const SPACER_LINES: f32 = 1.0;
