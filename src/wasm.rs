//! Browser bindings. Every export takes and returns plain strings (configuration as
//! JSON) so the page script needs no generated glue types.

use wasm_bindgen::prelude::*;

use crate::errors::Result;
use crate::models::{Theme, ThemeConfig};
use crate::renderers::{render_theme, utils::highlighter_for};
use crate::upload::{encode_upload, UploadedFile};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (hot reload) just keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn parse_config(config_json: &str) -> Result<ThemeConfig> {
    if config_json.trim().is_empty() {
        return Ok(ThemeConfig::default());
    }
    Ok(serde_json::from_str(config_json)?)
}

fn render_json(theme: &str, config_json: &str) -> Result<String> {
    let theme: Theme = theme.parse()?;
    let config = parse_config(config_json)?;
    Ok(render_theme(theme, &config)?)
}

fn highlight_json(text: &str, config_json: &str) -> Result<String> {
    let config = parse_config(config_json)?;
    Ok(highlighter_for(&config).highlight(text))
}

fn upload_json(file_name: &str, content_type: &str, bytes: &[u8]) -> std::result::Result<String, String> {
    let file = UploadedFile {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        bytes: bytes.to_vec(),
    };
    match encode_upload(&file) {
        Ok(response) => serde_json::to_string(&response).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_json().to_string()),
    }
}

/// Renders `configJson` with the named theme and returns the HTML fragment.
#[wasm_bindgen(js_name = renderLog)]
pub fn render_log(theme: &str, config_json: &str) -> std::result::Result<String, JsValue> {
    render_json(theme, config_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Highlights the quotes of `text` with the emphasis styles of `configJson`.
#[wasm_bindgen(js_name = highlightQuotes)]
pub fn highlight_quotes(text: &str, config_json: &str) -> std::result::Result<String, JsValue> {
    highlight_json(text, config_json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Validates an uploaded image. Resolves to the JSON response, rejects with the JSON
/// error body.
#[wasm_bindgen(js_name = validateUpload)]
pub fn validate_upload(
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> std::result::Result<String, JsValue> {
    upload_json(file_name, content_type, bytes).map_err(|e| JsValue::from_str(&e))
}
