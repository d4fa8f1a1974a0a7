//! The native clipboard, through `arboard`.

use super::{
    error::{ClipboardError, Result},
    Clipboard, ClipboardPayload,
};

/// The operating system clipboard. HTML is written together with its plain-text
/// alternative in one operation.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Clipboard for SystemClipboard {
    fn supports_multi_format(&self) -> bool {
        true
    }

    async fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)?;
        Ok(())
    }

    async fn write_payload(&mut self, payload: &ClipboardPayload) -> Result<()> {
        self.inner
            .set_html(payload.html.as_str(), Some(payload.plain_text.as_str()))?;
        Ok(())
    }
}
