//! Validation of uploaded images. A valid upload is returned as a base64 data
//! reference; nothing is stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inliner::data_url;

/// Uploads larger than this are rejected.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Validation failures. Every variant maps to HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file uploaded")]
    NoFile,
    #[error("Only image files are allowed")]
    InvalidType(String),
    #[error("File size too large")]
    TooLarge { size: usize, limit: usize },
}

impl UploadError {
    pub fn status_code(&self) -> u16 {
        400
    }

    /// The structured error body returned to the caller.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": self.to_string(),
        })
    }
}

/// A file as received from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The response for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub data_url: String,
    pub file_name: String,
    pub size: usize,
    pub content_type: String,
}

/// Checks the file and encodes it as a data reference.
pub fn encode_upload(file: &UploadedFile) -> Result<UploadResponse, UploadError> {
    if file.bytes.is_empty() {
        return Err(UploadError::NoFile);
    }

    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !content_type.starts_with("image/") {
        return Err(UploadError::InvalidType(file.content_type.clone()));
    }

    let size = file.bytes.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    log::info!("Accepted upload {} ({} bytes, {})", file.file_name, size, content_type);
    Ok(UploadResponse {
        success: true,
        data_url: data_url(&content_type, &file.bytes),
        file_name: file.file_name.clone(),
        size,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: "avatar.png".into(),
            content_type: content_type.into(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn accepts_small_images() {
        let response = encode_upload(&file("image/png", 3)).unwrap();
        assert_eq!(response.data_url, "data:image/png;base64,AAAA");
        assert_eq!(response.size, 3);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["dataUrl"], "data:image/png;base64,AAAA");
        assert_eq!(json["fileName"], "avatar.png");
    }

    #[test]
    fn rejects_oversized_files() {
        let err = encode_upload(&file("image/png", 6 * 1024 * 1024)).unwrap_err();
        assert_eq!(err.to_string(), "File size too large");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json()["error"], "File size too large");
    }

    #[test]
    fn accepts_exactly_the_limit() {
        assert!(encode_upload(&file("image/jpeg", MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn rejects_non_images() {
        let err = encode_upload(&file("application/pdf", 10)).unwrap_err();
        assert_eq!(err, UploadError::InvalidType("application/pdf".into()));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn rejects_empty_uploads() {
        assert_eq!(encode_upload(&file("image/png", 0)), Err(UploadError::NoFile));
    }
}
