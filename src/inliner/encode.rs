//! Byte-level conversions: MIME detection, data references and the JPEG re-encode.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ExtendedColorType};

use super::{
    error::{InlineError, Result},
    fetch::Fetched,
};

/// Builds a `data:` reference for `bytes`.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// The image MIME type of a response: the `Content-Type` header when it names an
/// image, otherwise whatever the bytes look like.
pub fn image_mime(fetched: &Fetched) -> Option<String> {
    let declared = fetched
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"));

    declared.or_else(|| {
        image::guess_format(&fetched.bytes)
            .ok()
            .map(|format| format.to_mime_type().to_string())
    })
}

/// Encodes a fetched image as a data reference, keeping its original format.
pub fn to_data_url(fetched: &Fetched) -> Result<String> {
    if fetched.bytes.is_empty() {
        return Err(InlineError::NotAnImage("empty body".to_string()));
    }
    match image_mime(fetched) {
        Some(mime) => Ok(data_url(&mime, &fetched.bytes)),
        None => Err(InlineError::NotAnImage(
            fetched.content_type.clone().unwrap_or_else(|| "unknown".to_string()),
        )),
    }
}

/// Decodes `bytes`, shrinks the image so neither side exceeds `max_dimension`
/// (aspect ratio kept, never enlarged) and encodes it as JPEG.
pub fn reencode_jpeg(bytes: &[u8], max_dimension: u32, quality: u8) -> Result<Vec<u8>> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > max_dimension || img.height() > max_dimension {
        img.resize(max_dimension, max_dimension, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    let mut enc = JpegEncoder::new_with_quality(&mut out, quality);
    enc.encode(&rgb, rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn header_mime_wins_over_sniffing() {
        let fetched = Fetched {
            bytes: png(2, 2),
            content_type: Some("image/x-custom; charset=binary".into()),
        };
        assert_eq!(image_mime(&fetched).as_deref(), Some("image/x-custom"));
    }

    #[test]
    fn sniffs_when_header_is_generic() {
        let fetched = Fetched {
            bytes: png(2, 2),
            content_type: Some("application/octet-stream".into()),
        };
        assert!(to_data_url(&fetched).unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn html_pages_are_rejected() {
        let fetched = Fetched {
            bytes: b"<html>denied</html>".to_vec(),
            content_type: Some("text/html".into()),
        };
        assert!(matches!(to_data_url(&fetched), Err(InlineError::NotAnImage(_))));
    }

    #[test]
    fn reencode_downscales_preserving_aspect_ratio() {
        let jpeg = reencode_jpeg(&png(400, 100), 200, 80).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 50));
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn reencode_never_upscales() {
        let jpeg = reencode_jpeg(&png(30, 20), 200, 80).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn reencode_rejects_garbage() {
        assert!(matches!(
            reencode_jpeg(b"not an image", 100, 80),
            Err(InlineError::Codec(_))
        ));
    }
}
