//! Raster image transforms: PNG to lossy WebP and WebP to lossless PNG.

use std::io::Cursor;

use image::ImageFormat;

use super::TransformError;

/// Quality level for lossy WebP encoding (0-100).
const WEBP_QUALITY: f32 = 85.0;

/// Encoder effort setting (0 = fast, 6 = slower but smaller).
const WEBP_METHOD: i32 = 4;

/// Decode a PNG and re-encode it as lossy WebP.
///
/// The image is normalized to RGBA before encoding, so palette and grayscale
/// PNGs come out the same as truecolor ones.
pub fn png_to_webp(bytes: &[u8]) -> Result<Vec<Vec<u8>>, TransformError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| TransformError::Invalid(format!("invalid PNG data: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut config = webp::WebPConfig::new()
        .map_err(|_| TransformError::Internal("failed to initialize WebP encoder".into()))?;
    config.lossless = 0;
    config.quality = WEBP_QUALITY;
    config.method = WEBP_METHOD;

    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| TransformError::Invalid(format!("WebP encoding failed: {e:?}")))?;

    Ok(vec![encoded.to_vec()])
}

/// Decode a WebP image and re-encode it as PNG.
///
/// PNG encoding is lossless and keeps the decoded pixel format as-is.
pub fn webp_to_png(bytes: &[u8]) -> Result<Vec<Vec<u8>>, TransformError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::WebP)
        .map_err(|e| TransformError::Invalid(format!("invalid WebP data: {e}")))?;

    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| TransformError::Internal(format!("PNG encoding failed: {e}")))?;

    Ok(vec![buffer])
}
