//! Image decoding and lossless encoding.
//!
//! The codec works on 8-bit RGBA pixel grids. Any format the `image` crate
//! is built with can be decoded, but stego output must be written losslessly:
//! lossy re-encoding destroys the blue-channel LSBs that carry the payload.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{Result, StegoError};

/// Extensions of formats that preserve 8-bit RGBA samples exactly.
const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff", "tga", "qoi"];

/// Decode raw image bytes into an RGBA pixel grid.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| StegoError::ImageDecode(format!("Failed to decode image: {}", e)))?;
    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "Decoded image"
    );
    Ok(image.to_rgba8())
}

/// Encode an RGBA pixel grid as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| StegoError::ImageEncode(format!("Failed to encode PNG: {}", e)))?;
    Ok(output)
}

/// Write `image` to `path`, choosing the format from the extension.
///
/// # Errors
///
/// - [`StegoError::LossyFormat`] if the extension is not a lossless format
/// - [`StegoError::ImageEncode`] if encoding or writing fails
pub fn save_lossless(image: impl Into<DynamicImage>, path: &Path) -> Result<()> {
    if !is_lossless_path(path) {
        return Err(StegoError::LossyFormat(path.display().to_string()));
    }
    image
        .into()
        .save(path)
        .map_err(|e| StegoError::ImageEncode(format!("Failed to write {}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "Saved image");
    Ok(())
}

/// Whether `path` has the extension of a lossless format.
pub fn is_lossless_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            LOSSLESS_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
