//! Embedding a payload into a cover image.
//!
//! # Process
//!
//! 1. Regenerate the carrier mask from the cover dimensions.
//! 2. Check that the envelope fits the mask's carrier count.
//! 3. Walk the pixels row-major and, at each carrier, replace the blue
//!    channel's least-significant bit with the next envelope bit.
//!
//! Red, green, alpha and the upper seven bits of blue are never touched, and
//! carriers past the end of the envelope keep their original value.

use image::RgbaImage;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::capacity;
use crate::envelope;
use crate::error::{Result, StegoError};
use crate::fractal::{generate_mask_with_cancel, FractalParams};

/// Index of the channel that carries payload bits.
pub(crate) const BLUE: usize = 2;

/// Embed `payload` into a copy of `cover`.
///
/// The cover is never mutated; on any error nothing is returned.
///
/// # Errors
///
/// - [`StegoError::MissingParameters`] if `params` is `None`
/// - [`StegoError::CapacityExceeded`] if the payload does not fit the mask
/// - [`StegoError::InvalidParameters`] / [`StegoError::InvalidDimensions`] from mask generation
pub fn embed(
    cover: &RgbaImage,
    payload: &[u8],
    params: Option<&FractalParams>,
) -> Result<RgbaImage> {
    embed_with_cancel(cover, payload, params, &CancelToken::new())
}

/// Like [`embed`], with cooperative cancellation of mask generation.
pub fn embed_with_cancel(
    cover: &RgbaImage,
    payload: &[u8],
    params: Option<&FractalParams>,
    cancel: &CancelToken,
) -> Result<RgbaImage> {
    let params = params.ok_or(StegoError::MissingParameters)?;
    let (width, height) = cover.dimensions();

    let mask = generate_mask_with_cancel(width, height, params, cancel)?;
    capacity::validate(&mask, payload.len())?;

    let stream = envelope::encode(payload)?;
    let mut stego = cover.clone();

    for ((x, y), bit) in mask.carriers().zip(stream.iter()) {
        let pixel = stego.get_pixel_mut(x, y);
        pixel[BLUE] = (pixel[BLUE] & 0xFE) | u8::from(*bit);
    }

    debug!(
        bits = stream.len(),
        carriers = mask.carrier_count(),
        "Wrote envelope into carrier positions"
    );
    info!(width, height, payload_bytes = payload.len(), "Payload embedded");

    Ok(stego)
}
