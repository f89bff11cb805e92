//! Recovering a payload from a stego image.
//!
//! Extraction regenerates the carrier mask, reads the 32-bit length header
//! from the first carriers, then reads exactly `length * 8` further carrier
//! bits. There is no integrity check: the wrong parameters either trip the
//! length validation or yield garbage.

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::bits::bits_to_bytes;
use crate::cancel::CancelToken;
use crate::capacity::max_payload_bytes;
use crate::embed::BLUE;
use crate::envelope::{decode_length, LENGTH_HEADER_BITS};
use crate::error::{Result, StegoError};
use crate::fractal::{generate_mask_with_cancel, FractalParams};

/// Extract the payload hidden in `stego`.
///
/// # Errors
///
/// - [`StegoError::MissingParameters`] if `params` is `None`
/// - [`StegoError::InvalidLength`] if the decoded length is zero or larger
///   than the mask can hold
/// - [`StegoError::TruncatedExtraction`] if carrier positions run out before
///   the header or the declared payload is complete
pub fn extract(stego: &RgbaImage, params: Option<&FractalParams>) -> Result<Vec<u8>> {
    extract_with_cancel(stego, params, &CancelToken::new())
}

/// Like [`extract`], with cooperative cancellation of mask generation.
pub fn extract_with_cancel(
    stego: &RgbaImage,
    params: Option<&FractalParams>,
    cancel: &CancelToken,
) -> Result<Vec<u8>> {
    let params = params.ok_or(StegoError::MissingParameters)?;
    let (width, height) = stego.dimensions();

    let mask = generate_mask_with_cancel(width, height, params, cancel)?;
    let mut carrier_bits = mask
        .carriers()
        .map(|(x, y)| stego.get_pixel(x, y)[BLUE] & 1 == 1);

    let mut header = [false; LENGTH_HEADER_BITS as usize];
    for (read, slot) in header.iter_mut().enumerate() {
        *slot = carrier_bits
            .next()
            .ok_or(StegoError::TruncatedExtraction {
                expected: LENGTH_HEADER_BITS,
                read: read as u64,
            })?;
    }

    let length = decode_length(&header);
    let max = max_payload_bytes(&mask);
    if length == 0 || u64::from(length) > max {
        warn!(length, max, "Decoded payload length is not plausible");
        return Err(StegoError::InvalidLength { length, max });
    }
    debug!(length, "Decoded length header");

    let expected = u64::from(length) * 8;
    let data_bits: Vec<bool> = carrier_bits.take(expected as usize).collect();
    if (data_bits.len() as u64) < expected {
        return Err(StegoError::TruncatedExtraction {
            expected,
            read: data_bits.len() as u64,
        });
    }

    info!(width, height, payload_bytes = length, "Payload extracted");
    Ok(bits_to_bytes(&data_bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::FractalVariant;
    use image::Rgba;

    fn all_carriers() -> FractalParams {
        FractalParams::new(FractalVariant::Mandelbrot, 0, 2.0).unwrap()
    }

    /// Write raw bits into blue LSBs, one pixel per bit in row-major order.
    fn image_with_lsbs(width: u32, height: u32, bits: &[u8]) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        for (pixel, &bit) in img.pixels_mut().zip(bits) {
            pixel[BLUE] = bit;
        }
        img
    }

    fn length_bits(length: u32) -> Vec<u8> {
        (0..32).rev().map(|i| ((length >> i) & 1) as u8).collect()
    }

    #[test]
    fn test_missing_params() {
        let img = image_with_lsbs(8, 8, &[]);
        assert_eq!(extract(&img, None), Err(StegoError::MissingParameters));
    }

    #[test]
    fn test_zero_length_rejected() {
        let img = image_with_lsbs(10, 10, &length_bits(0));
        assert_eq!(
            extract(&img, Some(&all_carriers())),
            Err(StegoError::InvalidLength { length: 0, max: 8 })
        );
    }

    #[test]
    fn test_length_beyond_capacity_rejected() {
        // 100 carriers hold at most 8 payload bytes.
        let img = image_with_lsbs(10, 10, &length_bits(9));
        assert_eq!(
            extract(&img, Some(&all_carriers())),
            Err(StegoError::InvalidLength { length: 9, max: 8 })
        );
    }

    #[test]
    fn test_too_few_carriers_for_header() {
        let img = image_with_lsbs(5, 5, &[]);
        assert_eq!(
            extract(&img, Some(&all_carriers())),
            Err(StegoError::TruncatedExtraction {
                expected: 32,
                read: 25
            })
        );
    }

    #[test]
    fn test_reads_payload_after_header() {
        let mut bits = length_bits(2);
        bits.extend([0, 1, 0, 0, 1, 0, 0, 0]); // 'H'
        bits.extend([0, 1, 1, 0, 1, 0, 0, 1]); // 'i'
        let img = image_with_lsbs(7, 7, &bits);
        assert_eq!(extract(&img, Some(&all_carriers())).unwrap(), b"Hi");
    }

    #[test]
    fn test_ignores_non_blue_channels() {
        let mut bits = length_bits(1);
        bits.extend([1, 1, 1, 1, 0, 0, 0, 0]);
        let mut img = image_with_lsbs(7, 7, &bits);
        for pixel in img.pixels_mut() {
            pixel[0] = 0xFF;
            pixel[1] = 0x01;
            pixel[3] = 0x81;
        }
        assert_eq!(extract(&img, Some(&all_carriers())).unwrap(), vec![0xF0]);
    }
}
