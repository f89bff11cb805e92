//! Carrier capacity accounting.
//!
//! Capacity is measured in carrier positions of the generated mask, not in
//! raw pixels: only carriers hold payload bits, so the pixel count can both
//! over- and under-state what actually fits.

use serde::Serialize;

use crate::envelope::LENGTH_HEADER_BITS;
use crate::error::{Result, StegoError};
use crate::fractal::CarrierMask;

/// Number of carrier positions in `mask`.
pub fn carrier_count(mask: &CarrierMask) -> u64 {
    mask.carrier_count()
}

/// Carrier bits needed to embed a payload of `payload_len` bytes,
/// including the 32-bit length header.
pub fn required_bits(payload_len: usize) -> u64 {
    LENGTH_HEADER_BITS + 8 * payload_len as u64
}

/// Largest payload, in bytes, that fits in `mask`.
pub fn max_payload_bytes(mask: &CarrierMask) -> u64 {
    carrier_count(mask).saturating_sub(LENGTH_HEADER_BITS) / 8
}

/// Check that a payload of `payload_len` bytes fits in `mask`.
///
/// # Errors
///
/// Returns [`StegoError::CapacityExceeded`] when the mask has fewer carrier
/// positions than [`required_bits`].
pub fn validate(mask: &CarrierMask, payload_len: usize) -> Result<()> {
    let required = required_bits(payload_len);
    let available = carrier_count(mask);
    if available < required {
        return Err(StegoError::CapacityExceeded {
            required,
            available,
        });
    }
    Ok(())
}

/// Capacity summary of an image under a given mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    /// Carrier positions in the mask
    pub carriers: u64,
    /// Largest payload that can be embedded, in bytes
    pub max_payload_bytes: u64,
}

impl CapacityReport {
    pub fn from_mask(mask: &CarrierMask) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            carriers: carrier_count(mask),
            max_payload_bytes: max_payload_bytes(mask),
        }
    }

    /// Share of pixels that are carriers, in `[0, 1]`.
    pub fn carrier_ratio(&self) -> f64 {
        let pixels = self.width as u64 * self.height as u64;
        if pixels == 0 {
            0.0
        } else {
            self.carriers as f64 / pixels as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::{generate_mask, FractalParams, FractalVariant};

    fn full_mask(width: u32, height: u32) -> CarrierMask {
        let params = FractalParams::new(FractalVariant::Mandelbrot, 0, 2.0).unwrap();
        generate_mask(width, height, &params).unwrap()
    }

    #[test]
    fn test_required_bits_includes_header() {
        assert_eq!(required_bits(0), 32);
        assert_eq!(required_bits(13), 136);
        assert_eq!(required_bits(2500), 20_032);
    }

    #[test]
    fn test_validate_boundary() {
        // 10x10 all-carrier mask: 100 bits = 32 header + 8 bytes + 4 spare bits
        let mask = full_mask(10, 10);
        assert_eq!(max_payload_bytes(&mask), 8);
        assert!(validate(&mask, 8).is_ok());
        assert_eq!(
            validate(&mask, 9),
            Err(StegoError::CapacityExceeded {
                required: 104,
                available: 100
            })
        );
    }

    #[test]
    fn test_max_payload_below_header() {
        let mask = full_mask(5, 5);
        assert_eq!(max_payload_bytes(&mask), 0);
        assert!(validate(&mask, 0).is_err());
    }

    #[test]
    fn test_report() {
        let report = CapacityReport::from_mask(&full_mask(8, 8));
        assert_eq!(report.carriers, 64);
        assert_eq!(report.max_payload_bytes, 4);
        assert_eq!(report.carrier_ratio(), 1.0);
    }
}
