//! Escape-time carrier mask generation.
//!
//! # Algorithm
//!
//! Every pixel `(x, y)` is mapped onto the complex plane:
//!
//! ```text
//! nx = x / width  * 3.5 - 2.5
//! ny = y / height * 2.0 - 1.0
//! c  = nx + ny·i
//! ```
//!
//! Starting from `z = 0`, the recurrence of the chosen [`FractalVariant`] is
//! applied up to `iterations` times, stopping as soon as `|z| > threshold`.
//! A pixel is a carrier iff it survived every iteration. With
//! `iterations = 0` no step runs, so every pixel is a carrier.
//!
//! All arithmetic is plain IEEE-754 `f64` with `|z|` computed by `hypot`,
//! so independent implementations agree bit-for-bit.
//!
//! Scanlines are independent and are computed in parallel when the
//! `parallel` feature is enabled. The mask itself is always stored
//! row-major, which is the order the embedder and extractor consume it in.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use image::{GrayImage, Luma};
use tracing::debug;

use super::{FractalParams, FractalVariant};
use crate::cancel::CancelToken;
use crate::error::{Result, StegoError};

/// Fixed constant added at every Julia step.
pub const JULIA_CONSTANT: (f64, f64) = (-0.8, 0.156);

/// Row-major boolean grid marking which pixels may carry one payload bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl CarrierMask {
    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether pixel `(x, y)` is a carrier, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Number of carrier positions.
    pub fn carrier_count(&self) -> u64 {
        self.cells.iter().filter(|&&cell| cell).count() as u64
    }

    /// Carrier positions as `(x, y)`, in row-major order (`y` outer, `x` inner).
    ///
    /// This order is the implicit addressing scheme of the embedded bitstream.
    pub fn carriers(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// The raw row-major cells.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Render the mask as a grayscale image: white for carriers, black otherwise.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(x, y).unwrap_or(false) {
                Luma([255])
            } else {
                Luma([0])
            }
        })
    }
}

/// Generate the carrier mask for an image of the given dimensions.
///
/// Pure and deterministic: identical arguments always yield identical masks.
///
/// # Errors
///
/// - [`StegoError::InvalidDimensions`] if either dimension is zero
/// - [`StegoError::InvalidParameters`] if the threshold is not a finite positive number
pub fn generate_mask(width: u32, height: u32, params: &FractalParams) -> Result<CarrierMask> {
    generate_mask_with_cancel(width, height, params, &CancelToken::new())
}

/// Like [`generate_mask`], checking `cancel` before every scanline.
///
/// # Errors
///
/// Additionally returns [`StegoError::Cancelled`] once `cancel` is triggered.
pub fn generate_mask_with_cancel(
    width: u32,
    height: u32,
    params: &FractalParams,
    cancel: &CancelToken,
) -> Result<CarrierMask> {
    if width == 0 || height == 0 {
        return Err(StegoError::InvalidDimensions { width, height });
    }
    params.validate()?;

    let row_len = width as usize;
    let len = row_len
        .checked_mul(height as usize)
        .ok_or(StegoError::InvalidDimensions { width, height })?;
    let mut cells = vec![false; len];

    let fill_row = |(y, row): (usize, &mut [bool])| -> Result<()> {
        cancel.check()?;
        let ny = y as f64 / height as f64 * 2.0 - 1.0;
        for (x, cell) in row.iter_mut().enumerate() {
            let nx = x as f64 / width as f64 * 3.5 - 2.5;
            *cell = escape_count(nx, ny, params) == params.iterations;
        }
        Ok(())
    };

    #[cfg(feature = "parallel")]
    cells
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each(fill_row)?;

    #[cfg(not(feature = "parallel"))]
    cells.chunks_mut(row_len).enumerate().try_for_each(fill_row)?;

    let mask = CarrierMask {
        width,
        height,
        cells,
    };

    debug!(
        width,
        height,
        variant = %params.variant,
        iterations = params.iterations,
        threshold = params.threshold,
        carriers = mask.carrier_count(),
        "Generated carrier mask"
    );

    Ok(mask)
}

/// Number of completed iterations before `|z|` exceeded the threshold.
///
/// Returns `params.iterations` when the point never escaped.
fn escape_count(nx: f64, ny: f64, params: &FractalParams) -> u32 {
    let (c_re, c_im) = match params.variant {
        FractalVariant::Mandelbrot => (nx, ny),
        FractalVariant::Julia => JULIA_CONSTANT,
    };

    let (mut z_re, mut z_im) = (0.0f64, 0.0f64);
    let mut completed = 0;
    while completed < params.iterations {
        let re = z_re * z_re - z_im * z_im + c_re;
        let im = z_re * z_im + z_im * z_re + c_im;
        z_re = re;
        z_im = im;
        if z_re.hypot(z_im) > params.threshold {
            break;
        }
        completed += 1;
    }
    completed
}
