//! Distortion and correlation statistics between a cover and a stego image.
//!
//! These metrics describe how visible an embedding is; they play no part in
//! embed or extract correctness. Only the R, G and B channels are compared.

use image::RgbaImage;
use serde::Serialize;

use crate::error::{Result, StegoError};

/// Quality metrics for a pair of equally sized images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    /// Mean squared error, averaged over the R, G and B channels.
    pub mse: f64,
    /// Peak signal-to-noise ratio in dB; infinite for identical images.
    pub psnr: f64,
    /// Pearson correlation of the red channels.
    pub correlation_r: f64,
    /// Pearson correlation of the green channels.
    pub correlation_g: f64,
    /// Pearson correlation of the blue channels.
    pub correlation_b: f64,
    /// Mean of the three channel correlations.
    pub correlation_avg: f64,
}

/// Running sums for one channel pair.
#[derive(Default)]
struct ChannelStats {
    squared_error: f64,
    sum_a: f64,
    sum_b: f64,
    sum_a_sq: f64,
    sum_b_sq: f64,
    sum_ab: f64,
}

impl ChannelStats {
    fn push(&mut self, a: u8, b: u8) {
        let (a, b) = (f64::from(a), f64::from(b));
        let diff = a - b;
        self.squared_error += diff * diff;
        self.sum_a += a;
        self.sum_b += b;
        self.sum_a_sq += a * a;
        self.sum_b_sq += b * b;
        self.sum_ab += a * b;
    }

    fn mse(&self, n: f64) -> f64 {
        self.squared_error / n
    }

    /// Pearson correlation; `NaN` when either channel is constant.
    fn correlation(&self, n: f64) -> f64 {
        let numerator = n * self.sum_ab - self.sum_a * self.sum_b;
        let denominator = ((n * self.sum_a_sq - self.sum_a * self.sum_a)
            * (n * self.sum_b_sq - self.sum_b * self.sum_b))
            .sqrt();
        numerator / denominator
    }
}

impl QualityMetrics {
    /// Compare `original` against `stego`.
    ///
    /// # Errors
    ///
    /// - [`StegoError::DimensionMismatch`] if the images differ in size
    /// - [`StegoError::InvalidDimensions`] if the images are empty
    pub fn compare(original: &RgbaImage, stego: &RgbaImage) -> Result<Self> {
        let (width, height) = original.dimensions();
        if stego.dimensions() != (width, height) {
            let (right_width, right_height) = stego.dimensions();
            return Err(StegoError::DimensionMismatch {
                left_width: width,
                left_height: height,
                right_width,
                right_height,
            });
        }
        if width == 0 || height == 0 {
            return Err(StegoError::InvalidDimensions { width, height });
        }

        let mut channels: [ChannelStats; 3] = Default::default();
        for (a, b) in original.pixels().zip(stego.pixels()) {
            for (channel, stats) in channels.iter_mut().enumerate() {
                stats.push(a[channel], b[channel]);
            }
        }

        let n = f64::from(width) * f64::from(height);
        let mse = channels.iter().map(|c| c.mse(n)).sum::<f64>() / 3.0;
        let psnr = if mse == 0.0 {
            f64::INFINITY
        } else {
            20.0 * (255.0 / mse.sqrt()).log10()
        };
        let [correlation_r, correlation_g, correlation_b] =
            [0, 1, 2].map(|i| channels[i].correlation(n));

        Ok(Self {
            mse,
            psnr,
            correlation_r,
            correlation_g,
            correlation_b,
            correlation_avg: (correlation_r + correlation_g + correlation_b) / 3.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 11) as u8, ((x + y) * 5) as u8, 255])
        })
    }

    #[test]
    fn test_identical_images() {
        let img = gradient(20, 20);
        let metrics = QualityMetrics::compare(&img, &img).unwrap();
        assert_eq!(metrics.mse, 0.0);
        assert!(metrics.psnr.is_infinite());
        assert!((metrics.correlation_avg - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_lsb_flip() {
        let original = gradient(10, 10);
        let mut stego = original.clone();
        stego.get_pixel_mut(0, 0)[2] ^= 1;

        let metrics = QualityMetrics::compare(&original, &stego).unwrap();
        // One unit of error in one of 300 samples.
        assert!((metrics.mse - 1.0 / 300.0).abs() < 1e-12);
        let expected_psnr = 20.0 * (255.0 / (1.0f64 / 300.0).sqrt()).log10();
        assert!((metrics.psnr - expected_psnr).abs() < 1e-9);
        assert!((metrics.correlation_r - 1.0).abs() < 1e-12);
        assert!(metrics.correlation_b < 1.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = QualityMetrics::compare(&gradient(4, 4), &gradient(4, 5)).unwrap_err();
        assert!(matches!(err, StegoError::DimensionMismatch { .. }));
    }
}
