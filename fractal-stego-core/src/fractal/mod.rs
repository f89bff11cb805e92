//! Fractal parameters and the escape-time carrier mask.
//!
//! The embedder and the extractor never exchange the mask. Both sides
//! recompute it from the image dimensions and a [`FractalParams`] value,
//! so the parameters act as the shared secret that keeps the two in sync.
//! Mismatched parameters produce an unrelated mask and there is no way to
//! detect that from the stego image alone.

pub mod mask;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};

pub use mask::{generate_mask, generate_mask_with_cancel, CarrierMask};

/// Default iteration count used by the front ends.
pub const DEFAULT_ITERATIONS: u32 = 100;

/// Default escape radius used by the front ends.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Escape-time recurrence used to build the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FractalVariant {
    /// `z = z² + c`, with `c` taken from the pixel position.
    #[default]
    Mandelbrot,
    /// `z = z² + (-0.8 + 0.156i)`, the same constant for every pixel.
    Julia,
}

impl FractalVariant {
    /// Canonical name, as written into configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            FractalVariant::Mandelbrot => "Mandelbrot",
            FractalVariant::Julia => "Julia",
        }
    }
}

impl fmt::Display for FractalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FractalVariant {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mandelbrot" => Ok(FractalVariant::Mandelbrot),
            "julia" => Ok(FractalVariant::Julia),
            _ => Err(StegoError::UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for FractalVariant {
    type Error = StegoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<FractalVariant> for String {
    fn from(value: FractalVariant) -> Self {
        value.name().to_string()
    }
}

/// Parameters of the escape-time iteration.
///
/// Supplied identically to embedding and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Which recurrence to iterate.
    #[serde(alias = "type")]
    pub variant: FractalVariant,
    /// Maximum number of iterations per pixel. Zero marks every pixel as a carrier.
    pub iterations: u32,
    /// Escape radius: a point escapes once `|z|` exceeds it.
    pub threshold: f64,
}

impl FractalParams {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`StegoError::InvalidParameters`] if `threshold` is not a
    /// finite positive number.
    pub fn new(variant: FractalVariant, iterations: u32, threshold: f64) -> Result<Self> {
        let params = Self {
            variant,
            iterations,
            threshold,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the invariants that serde and struct literals cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(StegoError::InvalidParameters(format!(
                "threshold must be a finite positive number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            variant: FractalVariant::Mandelbrot,
            iterations: DEFAULT_ITERATIONS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
