//! Steganographic algorithm selection.
//!
//! Algorithms form a closed set. Each variant implements the same
//! capabilities (`embed`, `extract`, `name`) and dispatch is an exhaustive
//! `match`, so adding an algorithm means adding a variant and its arms.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capacity::CapacityReport;
use crate::config::StegoConfig;
use crate::error::{Result, StegoError};
use crate::fractal::generate_mask;
use crate::{embed, extract};

/// Available steganographic algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Algorithm {
    /// Blue-channel LSB embedding at escape-time fractal carrier positions.
    #[default]
    Fractal,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 1] = [Algorithm::Fractal];

    /// Human-readable algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fractal => "Fractal",
        }
    }

    /// Hide `payload` in a copy of `cover`.
    pub fn embed(
        &self,
        cover: &RgbaImage,
        payload: &[u8],
        config: &StegoConfig,
    ) -> Result<RgbaImage> {
        match self {
            Algorithm::Fractal => {
                log_unused_rate(config);
                embed::embed(cover, payload, config.fractal_params.as_ref())
            }
        }
    }

    /// Recover the payload hidden in `stego`.
    pub fn extract(&self, stego: &RgbaImage, config: &StegoConfig) -> Result<Vec<u8>> {
        match self {
            Algorithm::Fractal => {
                log_unused_rate(config);
                extract::extract(stego, config.fractal_params.as_ref())
            }
        }
    }

    /// How much payload an image of the given size can hold.
    pub fn capacity(&self, width: u32, height: u32, config: &StegoConfig) -> Result<CapacityReport> {
        match self {
            Algorithm::Fractal => {
                let params = config
                    .fractal_params
                    .as_ref()
                    .ok_or(StegoError::MissingParameters)?;
                let mask = generate_mask(width, height, params)?;
                Ok(CapacityReport::from_mask(&mask))
            }
        }
    }
}

fn log_unused_rate(config: &StegoConfig) {
    debug!(
        embedding_rate = config.embedding_rate,
        "Embedding rate is not used by the fractal codec"
    );
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StegoError::UnknownAlgorithm(s.to_string()))
    }
}
