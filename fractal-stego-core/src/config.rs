//! Codec configuration.
//!
//! Handles loading configuration from JSON or environment variables with
//! the same defaults as the front ends.
//!
//! `embedding_rate` is carried and validated but not consulted by the
//! fractal codec: every carrier position in the mask is used regardless of
//! its value. It is kept so existing parameter files and front ends keep
//! working.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StegoError};
use crate::fractal::{FractalParams, FractalVariant, DEFAULT_ITERATIONS, DEFAULT_THRESHOLD};

/// Default embedding rate offered by the front ends.
pub const DEFAULT_EMBEDDING_RATE: f64 = 0.4;

/// Configuration handed to an [`Algorithm`](crate::Algorithm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    /// Proportion of cover elements to use, in `(0, 1)`. Currently a no-op.
    pub embedding_rate: f64,
    /// Fractal parameters; required by the fractal codec.
    pub fractal_params: Option<FractalParams>,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            embedding_rate: DEFAULT_EMBEDDING_RATE,
            fractal_params: None,
        }
    }
}

impl StegoConfig {
    /// Configuration with the given fractal parameters and the default rate.
    pub fn with_params(params: FractalParams) -> Self {
        Self {
            fractal_params: Some(params),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(bytes)
            .map_err(|e| StegoError::Config(format!("Invalid JSON configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// - `EMBEDDING_RATE` (default: 0.4)
    /// - `FRACTAL_VARIANT` (`Mandelbrot` or `Julia`, default: Mandelbrot)
    /// - `FRACTAL_ITERATIONS` (default: 100)
    /// - `FRACTAL_THRESHOLD` (default: 2.0)
    ///
    /// Fractal parameters are only set when at least one `FRACTAL_*`
    /// variable is present. Unparseable numbers fall back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let embedding_rate = lookup("EMBEDDING_RATE")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_EMBEDDING_RATE);

        let variant = lookup("FRACTAL_VARIANT");
        let iterations = lookup("FRACTAL_ITERATIONS");
        let threshold = lookup("FRACTAL_THRESHOLD");

        let fractal_params = if variant.is_none() && iterations.is_none() && threshold.is_none() {
            None
        } else {
            let variant = match variant {
                Some(v) => v.parse::<FractalVariant>()?,
                None => FractalVariant::default(),
            };
            Some(FractalParams {
                variant,
                iterations: iterations
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_ITERATIONS),
                threshold: threshold
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_THRESHOLD),
            })
        };

        let config = Self {
            embedding_rate,
            fractal_params,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the embedding rate and any fractal parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.embedding_rate > 0.0 && self.embedding_rate < 1.0) {
            return Err(StegoError::Config(format!(
                "embedding rate must be in (0, 1), got {}",
                self.embedding_rate
            )));
        }
        if let Some(params) = &self.fractal_params {
            params.validate()?;
        }
        Ok(())
    }
}
