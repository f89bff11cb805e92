//! Common utility functions shared across CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use fractal_stego_core::{decode_image, FractalParams, StegoConfig};
use image::RgbaImage;
use tracing::debug;

use crate::FractalArgs;

/// Read a whole file, tagging failures as input errors.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read file");
    Ok(bytes)
}

/// Write a whole file, tagging failures as output errors.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

/// Read and decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let bytes = read_file(path)?;
    decode_image(&bytes).with_context(|| format!("Cannot load image {}", path.display()))
}

/// Build the codec configuration for a command.
///
/// The base comes from `--config` when given, otherwise from the
/// `EMBEDDING_RATE` / `FRACTAL_*` environment variables. Flags override
/// the base, and missing fractal parameters fall back to the defaults.
pub fn resolve_config(args: &FractalArgs) -> Result<StegoConfig> {
    resolve_config_with(args, |key| std::env::var(key).ok())
}

pub fn resolve_config_with<F>(args: &FractalArgs, lookup: F) -> Result<StegoConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &args.config {
        Some(path) => {
            let bytes = read_file(path)?;
            StegoConfig::from_json(&bytes)
                .with_context(|| format!("Invalid configuration file {}", path.display()))?
        }
        None => StegoConfig::from_lookup(lookup)
            .context("Invalid configuration in environment")?,
    };

    if let Some(rate) = args.rate {
        config.embedding_rate = rate;
    }

    let mut params = config.fractal_params.unwrap_or_default();
    if let Some(variant) = args.variant {
        params.variant = variant;
    }
    if let Some(iterations) = args.iterations {
        params.iterations = iterations;
    }
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    config.fractal_params = Some(params);

    config.validate()?;
    debug!(
        algorithm = %args.algorithm,
        variant = %params.variant,
        iterations = params.iterations,
        threshold = params.threshold,
        embedding_rate = config.embedding_rate,
        "Resolved configuration"
    );
    Ok(config)
}

/// Format a byte count for humans.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
