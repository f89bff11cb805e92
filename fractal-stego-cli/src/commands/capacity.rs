//! Capacity command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use fractal_stego_core::{CapacityReport, FractalParams};
use serde::Serialize;
use tracing::info;

use crate::utils::{self, format_bytes};
use crate::{FractalArgs, OutputFormat};

#[derive(Serialize)]
struct CapacityOutput<'a> {
    image: String,
    algorithm: &'a str,
    fractal_params: FractalParams,
    #[serde(flatten)]
    report: CapacityReport,
    carrier_ratio: f64,
}

/// Execute the capacity command.
pub fn execute(
    image: PathBuf,
    fractal: &FractalArgs,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = utils::resolve_config(fractal)?;
    let pixels = utils::load_image(&image)?;
    let (width, height) = pixels.dimensions();

    let report = fractal.algorithm.capacity(width, height, &config)?;
    let params = config.fractal_params.unwrap_or_default();
    info!(
        image = %image.display(),
        carriers = report.carriers,
        max_payload_bytes = report.max_payload_bytes,
        "Measured capacity"
    );

    match format {
        OutputFormat::Json => {
            let output = CapacityOutput {
                image: image.display().to_string(),
                algorithm: fractal.algorithm.name(),
                fractal_params: params,
                report,
                carrier_ratio: report.carrier_ratio(),
            };
            let json = serde_json::to_string_pretty(&output)
                .context("Failed to serialize capacity report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if !quiet {
                println!("{}", "Capacity".bold());
                println!("   {} {}", "Image:".dimmed(), image.display());
                println!("   {} {}x{}", "Size:".dimmed(), width, height);
                println!(
                    "   {} {} / {} iterations / threshold {}",
                    "Mask:".dimmed(),
                    params.variant,
                    params.iterations,
                    params.threshold
                );
                println!(
                    "   {} {} ({:.1}% of pixels)",
                    "Carriers:".dimmed(),
                    report.carriers,
                    report.carrier_ratio() * 100.0
                );
                let max = format!(
                    "{} ({})",
                    report.max_payload_bytes,
                    format_bytes(report.max_payload_bytes)
                );
                let max = if report.max_payload_bytes == 0 {
                    max.red()
                } else {
                    max.green()
                };
                println!("   {} {}", "Max payload:".dimmed(), max);
            }
        }
    }

    Ok(())
}
