//! Embed command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use fractal_stego_core::{is_lossless_path, required_bits, save_lossless, StegoError};
use tracing::{debug, info};

use crate::utils::{self, format_bytes};
use crate::FractalArgs;

/// Execute the embed command.
pub fn execute(
    cover: PathBuf,
    payload: PathBuf,
    output: PathBuf,
    fractal: &FractalArgs,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    // Fail before any mask work if the output cannot carry the payload
    if !is_lossless_path(&output) {
        return Err(StegoError::LossyFormat(output.display().to_string()).into());
    }

    let config = utils::resolve_config(fractal)?;
    let cover_image = utils::load_image(&cover)?;
    let payload_bytes = utils::read_file(&payload)?;

    let (width, height) = cover_image.dimensions();
    info!(
        cover = %cover.display(),
        width,
        height,
        payload_bytes = payload_bytes.len(),
        algorithm = %fractal.algorithm,
        "Embedding payload"
    );

    let report = fractal.algorithm.capacity(width, height, &config)?;
    let required = required_bits(payload_bytes.len());
    debug!(
        carriers = report.carriers,
        required_bits = required,
        "Checked capacity"
    );

    if dry_run {
        if required > report.carriers {
            return Err(StegoError::CapacityExceeded {
                required,
                available: report.carriers,
            }
            .into());
        }
        if !quiet {
            println!("{}", "Dry run: nothing written".yellow().bold());
            println!(
                "   {} {} into {} ({} of {} carriers)",
                "Would embed:".dimmed(),
                format_bytes(payload_bytes.len() as u64),
                output.display(),
                required,
                report.carriers
            );
        }
        return Ok(());
    }

    let stego = fractal
        .algorithm
        .embed(&cover_image, &payload_bytes, &config)
        .context("Failed to embed payload")?;

    save_lossless(stego, &output)?;
    info!(output = %output.display(), "Wrote stego image");

    if !quiet {
        let params = config.fractal_params.unwrap_or_default();
        println!("{}", "Payload embedded".green().bold());
        println!("   {} {}", "Output:".dimmed(), output.display());
        println!(
            "   {} {}",
            "Payload:".dimmed(),
            format_bytes(payload_bytes.len() as u64)
        );
        println!(
            "   {} {} of {} ({:.1}%)",
            "Carriers used:".dimmed(),
            required,
            report.carriers,
            required as f64 * 100.0 / report.carriers as f64
        );
        println!(
            "   {} {} / {} iterations / threshold {}",
            "Mask:".dimmed(),
            params.variant,
            params.iterations,
            params.threshold
        );
        println!(
            "   {} {}",
            "Note:".dimmed(),
            "extraction needs the same fractal parameters".yellow()
        );
    }

    Ok(())
}
