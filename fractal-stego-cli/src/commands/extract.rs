//! Extract command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::utils::{self, format_bytes};
use crate::FractalArgs;

/// Execute the extract command.
pub fn execute(stego: PathBuf, output: PathBuf, fractal: &FractalArgs, quiet: bool) -> Result<()> {
    let config = utils::resolve_config(fractal)?;
    let stego_image = utils::load_image(&stego)?;

    info!(
        stego = %stego.display(),
        width = stego_image.width(),
        height = stego_image.height(),
        algorithm = %fractal.algorithm,
        "Extracting payload"
    );

    let payload = fractal
        .algorithm
        .extract(&stego_image, &config)
        .context("No payload recovered")?;

    utils::write_file(&output, &payload)?;
    info!(output = %output.display(), bytes = payload.len(), "Recovered payload");

    if !quiet {
        println!("{}", "Payload extracted".green().bold());
        println!("   {} {}", "Output:".dimmed(), output.display());
        println!(
            "   {} {}",
            "Payload:".dimmed(),
            format_bytes(payload.len() as u64)
        );
    }

    Ok(())
}
