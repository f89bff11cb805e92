//! Mask command implementation.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use fractal_stego_core::{generate_mask, save_lossless, StegoError};
use tracing::info;

use crate::utils;
use crate::FractalArgs;

/// Execute the mask command.
///
/// Dimensions come from `image` when given, otherwise from `size`.
pub fn execute(
    image: Option<PathBuf>,
    size: Option<(u32, u32)>,
    output: PathBuf,
    fractal: &FractalArgs,
    quiet: bool,
) -> Result<()> {
    let config = utils::resolve_config(fractal)?;
    let params = config
        .fractal_params
        .ok_or(StegoError::MissingParameters)?;

    let (width, height) = match (image, size) {
        (Some(path), _) => utils::load_image(&path)?.dimensions(),
        (None, Some(size)) => size,
        (None, None) => anyhow::bail!("Either an image or --width and --height is required"),
    };

    let mask = generate_mask(width, height, &params)?;
    save_lossless(mask.to_image(), &output)?;
    info!(
        output = %output.display(),
        width,
        height,
        carriers = mask.carrier_count(),
        "Wrote carrier mask"
    );

    if !quiet {
        println!("{}", "Mask written".green().bold());
        println!("   {} {}", "Output:".dimmed(), output.display());
        println!("   {} {}x{}", "Size:".dimmed(), width, height);
        println!(
            "   {} {} (white pixels)",
            "Carriers:".dimmed(),
            mask.carrier_count()
        );
    }

    Ok(())
}
