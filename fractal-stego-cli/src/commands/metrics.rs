//! Metrics command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use fractal_stego_core::QualityMetrics;
use tracing::info;

use crate::utils;
use crate::OutputFormat;

fn format_psnr(psnr: f64) -> String {
    if psnr.is_infinite() {
        "inf (identical)".to_string()
    } else {
        format!("{:.2} dB", psnr)
    }
}

/// Execute the metrics command.
pub fn execute(original: PathBuf, stego: PathBuf, format: OutputFormat, quiet: bool) -> Result<()> {
    let original_image = utils::load_image(&original)?;
    let stego_image = utils::load_image(&stego)?;

    let metrics = QualityMetrics::compare(&original_image, &stego_image)?;
    info!(mse = metrics.mse, psnr = metrics.psnr, "Compared images");

    match format {
        OutputFormat::Json => {
            // Non-finite values (identical or constant images) serialize as null
            let json =
                serde_json::to_string_pretty(&metrics).context("Failed to serialize metrics")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if !quiet {
                println!("{}", "Quality metrics".bold());
                println!("   {} {:.6}", "MSE:".dimmed(), metrics.mse);
                println!("   {} {}", "PSNR:".dimmed(), format_psnr(metrics.psnr));
                println!(
                    "   {} R {:.6}  G {:.6}  B {:.6}",
                    "Correlation:".dimmed(),
                    metrics.correlation_r,
                    metrics.correlation_g,
                    metrics.correlation_b
                );
                println!(
                    "   {} {:.6}",
                    "Mean correlation:".dimmed(),
                    metrics.correlation_avg
                );
            }
        }
    }

    Ok(())
}
