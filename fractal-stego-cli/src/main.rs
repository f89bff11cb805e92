//! fracstego - fractal-mask image steganography tool.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fractal_stego_core::{Algorithm, FractalVariant};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod exit_codes;
mod utils;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  64  Usage error (bad parameters, lossy output format)
  65  Data error (payload too large, no valid payload found, undecodable image)
  66  Input file cannot be read
  74  Output file cannot be written";

#[derive(Parser)]
#[command(name = "fracstego")]
#[command(author, version, about = "Fractal-mask image steganography", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Suppress user-facing output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parameters shared by every command that needs a carrier mask.
#[derive(Args, Clone, Debug, Default)]
pub struct FractalArgs {
    /// Steganographic algorithm
    #[arg(long, default_value_t = Algorithm::Fractal)]
    pub algorithm: Algorithm,

    /// Fractal variant: mandelbrot or julia [default: mandelbrot]
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<FractalVariant>,

    /// Maximum escape-time iterations per pixel [default: 100]
    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Escape radius [default: 2.0]
    #[arg(long, value_name = "RADIUS")]
    pub threshold: Option<f64>,

    /// Embedding rate in (0, 1); accepted for compatibility, not used by the fractal codec
    #[arg(long, value_name = "RATE")]
    pub rate: Option<f64>,

    /// JSON configuration file (flags override its values)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a file inside a cover image
    Embed {
        /// Cover image (any supported format)
        #[arg(value_name = "COVER")]
        cover: PathBuf,

        /// File whose bytes are hidden
        #[arg(value_name = "PAYLOAD")]
        payload: PathBuf,

        /// Stego image to write (lossless format: png, bmp, tiff, tga, qoi)
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Check capacity and show what would be done without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        #[command(flatten)]
        fractal: FractalArgs,
    },

    /// Recover a hidden file from a stego image
    Extract {
        /// Stego image
        #[arg(value_name = "STEGO")]
        stego: PathBuf,

        /// File to write the recovered bytes to
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        #[command(flatten)]
        fractal: FractalArgs,
    },

    /// Show how many bytes an image can hide
    Capacity {
        /// Image to measure
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[command(flatten)]
        fractal: FractalArgs,
    },

    /// Compare a cover image with its stego image (MSE, PSNR, correlation)
    Metrics {
        /// Original cover image
        #[arg(value_name = "ORIGINAL")]
        original: PathBuf,

        /// Stego image
        #[arg(value_name = "STEGO")]
        stego: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Render the carrier mask as a black and white image
    Mask {
        /// Take the dimensions from this image
        #[arg(value_name = "IMAGE", required_unless_present_all = ["width", "height"])]
        image: Option<PathBuf>,

        /// Mask width, when no image is given
        #[arg(long, requires = "height", conflicts_with = "image")]
        width: Option<u32>,

        /// Mask height, when no image is given
        #[arg(long, requires = "width", conflicts_with = "image")]
        height: Option<u32>,

        /// Mask image to write (lossless format)
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        #[command(flatten)]
        fractal: FractalArgs,
    },
}

/// Initialise logging on stderr; `RUST_LOG` overrides `--verbose`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Embed {
            cover,
            payload,
            output,
            dry_run,
            fractal,
        } => commands::embed::execute(cover, payload, output, &fractal, dry_run, quiet),
        Commands::Extract {
            stego,
            output,
            fractal,
        } => commands::extract::execute(stego, output, &fractal, quiet),
        Commands::Capacity {
            image,
            format,
            fractal,
        } => commands::capacity::execute(image, &fractal, format, quiet),
        Commands::Metrics {
            original,
            stego,
            format,
        } => commands::metrics::execute(original, stego, format, quiet),
        Commands::Mask {
            image,
            width,
            height,
            output,
            fractal,
        } => commands::mask::execute(image, width.zip(height), output, &fractal, quiet),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported through clap errors on stdout
            return if err.use_stderr() {
                ExitCode::from(exit_codes::USAGE_ERROR as u8)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let exit = exit_codes::ExitCode::from_anyhow(&err);
            if let Some(message) = &exit.message {
                eprintln!("{} {}", "Error:".red().bold(), message);
            }
            ExitCode::from(exit.code as u8)
        }
    }
}
