//! Exit codes following sysexits.h conventions.
//!
//! Scripts can tell a bad invocation apart from a payload that does not fit
//! or an image that carries nothing.

use fractal_stego_core::StegoError;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments or parameters).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Data format error (payload too large, no valid payload, bad image).
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write output file).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
#[derive(Debug)]
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        let stego_error = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<StegoError>());

        let code = match stego_error {
            Some(stego_error) => code_for(stego_error),
            None if message.contains("Failed to read") => INPUT_ERROR,
            None if message.contains("Failed to write") => IO_ERROR,
            None => GENERAL_ERROR,
        };

        Self {
            code,
            message: Some(message),
        }
    }
}

fn code_for(err: &StegoError) -> i32 {
    match err {
        StegoError::CapacityExceeded { .. }
        | StegoError::InvalidLength { .. }
        | StegoError::TruncatedExtraction { .. }
        | StegoError::InvalidDimensions { .. }
        | StegoError::DimensionMismatch { .. }
        | StegoError::ImageDecode(_) => DATA_ERROR,
        StegoError::MissingParameters
        | StegoError::InvalidParameters(_)
        | StegoError::UnknownVariant(_)
        | StegoError::UnknownAlgorithm(_)
        | StegoError::LossyFormat(_)
        | StegoError::Config(_) => USAGE_ERROR,
        StegoError::ImageEncode(_) => IO_ERROR,
        StegoError::Cancelled => GENERAL_ERROR,
    }
}
