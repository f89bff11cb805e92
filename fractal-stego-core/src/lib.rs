//! Fractal Stego Core - fractal-mask LSB image steganography
//!
//! This crate hides an arbitrary byte payload in the blue-channel
//! least-significant bits of an RGBA image, at pixel positions selected by
//! an escape-time fractal iteration, and recovers it later.
//!
//! # Features
//!
//! - Deterministic Mandelbrot / Julia carrier masks, recomputed on both sides
//! - Length-prefixed envelope (32-bit big-endian byte count + payload bits)
//! - Capacity validated against the actual carrier count
//! - Explicit errors for missing parameters, bad lengths and truncation
//! - Parallel mask generation (`parallel` feature) with cooperative cancellation
//! - Lossless PNG output and cover/stego quality metrics
//!
//! # Example
//!
//! ```no_run
//! use fractal_stego_core::{embed, extract, FractalParams, FractalVariant};
//!
//! # fn example() -> fractal_stego_core::Result<()> {
//! let cover = image::open("cover.png").expect("readable image").to_rgba8();
//! let params = FractalParams::new(FractalVariant::Mandelbrot, 100, 2.0)?;
//!
//! let stego = embed(&cover, b"Hello, World!", Some(&params))?;
//! let payload = extract(&stego, Some(&params))?;
//! assert_eq!(payload, b"Hello, World!");
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod bits;
pub mod cancel;
pub mod capacity;
pub mod config;
pub mod embed;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod fractal;
pub mod image_io;
pub mod metrics;

// Re-export main types for convenience
pub use algorithm::Algorithm;
pub use bits::{bits_to_bytes, bytes_to_bits};
pub use cancel::CancelToken;
pub use capacity::{carrier_count, max_payload_bytes, required_bits, CapacityReport};
pub use config::{StegoConfig, DEFAULT_EMBEDDING_RATE};
pub use embed::{embed, embed_with_cancel};
pub use envelope::LENGTH_HEADER_BITS;
pub use error::{Result, StegoError};
pub use extract::{extract, extract_with_cancel};
pub use fractal::{
    generate_mask, generate_mask_with_cancel, CarrierMask, FractalParams, FractalVariant,
    DEFAULT_ITERATIONS, DEFAULT_THRESHOLD,
};
pub use image_io::{decode_image, encode_png, is_lossless_path, save_lossless};
pub use metrics::QualityMetrics;
