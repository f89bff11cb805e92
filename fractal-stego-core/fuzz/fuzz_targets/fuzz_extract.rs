#![no_main]

//! Fuzz target for extract()
//!
//! Interprets the input as a small RGBA image plus fractal parameters and
//! runs extraction on it to find:
//! - Panics from implausible length headers
//! - Out-of-bounds carrier indexing
//!
//! Run with: cargo +nightly fuzz run fuzz_extract

use fractal_stego_core::{extract, FractalParams, FractalVariant};
use image::RgbaImage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let width = u32::from(data[0] % 32) + 1;
    let height = u32::from(data[1] % 32) + 1;
    let variant = if data[2] & 1 == 0 {
        FractalVariant::Mandelbrot
    } else {
        FractalVariant::Julia
    };
    let iterations = u32::from(data[3] % 64);

    let mut pixels = data[4..].to_vec();
    pixels.resize((width * height * 4) as usize, 0);
    let Some(image) = RgbaImage::from_raw(width, height, pixels) else {
        return;
    };

    let params = FractalParams {
        variant,
        iterations,
        threshold: 2.0,
    };
    // Errors are expected; panics are not
    let _ = extract(&image, Some(&params));
});
