#![no_main]

//! Fuzz target for StegoConfig::from_json()
//!
//! Run with: cargo +nightly fuzz run fuzz_config

use fractal_stego_core::StegoConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // All malformed input should be reported as an error
    let _ = StegoConfig::from_json(data);
});
