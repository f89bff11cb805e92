//! Example demonstrating tracing instrumentation of embed and extract.
//!
//! Run with: cargo run -p fractal-stego-core --example mask_tracing

use fractal_stego_core::{embed, extract, CapacityReport, FractalParams, FractalVariant};
use image::{Rgba, RgbaImage};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Initialize tracing subscriber with debug level
    fmt()
        .with_env_filter(EnvFilter::new("fractal_stego_core=debug,info"))
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    println!("=== Fractal Mask Tracing Demo ===\n");

    let cover = RgbaImage::from_fn(320, 240, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8, 255])
    });

    for variant in [FractalVariant::Mandelbrot, FractalVariant::Julia] {
        let params = match FractalParams::new(variant, 100, 2.0) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Invalid parameters: {}", e);
                return;
            }
        };

        println!("\n{} ({:?})", variant, params);

        match fractal_stego_core::generate_mask(320, 240, &params) {
            Ok(mask) => {
                let report = CapacityReport::from_mask(&mask);
                println!(
                    "   Carriers: {} ({:.1}%), max payload {} bytes",
                    report.carriers,
                    report.carrier_ratio() * 100.0,
                    report.max_payload_bytes
                );
            }
            Err(e) => {
                println!("   Mask failed: {}", e);
                continue;
            }
        }

        let result = embed(&cover, b"traced payload", Some(&params))
            .and_then(|stego| extract(&stego, Some(&params)));
        match result {
            Ok(payload) => println!("   Round trip: {}", String::from_utf8_lossy(&payload)),
            Err(e) => println!("   Round trip failed: {}", e),
        }
    }
}
