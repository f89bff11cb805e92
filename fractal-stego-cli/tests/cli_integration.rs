//! CLI integration tests for fractal-stego-cli.
//!
//! These tests verify the CLI behavior by running the actual binary
//! and checking outputs, exit codes, and file artifacts.

use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a Command for the fracstego binary with a clean configuration environment.
fn fracstego() -> Command {
    let mut cmd = Command::cargo_bin("fracstego").unwrap();
    for var in [
        "EMBEDDING_RATE",
        "FRACTAL_VARIANT",
        "FRACTAL_ITERATIONS",
        "FRACTAL_THRESHOLD",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Write a 100x100 PNG cover (2214 carriers under the default mask).
fn write_cover(dir: &Path) -> PathBuf {
    let path = dir.join("cover.png");
    RgbaImage::from_fn(100, 100, |x, y| {
        Rgba([(x * 2) as u8, (y * 2) as u8, ((x * y) % 256) as u8, 255])
    })
    .save(&path)
    .unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    fracstego()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fractal-mask image steganography"))
        .stdout(predicate::str::contains("embed"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("capacity"))
        .stdout(predicate::str::contains("metrics"))
        .stdout(predicate::str::contains("mask"));
}

#[test]
fn test_version_displays_version() {
    fracstego()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fracstego"));
}

#[test]
fn test_help_shows_exit_codes() {
    fracstego()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("64"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"));
}

#[test]
fn test_embed_help_shows_options() {
    fracstego()
        .args(["embed", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--variant"))
        .stdout(predicate::str::contains("--iterations"))
        .stdout(predicate::str::contains("--threshold"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_mask_help_shows_options() {
    fracstego()
        .args(["mask", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--width"))
        .stdout(predicate::str::contains("--height"));
}

// ============================================================================
// Exit Code Tests
// ============================================================================

#[test]
fn test_missing_subcommand_is_usage_error() {
    fracstego().assert().code(64);
}

#[test]
fn test_unknown_variant_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());

    fracstego()
        .args(["capacity", cover.to_str().unwrap(), "--variant", "koch"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("koch"));
}

#[test]
fn test_missing_cover_is_input_error() {
    let temp_dir = TempDir::new().unwrap();
    let payload = temp_dir.path().join("secret.txt");
    fs::write(&payload, b"secret").unwrap();

    fracstego()
        .args([
            "embed",
            "/nonexistent/cover.png",
            payload.to_str().unwrap(),
            "-o",
            temp_dir.path().join("out.png").to_str().unwrap(),
        ])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_lossy_output_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());
    let payload = temp_dir.path().join("secret.txt");
    fs::write(&payload, b"secret").unwrap();
    let output = temp_dir.path().join("stego.jpg");

    fracstego()
        .args([
            "embed",
            cover.to_str().unwrap(),
            payload.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("lossy"));

    assert!(!output.exists());
}

#[test]
fn test_payload_too_large_is_data_error() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());
    let payload = temp_dir.path().join("big.bin");
    fs::write(&payload, vec![0xAB; 300]).unwrap();
    let output = temp_dir.path().join("stego.png");

    fracstego()
        .args([
            "embed",
            cover.to_str().unwrap(),
            payload.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Capacity exceeded"))
        .stderr(predicate::str::contains("2432"))
        .stderr(predicate::str::contains("2214"));

    assert!(!output.exists());
}

#[test]
fn test_extract_from_clean_image_is_data_error() {
    let temp_dir = TempDir::new().unwrap();
    let blank = temp_dir.path().join("blank.png");
    RgbaImage::from_pixel(80, 80, Rgba([128, 128, 128, 255]))
        .save(&blank)
        .unwrap();

    fracstego()
        .args([
            "extract",
            blank.to_str().unwrap(),
            "-o",
            temp_dir.path().join("out.bin").to_str().unwrap(),
        ])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Invalid data length"));
}

#[test]
fn test_undecodable_image_is_data_error() {
    let temp_dir = TempDir::new().unwrap();
    let bogus = temp_dir.path().join("bogus.png");
    fs::write(&bogus, b"not an image at all").unwrap();

    fracstego()
        .args(["capacity", bogus.to_str().unwrap()])
        .assert()
        .code(65);
}

#[test]
fn test_invalid_threshold_is_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());

    fracstego()
        .args(["capacity", cover.to_str().unwrap(), "--threshold=-1"])
        .assert()
        .code(64);
}

// ============================================================================
// Dry Run Tests
// ============================================================================

#[test]
fn test_embed_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());
    let payload = temp_dir.path().join("secret.txt");
    fs::write(&payload, b"Hello, World!").unwrap();
    let output = temp_dir.path().join("stego.png");

    fracstego()
        .args([
            "embed",
            cover.to_str().unwrap(),
            payload.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!output.exists());
}

#[test]
fn test_embed_dry_run_reports_capacity_exceeded() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());
    let payload = temp_dir.path().join("big.bin");
    fs::write(&payload, vec![1u8; 273]).unwrap();

    fracstego()
        .args([
            "embed",
            cover.to_str().unwrap(),
            payload.to_str().unwrap(),
            "-o",
            temp_dir.path().join("stego.png").to_str().unwrap(),
            "-n",
        ])
        .assert()
        .code(65);
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_capacity_json() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());

    let output = fracstego()
        .args(["capacity", cover.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["width"], 100);
    assert_eq!(report["height"], 100);
    assert_eq!(report["carriers"], 2214);
    assert_eq!(report["max_payload_bytes"], 272);
    assert_eq!(report["algorithm"], "Fractal");
    assert_eq!(report["fractal_params"]["variant"], "Mandelbrot");
}

#[test]
fn test_capacity_reads_environment() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());

    // Julia with the fixed constant never escapes from z = 0
    let output = fracstego()
        .env("FRACTAL_VARIANT", "Julia")
        .args(["capacity", cover.to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["carriers"], 10_000);
    assert_eq!(report["fractal_params"]["variant"], "Julia");
}

#[test]
fn test_capacity_text_quiet() {
    let temp_dir = TempDir::new().unwrap();
    let cover = write_cover(temp_dir.path());

    fracstego()
        .args(["--quiet", "capacity", cover.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_mask_from_dimensions() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("mask.png");

    fracstego()
        .args([
            "mask",
            "--width",
            "100",
            "--height",
            "100",
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2214"));

    let mask = image::open(&output).unwrap().to_luma8();
    assert_eq!(mask.dimensions(), (100, 100));
    let white = mask.pixels().filter(|p| p[0] == 255).count();
    assert_eq!(white, 2214);
}

#[test]
fn test_mask_requires_dimensions() {
    let temp_dir = TempDir::new().unwrap();
    fracstego()
        .args([
            "mask",
            "--width",
            "10",
            "-o",
            temp_dir.path().join("mask.png").to_str().unwrap(),
        ])
        .assert()
        .code(64);
}
