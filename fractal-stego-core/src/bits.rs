//! Conversion between byte sequences and MSB-first bit sequences.

/// Expand bytes into bits, most-significant bit first.
///
/// The output always holds exactly `8 * data.len()` bits.
pub fn bytes_to_bits(data: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &byte in data {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Pack bits into bytes, most-significant bit first.
///
/// A trailing partial byte is padded with zero low bits, so the output
/// length is `ceil(bits.len() / 8)`.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    bytes
}
