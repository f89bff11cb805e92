//! Payload envelope framing.
//!
//! ```text
//! [ length: u32, big-endian, 32 bits ][ payload: length * 8 bits ]
//! ```
//!
//! Both parts are written MSB first, one bit per carrier position, in the
//! mask's row-major carrier order. The envelope carries no magic, checksum
//! or version: a wrong mask simply decodes to garbage.

use crate::bits::{bits_to_bytes, bytes_to_bits};
use crate::capacity::required_bits;
use crate::error::{Result, StegoError};

/// Width of the length header in bits.
pub const LENGTH_HEADER_BITS: u64 = 32;

/// Largest envelope the 32-bit length field can describe.
pub const MAX_ENVELOPE_BITS: u64 = LENGTH_HEADER_BITS + 8 * u32::MAX as u64;

/// Build the full envelope bitstream for `payload`.
///
/// # Errors
///
/// Returns [`StegoError::CapacityExceeded`] if the payload length does not
/// fit the 32-bit header.
pub fn encode(payload: &[u8]) -> Result<Vec<bool>> {
    let length = u32::try_from(payload.len()).map_err(|_| StegoError::CapacityExceeded {
        required: required_bits(payload.len()),
        available: MAX_ENVELOPE_BITS,
    })?;

    let mut bits = bytes_to_bits(&length.to_be_bytes());
    bits.extend(bytes_to_bits(payload));
    Ok(bits)
}

/// Decode the big-endian length from exactly [`LENGTH_HEADER_BITS`] bits.
pub fn decode_length(header: &[bool; LENGTH_HEADER_BITS as usize]) -> u32 {
    let bytes = bits_to_bytes(header);
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
