//! Binary reading utilities for decoding replay buffers.
//!
//! This module provides functions for reading little-endian integers, byte
//! slices, and fixed-size text fields from byte buffers. All functions
//! perform bounds checking and return appropriate errors for truncated
//! data.
//!
//! # Endianness
//!
//! Every multi-byte integer in a `.rep` file is little-endian; the functions
//! here handle the conversion.
//!
//! # Text fields
//!
//! Player and map names are fixed-size, null-padded fields that predate
//! UTF-8: Western replays carry Windows-1252-ish bytes and Korean replays
//! carry EUC-KR. [`read_text_field`] decodes ASCII directly, maps remaining
//! bytes through Latin-1 (so no field is ever rejected), and strips control
//! characters.
//!
//! # Example
//!
//! ```
//! use bwrep_parser::binary::{read_u16_le, read_u32_le, read_text_field};
//!
//! let data = [0x40, 0x0B, 0x00, 0x00, b'F', b'S', 0x00, 0x00];
//!
//! assert_eq!(read_u16_le(&data, 0).unwrap(), 0x0B40);
//! assert_eq!(read_u32_le(&data, 0).unwrap(), 0x0000_0B40);
//! assert_eq!(read_text_field(&data, 4, 4).unwrap(), "FS");
//! ```

use crate::error::{DecodeError, Result};

/// Reads a single byte from the buffer at the given offset.
///
/// # Errors
///
/// Returns `DecodeError::TruncatedInput` if the offset is beyond the buffer.
pub fn read_u8(bytes: &[u8], offset: usize) -> Result<u8> {
    bytes
        .get(offset)
        .copied()
        .ok_or_else(|| DecodeError::truncated(offset + 1, bytes.len()))
}

/// Reads a little-endian u16 value from the byte buffer at the given offset.
///
/// # Errors
///
/// Returns `DecodeError::TruncatedInput` if the buffer doesn't contain at
/// least 2 bytes starting from the given offset.
///
/// # Example
///
/// ```
/// use bwrep_parser::binary::read_u16_le;
///
/// let data = [0x34, 0x12, 0xFF, 0xFF];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0xFFFF);
/// ```
pub fn read_u16_le(bytes: &[u8], offset: usize) -> Result<u16> {
    const SIZE: usize = 2;

    if offset + SIZE > bytes.len() {
        return Err(DecodeError::truncated(offset + SIZE, bytes.len()));
    }

    let slice = &bytes[offset..offset + SIZE];
    Ok(u16::from_le_bytes([slice[0], slice[1]]))
}

/// Reads a little-endian u32 value from the byte buffer at the given offset.
///
/// # Errors
///
/// Returns `DecodeError::TruncatedInput` if the buffer doesn't contain at
/// least 4 bytes starting from the given offset.
///
/// # Example
///
/// ```
/// use bwrep_parser::binary::read_u32_le;
///
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
pub fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32> {
    const SIZE: usize = 4;

    if offset + SIZE > bytes.len() {
        return Err(DecodeError::truncated(offset + SIZE, bytes.len()));
    }

    let slice = &bytes[offset..offset + SIZE];
    Ok(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

/// Reads a slice of bytes from the buffer at the given offset.
///
/// # Errors
///
/// Returns `DecodeError::TruncatedInput` if the buffer doesn't contain at
/// least `len` bytes starting from the given offset.
pub fn read_bytes(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    if offset + len > bytes.len() {
        return Err(DecodeError::truncated(offset + len, bytes.len()));
    }

    Ok(&bytes[offset..offset + len])
}

/// Reads a fixed-size, null-padded text field from the buffer.
///
/// The field is scanned up to the first null byte or `len` bytes, whichever
/// comes first. Bytes are decoded as ASCII where possible and mapped through
/// Latin-1 otherwise, so the read never fails on encoding grounds. Control
/// characters (including the color/formatting codes the game embeds in
/// names) are stripped from the result.
///
/// # Errors
///
/// Returns `DecodeError::TruncatedInput` if `offset + len` is beyond the
/// buffer.
///
/// # Example
///
/// ```
/// use bwrep_parser::binary::read_text_field;
///
/// let data = b"Lost Temple\x00\x00\x00\x00\x00";
/// assert_eq!(read_text_field(data, 0, 16).unwrap(), "Lost Temple");
/// ```
pub fn read_text_field(bytes: &[u8], offset: usize, len: usize) -> Result<String> {
    let slice = read_bytes(bytes, offset, len)?;

    let field_len = slice.iter().position(|&b| b == 0).unwrap_or(len);

    Ok(decode_text(&slice[..field_len]))
}

/// Decodes raw name/map bytes into a `String`.
///
/// Latin-1 mapping: every byte value is a valid char, so legacy encodings
/// degrade to mojibake instead of a decode error. Control characters
/// (0x00..0x20 except space is 0x20 itself, plus 0x7F) are stripped.
#[must_use]
pub fn decode_text(raw: &[u8]) -> String {
    raw.iter()
        .map(|&b| b as char)
        .filter(|c| !c.is_control())
        .collect()
}
