//! Zlib and raw-deflate inflation for replay payloads.
//!
//! Both variants exist in the wild: Remastered writes a zlib-wrapped
//! stream, while some third-party recorders strip the wrapper and store
//! bare deflate data. The engine in [`super`] decides which variant to try;
//! this module only performs the inflation.

use std::io::Read;

use flate2::read::{DeflateDecoder, ZlibDecoder};

use crate::error::{DecodeError, Result};

/// Inflates a zlib-wrapped deflate stream.
///
/// # Errors
///
/// Returns `DecodeError::DecompressionFailed` if the stream is corrupt or
/// is not zlib-wrapped.
pub fn inflate_zlib(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::new();

    decoder
        .read_to_end(&mut output)
        .map_err(|e| DecodeError::DecompressionFailed {
            reason: format!("zlib inflate failed: {e}"),
        })?;

    Ok(output)
}

/// Inflates a bare deflate stream (no zlib wrapper).
///
/// # Errors
///
/// Returns `DecodeError::DecompressionFailed` if the stream is corrupt.
pub fn inflate_raw_deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut output = Vec::new();

    decoder
        .read_to_end(&mut output)
        .map_err(|e| DecodeError::DecompressionFailed {
            reason: format!("raw deflate inflate failed: {e}"),
        })?;

    Ok(output)
}
