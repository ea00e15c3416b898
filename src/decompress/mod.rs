//! Decompression engine for replay payloads.
//!
//! Given the raw buffer and the [`FormatTag`] from the sniffer, this module
//! produces the decompressed payload that the header and command decoders
//! consume. Three schemes exist in the wild:
//!
//! - **Raw**: the payload is stored uncompressed (some third-party
//!   recorders).
//! - **Zlib**: a single zlib-wrapped deflate stream (Remastered, and
//!   Classic replays re-saved by modern tools).
//! - **PKWare**: the DCL "implode" scheme written by Classic clients.
//!
//! # Bounded fallback
//!
//! The container format does not self-describe window bits or wrapping
//! reliably across versions, so the scheme identified by the sniffer is a
//! strong hint, not a guarantee. The engine tries the sniffed scheme
//! first; if the output fails the plausibility check it attempts at most
//! two alternate standard inflate variants (zlib-wrapped, then bare
//! deflate) before giving up with `DecompressionFailed`. The retry set
//! is fixed; there is no open-ended trial loop.
//!
//! # Example
//!
//! ```no_run
//! use bwrep_parser::decompress::decompress;
//! use bwrep_parser::format::sniff;
//!
//! let data = std::fs::read("match.rep").unwrap();
//! let tag = sniff(&data)?;
//! let payload = decompress(&data, &tag)?;
//! println!("payload: {} bytes", payload.len());
//! # Ok::<(), bwrep_parser::error::DecodeError>(())
//! ```

pub mod pkware;
pub mod zlib;

pub use pkware::explode;
pub use zlib::{inflate_raw_deflate, inflate_zlib};

use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::format::{CompressionScheme, FormatTag};
use crate::header::layout::{CLASSIC_LAYOUT, HEADER_BLOCK_SIZE};

/// Maximum share of null bytes tolerated in the plausibility sample.
const MAX_NULL_PERCENT: usize = 95;

/// Size of the leading sample inspected by the plausibility check.
const PLAUSIBILITY_SAMPLE: usize = 1024;

/// The inflate variants tried when the sniffed scheme produces an
/// implausible payload. The fallback never grows past these two entries.
const ALTERNATES: [Alternate; 2] = [Alternate::ZlibWrapped, Alternate::BareDeflate];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alternate {
    ZlibWrapped,
    BareDeflate,
}

impl Alternate {
    const fn name(self) -> &'static str {
        match self {
            Alternate::ZlibWrapped => "zlib",
            Alternate::BareDeflate => "raw-deflate",
        }
    }

    fn matches_scheme(self, scheme: CompressionScheme) -> bool {
        matches!(
            (self, scheme),
            (Alternate::ZlibWrapped, CompressionScheme::Zlib)
        )
    }
}

/// Decompresses the replay payload according to the sniffed format tag.
///
/// # Arguments
///
/// * `data` - The raw bytes of the entire replay file
/// * `tag` - The sniffer's classification of the buffer
///
/// # Errors
///
/// Returns `DecodeError::DecompressionFailed` if the sniffed scheme and
/// both alternates all fail to produce a plausible payload. The error
/// reason names every attempted scheme.
pub fn decompress(data: &[u8], tag: &FormatTag) -> Result<Vec<u8>> {
    if tag.payload_offset >= data.len() {
        return Err(DecodeError::truncated(tag.payload_offset + 1, data.len()));
    }

    let payload = &data[tag.payload_offset..];
    let mut attempts: Vec<String> = Vec::new();

    // Sniffed scheme first
    match inflate_scheme(payload, tag.compression) {
        Ok(output) if payload_is_plausible(&output) => return Ok(output),
        Ok(output) => attempts.push(format!(
            "{}: implausible output ({} bytes)",
            tag.compression.name(),
            output.len()
        )),
        Err(e) => attempts.push(format!("{}: {e}", tag.compression.name())),
    }

    // Capped fallback across the standard inflate variants
    for alternate in ALTERNATES {
        if alternate.matches_scheme(tag.compression) {
            continue;
        }

        debug!(scheme = alternate.name(), "retrying with alternate inflate variant");

        let result = match alternate {
            Alternate::ZlibWrapped => inflate_zlib(payload),
            Alternate::BareDeflate => inflate_raw_deflate(payload),
        };

        match result {
            Ok(output) if payload_is_plausible(&output) => return Ok(output),
            Ok(output) => attempts.push(format!(
                "{}: implausible output ({} bytes)",
                alternate.name(),
                output.len()
            )),
            Err(e) => attempts.push(format!("{}: {e}", alternate.name())),
        }
    }

    Err(DecodeError::DecompressionFailed {
        reason: format!("all schemes exhausted [{}]", attempts.join("; ")),
    })
}

/// Runs the inflate algorithm matching a compression scheme.
fn inflate_scheme(payload: &[u8], scheme: CompressionScheme) -> Result<Vec<u8>> {
    match scheme {
        CompressionScheme::Raw => Ok(payload.to_vec()),
        CompressionScheme::Zlib => inflate_zlib(payload),
        CompressionScheme::PkWare => explode(payload),
    }
}

/// Checks whether decompressed output plausibly holds a replay payload.
///
/// Criteria: long enough to contain the header block, not overwhelmingly
/// null in the leading sample, and at least one printable byte in the
/// map-name window.
#[must_use]
pub fn payload_is_plausible(payload: &[u8]) -> bool {
    if payload.len() < HEADER_BLOCK_SIZE {
        return false;
    }

    let sample = &payload[..payload.len().min(PLAUSIBILITY_SAMPLE)];
    let nulls = sample.iter().filter(|&&b| b == 0).count();
    if nulls * 100 > sample.len() * MAX_NULL_PERCENT {
        return false;
    }

    let (map_offset, map_len) = CLASSIC_LAYOUT.map_name;
    payload[map_offset..map_offset + map_len]
        .iter()
        .any(|&b| b >= 0x20)
}
