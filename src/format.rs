//! Format sniffing for Brood War replay files.
//!
//! This module classifies a raw byte buffer before any decoding happens:
//! which container version wrote it (Classic or Remastered) and which
//! compression scheme wraps the payload (raw, zlib, or PKWare DCL).
//!
//! # Container families
//!
//! - **Remastered**: ASCII magic `seRS` at byte offset 12. The payload is a
//!   single zlib stream whose marker is located by a bounded scan after the
//!   16-byte preamble.
//! - **Classic**: no magic. The buffer is either a bare payload, a zlib
//!   stream (marker scan from offset 0), or a PKWare DCL imploded stream.
//!
//! # Example
//!
//! ```
//! use bwrep_parser::format::{sniff, CompressionScheme, ReplayVersion};
//!
//! let mut data = vec![0u8; 160];
//! data[12..16].copy_from_slice(b"seRS");
//! data[16] = 0x78;
//! data[17] = 0x9C;
//!
//! let tag = sniff(&data).unwrap();
//! assert_eq!(tag.version, ReplayVersion::Remastered);
//! assert_eq!(tag.compression, CompressionScheme::Zlib);
//! assert_eq!(tag.payload_offset, 16);
//! ```

use crate::error::{DecodeError, Result};
use crate::header::layout::{HEADER_BLOCK_SIZE, MAX_FRAME_COUNT};

/// The magic bytes identifying a Remastered container.
pub const REMASTERED_MAGIC: &[u8; 4] = b"seRS";

/// Byte offset of the Remastered magic within the container.
pub const REMASTERED_MAGIC_OFFSET: usize = 12;

/// Size of the container preamble that sniffing inspects.
///
/// A buffer must hold the full preamble plus at least one payload byte;
/// 16 bytes or fewer cannot hold any replay.
pub const MIN_SNIFF_LEN: usize = 16;

/// The two-byte zlib stream markers recognized by the sniffer.
///
/// These are the CMF/FLG pairs emitted by standard deflate encoders at the
/// four common compression levels.
pub const ZLIB_MARKERS: [[u8; 2]; 4] = [[0x78, 0x01], [0x78, 0x9C], [0x78, 0xDA], [0x78, 0x5E]];

/// Size of the bounded window scanned for a zlib stream marker.
pub const MARKER_SCAN_WINDOW: usize = 128;

/// Represents the container version family of a replay file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayVersion {
    /// Classic Brood War (pre-Remastered clients).
    ///
    /// Characteristics:
    /// - No container magic
    /// - 24 simulation frames per second
    /// - Payload may be bare, zlib-wrapped, or PKWare-imploded
    Classic,

    /// StarCraft: Remastered (1.18+).
    ///
    /// Characteristics:
    /// - `seRS` magic at byte offset 12
    /// - 23.81 simulation frames per second
    /// - Single zlib stream after the 16-byte preamble
    Remastered,
}

impl ReplayVersion {
    /// Returns the simulation frame rate for this version.
    ///
    /// All frame-to-wall-clock conversions use this value.
    #[must_use]
    pub const fn frames_per_second(&self) -> f64 {
        match self {
            ReplayVersion::Classic => 24.0,
            ReplayVersion::Remastered => 23.81,
        }
    }
}

/// Represents the compression scheme wrapping the replay payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionScheme {
    /// Uncompressed payload starting directly with the header block.
    Raw,

    /// A zlib-wrapped deflate stream.
    Zlib,

    /// A PKWare Data Compression Library "imploded" stream.
    PkWare,
}

impl CompressionScheme {
    /// Returns a short lowercase name for log and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            CompressionScheme::Raw => "raw",
            CompressionScheme::Zlib => "zlib",
            CompressionScheme::PkWare => "pkware",
        }
    }
}

/// The sniffer's classification of a raw buffer.
///
/// Produced once per decode, before any decompression; carries everything
/// the downstream stages need to locate and inflate the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTag {
    /// Detected container version family.
    pub version: ReplayVersion,

    /// Detected compression scheme.
    pub compression: CompressionScheme,

    /// Byte offset where the (possibly compressed) payload begins.
    pub payload_offset: usize,
}

/// Scans a bounded window for one of the known zlib stream markers.
///
/// Returns the absolute offset of the first marker found, or `None` if no
/// marker occurs within `window` bytes starting at `start`.
#[must_use]
pub fn find_zlib_marker(data: &[u8], start: usize, window: usize) -> Option<usize> {
    let end = data.len().min(start.saturating_add(window));
    if start >= end {
        return None;
    }

    data[start..end]
        .windows(2)
        .position(|pair| ZLIB_MARKERS.iter().any(|m| m == pair))
        .map(|pos| start + pos)
}

/// Returns whether the buffer starts with a plausible PKWare DCL header.
///
/// A DCL stream begins with a compression-type byte (0 = binary, 1 = ASCII)
/// followed by the dictionary size in bits (4, 5, or 6).
#[must_use]
fn looks_like_pkware(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] <= 1 && (4..=6).contains(&data[1])
}

/// Returns whether the buffer starts with a plausible bare header block.
///
/// The first payload byte is the engine id (0 = StarCraft, 1 = Brood War)
/// and the following u32 is the frame count, which must fit the 24-hour
/// sanity bound.
#[must_use]
fn looks_like_bare_header(data: &[u8]) -> bool {
    if data.len() < HEADER_BLOCK_SIZE {
        return false;
    }

    let engine = data[0];
    let frames = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    engine <= 1 && frames <= MAX_FRAME_COUNT
}

/// Sniffs the container version and compression scheme of a replay buffer.
///
/// This is a pure function of the byte buffer: no allocation beyond the
/// returned tag, no side effects.
///
/// # Detection order
///
/// 1. 16 bytes or fewer: `TruncatedInput` (the preamble alone leaves no
///    room for a payload).
/// 2. `seRS` at offset 12: Remastered; a zlib marker must appear within the
///    128-byte window after the preamble, else `NoCompressedPayloadFound`.
/// 3. Otherwise Classic: zlib marker scan from offset 0, then a PKWare
///    probe, then the bare-header fallback.
/// 4. Nothing matches: `UnsupportedFormat`.
///
/// # Errors
///
/// - `DecodeError::TruncatedInput` if the buffer is under 16 bytes
/// - `DecodeError::NoCompressedPayloadFound` if a Remastered container has
///   no zlib marker in the scan window
/// - `DecodeError::UnsupportedFormat` if no known layout matches
///
/// # Example
///
/// ```
/// use bwrep_parser::format::{sniff, CompressionScheme, ReplayVersion};
///
/// // A Classic zlib container: marker right at offset 0
/// let mut data = vec![0u8; 64];
/// data[0] = 0x78;
/// data[1] = 0x9C;
/// let tag = sniff(&data).unwrap();
/// assert_eq!(tag.version, ReplayVersion::Classic);
/// assert_eq!(tag.compression, CompressionScheme::Zlib);
/// ```
pub fn sniff(data: &[u8]) -> Result<FormatTag> {
    if data.len() <= MIN_SNIFF_LEN {
        return Err(DecodeError::truncated(MIN_SNIFF_LEN + 1, data.len()));
    }

    // Remastered containers carry the seRS magic at offset 12
    let magic = &data[REMASTERED_MAGIC_OFFSET..REMASTERED_MAGIC_OFFSET + 4];
    if magic == REMASTERED_MAGIC {
        let scan_start = REMASTERED_MAGIC_OFFSET + 4;
        return match find_zlib_marker(data, scan_start, MARKER_SCAN_WINDOW) {
            Some(offset) => Ok(FormatTag {
                version: ReplayVersion::Remastered,
                compression: CompressionScheme::Zlib,
                payload_offset: offset,
            }),
            None => Err(DecodeError::NoCompressedPayloadFound {
                window: MARKER_SCAN_WINDOW,
            }),
        };
    }

    // Classic: zlib-wrapped payloads carry their marker near the start
    if let Some(offset) = find_zlib_marker(data, 0, MARKER_SCAN_WINDOW) {
        return Ok(FormatTag {
            version: ReplayVersion::Classic,
            compression: CompressionScheme::Zlib,
            payload_offset: offset,
        });
    }

    if looks_like_pkware(data) {
        return Ok(FormatTag {
            version: ReplayVersion::Classic,
            compression: CompressionScheme::PkWare,
            payload_offset: 0,
        });
    }

    if looks_like_bare_header(data) {
        return Ok(FormatTag {
            version: ReplayVersion::Classic,
            compression: CompressionScheme::Raw,
            payload_offset: 0,
        });
    }

    Err(DecodeError::unsupported_format(
        "no Remastered magic, zlib marker, PKWare header, or bare header block",
        data,
    ))
}
