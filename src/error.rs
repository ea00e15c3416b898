//! Error types for the Brood War replay decoder.
//!
//! This module defines the error taxonomy for every failure case a decode
//! can hit: truncated input, unrecognized containers, malformed headers,
//! decompression failures, and command-stream desynchronization. All errors
//! are terminal for the decode call; the decoder never substitutes synthetic
//! placeholder data for a failed stage.

use thiserror::Error;

/// The main error type for replay decoding operations.
///
/// Every variant carries enough context (byte offsets, detected scheme,
/// frame values) to be actionable in logs.
///
/// # Example
///
/// ```
/// use bwrep_parser::error::{DecodeError, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(DecodeError::MalformedHeader {
///         reason: "missing required field".to_string(),
///     })
/// }
/// ```
#[derive(Error, Debug)]
pub enum DecodeError {
    /// An I/O error occurred while reading the replay file.
    ///
    /// Only the binaries perform file I/O; the library itself operates on
    /// in-memory buffers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input buffer ended before the required bytes could be read.
    #[error("truncated input: expected {expected} bytes, but only {available} available")]
    TruncatedInput {
        /// The number of bytes that were expected to be available.
        expected: usize,
        /// The actual number of bytes available.
        available: usize,
    },

    /// The buffer does not match any known replay container layout.
    ///
    /// Raised by the format sniffer when neither the Remastered magic, a
    /// zlib stream marker, a PKWare control byte, nor a plausible bare
    /// header block is present.
    #[error("unsupported format: {reason} (first bytes: {first_bytes})")]
    UnsupportedFormat {
        /// A description of what ruled out every known container layout.
        reason: String,
        /// The leading bytes of the buffer, as a hex string.
        first_bytes: String,
    },

    /// The replay header block failed a structural or sanity check.
    #[error("malformed header: {reason}")]
    MalformedHeader {
        /// A description of what makes the header invalid.
        reason: String,
    },

    /// A compressed container was detected but no compressed stream marker
    /// was found inside the bounded scan window.
    #[error("no compressed payload found within the first {window} bytes")]
    NoCompressedPayloadFound {
        /// The size of the scan window, in bytes.
        window: usize,
    },

    /// Decompression failed for the sniffed scheme and every allowed
    /// alternate.
    #[error("decompression failed: {reason}")]
    DecompressionFailed {
        /// A description of the failure, naming each attempted scheme.
        reason: String,
    },

    /// The command stream contains an opcode with no table entry and no
    /// inferable payload length.
    ///
    /// Decoding stops at this point rather than guessing a length and
    /// desynchronizing the remainder of the stream.
    #[error("unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode {
        /// The unrecognized opcode byte.
        opcode: u8,
        /// Byte offset of the opcode within the decompressed payload.
        offset: usize,
    },

    /// The command stream ended mid-record.
    ///
    /// End of buffer on a block boundary is a clean finish; any other form
    /// of exhaustion surfaces here.
    #[error("truncated command stream at offset {offset}")]
    TruncatedCommandStream {
        /// Byte offset where the stream ran dry.
        offset: usize,
    },

    /// A frame block's frame number exceeds the header's frame count.
    ///
    /// Commands beyond the header bound are a format violation, not data
    /// to be silently dropped.
    #[error(
        "frame {frame} at offset {offset} exceeds header frame count {frame_count}"
    )]
    FrameOutOfBounds {
        /// The offending frame number.
        frame: u32,
        /// The frame count declared by the header.
        frame_count: u32,
        /// Byte offset of the frame block.
        offset: usize,
    },

    /// The header's slot table contains no populated player slots.
    #[error("no players found in slot table")]
    NoPlayersFound,

    /// The caller cancelled the decode between pipeline stages.
    #[error("decode cancelled before stage '{stage}'")]
    Cancelled {
        /// The pipeline stage that would have run next.
        stage: &'static str,
    },
}

impl DecodeError {
    /// Creates a `TruncatedInput` error with the given sizes.
    #[must_use]
    pub fn truncated(expected: usize, available: usize) -> Self {
        DecodeError::TruncatedInput {
            expected,
            available,
        }
    }

    /// Creates an `UnsupportedFormat` error, rendering the buffer's leading
    /// bytes as hex for display.
    #[must_use]
    pub fn unsupported_format(reason: impl Into<String>, data: &[u8]) -> Self {
        DecodeError::UnsupportedFormat {
            reason: reason.into(),
            first_bytes: bytes_to_hex(data),
        }
    }

    /// Creates a `MalformedHeader` error from any displayable reason.
    #[must_use]
    pub fn malformed_header(reason: impl Into<String>) -> Self {
        DecodeError::MalformedHeader {
            reason: reason.into(),
        }
    }
}

/// Converts a byte slice to a hexadecimal string representation.
///
/// Slices of 8 bytes or less format as space-separated hex values; longer
/// slices show the first 8 bytes followed by "...".
fn bytes_to_hex(bytes: &[u8]) -> String {
    if bytes.len() <= 8 {
        bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        let prefix: String = bytes[..8]
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{prefix}... ({} bytes total)", bytes.len())
    }
}

/// A specialized Result type for replay decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::truncated(16, 4);
        assert!(err.to_string().contains("expected 16 bytes"));
        assert!(err.to_string().contains("4 available"));

        let err = DecodeError::malformed_header("frame count implausible");
        assert!(err.to_string().contains("malformed header"));
        assert!(err.to_string().contains("frame count implausible"));

        let err = DecodeError::NoCompressedPayloadFound { window: 128 };
        assert!(err.to_string().contains("first 128 bytes"));

        let err = DecodeError::UnknownOpcode {
            opcode: 0xAB,
            offset: 1337,
        };
        assert!(err.to_string().contains("0xAB"));
        assert!(err.to_string().contains("1337"));

        let err = DecodeError::FrameOutOfBounds {
            frame: 5000,
            frame_count: 2880,
            offset: 42,
        };
        assert!(err.to_string().contains("5000"));
        assert!(err.to_string().contains("2880"));
    }

    #[test]
    fn test_unsupported_format_renders_hex() {
        let err = DecodeError::unsupported_format("no magic", b"BAD!");
        match err {
            DecodeError::UnsupportedFormat { first_bytes, .. } => {
                assert_eq!(first_bytes, "42 41 44 21");
            }
            _ => panic!("expected UnsupportedFormat variant"),
        }
    }

    #[test]
    fn test_bytes_to_hex_long() {
        let bytes = b"a longer buffer than eight";
        let result = bytes_to_hex(bytes);
        assert!(result.contains("..."));
        assert!(result.contains("26 bytes total"));
    }

    #[test]
    fn test_error_is_send_sync() {
        // Ensure the error type can cross thread boundaries
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DecodeError>();
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "test error");
        let decode_err: DecodeError = io_err.into();
        match decode_err {
            DecodeError::Io(_) => {}
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
