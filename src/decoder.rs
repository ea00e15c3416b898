//! The decode pipeline: one entry point from bytes to [`ReplayResult`].
//!
//! A [`Decoder`] value runs the stages in order (sniff, decompress,
//! header, commands, players, metrics, assemble), each stage fully
//! consuming its predecessor's output. The pipeline is synchronous and
//! single-threaded per replay, holds no global state, and takes an owned
//! view of the input, so callers may run any number of decodes
//! concurrently on separate threads.
//!
//! Cancellation is cooperative: [`Decoder::decode_with_cancel`] checks a
//! [`CancelToken`] between stage boundaries and returns
//! `DecodeError::Cancelled` once the token trips.
//!
//! # Example
//!
//! ```no_run
//! use bwrep_parser::decoder::Decoder;
//!
//! let data = std::fs::read("match.rep").unwrap();
//! let result = Decoder::new().decode(&data)?;
//!
//! for player in &result.players {
//!     let metrics = result.metrics_for(player.slot_id);
//!     println!("{} ({}): {:?}", player.name, player.race, metrics);
//! }
//! # Ok::<(), bwrep_parser::error::DecodeError>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::commands::parse_command_segment;
use crate::decompress::decompress;
use crate::error::{DecodeError, Result};
use crate::format::sniff;
use crate::header::layout::HEADER_BLOCK_SIZE;
use crate::header::HeaderBlock;
use crate::metrics::{compute_metrics, extract_build_orders, DEFAULT_SPAM_WINDOW_FRAMES};
use crate::players::resolve_players;
use crate::replay::ReplayResult;

/// A clonable handle for aborting a decode between pipeline stages.
///
/// The token is a shared flag: clone it, hand one copy to the decoding
/// thread, and call [`CancelToken::cancel`] from anywhere (a timeout
/// task, a user interface) to stop the decode at the next stage boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, untripped token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trips the token. Every decode holding a clone stops at its next
    /// stage boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns whether the token has been tripped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn check(&self, stage: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(DecodeError::Cancelled { stage });
        }
        Ok(())
    }
}

/// Tunables for a decode call.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Frames within which a repeated opcode from the same player is
    /// counted as spam for EAPM.
    pub spam_window_frames: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            spam_window_frames: DEFAULT_SPAM_WINDOW_FRAMES,
        }
    }
}

/// The replay decoder.
///
/// Construct one per call or cache it immutably; it holds only options,
/// never parser state.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with explicit options.
    #[must_use]
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes a replay buffer into a [`ReplayResult`].
    ///
    /// # Errors
    ///
    /// Any variant of [`DecodeError`] except `Cancelled`; see the error
    /// taxonomy for the failure each stage can produce.
    pub fn decode(&self, data: &[u8]) -> Result<ReplayResult> {
        self.decode_with_cancel(data, &CancelToken::new())
    }

    /// Decodes a replay buffer, checking the cancel token between stages.
    ///
    /// # Errors
    ///
    /// As [`Decoder::decode`], plus `DecodeError::Cancelled` if the token
    /// trips before a stage boundary.
    pub fn decode_with_cancel(&self, data: &[u8], cancel: &CancelToken) -> Result<ReplayResult> {
        cancel.check("sniff")?;
        let tag = sniff(data)?;
        debug!(
            version = ?tag.version,
            compression = tag.compression.name(),
            payload_offset = tag.payload_offset,
            "sniffed container format"
        );

        cancel.check("decompress")?;
        let payload = decompress(data, &tag)?;
        debug!(payload_len = payload.len(), "decompressed payload");

        cancel.check("header")?;
        let block = HeaderBlock::parse(&payload, tag.version)?;
        debug!(
            map = %block.header.map_name,
            frames = block.header.frame_count,
            "decoded header block"
        );

        cancel.check("commands")?;
        let commands =
            parse_command_segment(&payload, HEADER_BLOCK_SIZE, block.header.frame_count)?;
        debug!(command_count = commands.len(), "decoded command stream");

        cancel.check("players")?;
        let players = resolve_players(&block.slots)?;

        // Referential integrity: every command must belong to a known slot
        let orphan = commands
            .iter()
            .find(|c| !players.iter().any(|p| p.slot_id == c.slot_id));
        if let Some(command) = orphan {
            return Err(DecodeError::malformed_header(format!(
                "command at frame {} references slot {} which holds no player",
                command.frame, command.slot_id
            )));
        }

        cancel.check("metrics")?;
        let fps = tag.version.frames_per_second();
        let metrics = compute_metrics(
            &commands,
            block.header.frame_count,
            fps,
            self.options.spam_window_frames,
        );
        let build_orders = extract_build_orders(&commands, fps);

        cancel.check("assemble")?;
        Ok(ReplayResult {
            header: block.header,
            players,
            commands,
            build_orders,
            metrics,
        })
    }
}

/// Decodes a replay buffer with default options.
///
/// Convenience wrapper over [`Decoder::decode`].
///
/// # Errors
///
/// See [`Decoder::decode`].
pub fn decode(data: &[u8]) -> Result<ReplayResult> {
    Decoder::new().decode(data)
}
