//! # Brood War Replay Parser
//!
//! A comprehensive StarCraft: Brood War replay (`.rep`) decoder library.
//!
//! This library turns a replay byte buffer into structured gameplay data:
//! players, map, duration, the full time-ordered command log, and derived
//! metrics (APM, effective APM, build orders). It handles every container
//! variant found in the wild:
//!
//! - **Classic** replays: bare, zlib-wrapped, or PKWare-imploded payloads
//! - **Remastered** (`seRS`) containers with a single zlib stream
//!
//! ## Quick Start
//!
//! ```no_run
//! use bwrep_parser::decode;
//!
//! fn inspect(data: &[u8]) -> bwrep_parser::error::Result<()> {
//!     let result = decode(data)?;
//!
//!     println!("Map: {}", result.header.map_name);
//!     println!("Duration: {}", result.header.duration);
//!
//!     for player in &result.players {
//!         let metrics = result.metrics_for(player.slot_id);
//!         println!("  {} ({}): {:?}", player.name, player.race, metrics);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error taxonomy and result alias for decode operations
//! - [`binary`] - Low-level binary reading utilities for little-endian data
//! - [`format`] - Container version and compression scheme sniffing
//! - [`decompress`] - Zlib, raw-deflate, and PKWare explode inflation
//! - [`header`] - Fixed-offset header block decoding via layout tables
//! - [`commands`] - Command stream decoding over the static opcode table
//! - [`players`] - Slot table resolution and race normalization
//! - [`metrics`] - APM/EAPM computation and build-order extraction
//! - [`decoder`] - The staged pipeline and cancellation
//! - [`replay`] - The immutable [`ReplayResult`] aggregate
//!
//! ## Format Reference
//!
//! Key binary facts the decoder honors:
//!
//! - Remastered magic `seRS` at byte offset 12
//! - zlib markers `78 01`, `78 9C`, `78 DA`, `78 5E`, scanned within a
//!   128-byte window
//! - Frame rate 24 fps (Classic) / 23.81 fps (Remastered)
//! - A 633-byte header block followed by a length-prefixed command segment
//!
//! All multi-byte integers are little-endian.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binary;
pub mod commands;
pub mod decoder;
pub mod decompress;
pub mod error;
pub mod format;
pub mod header;
pub mod metrics;
pub mod players;
pub mod replay;

// Re-export commonly used types at the crate root
pub use commands::{Command, CommandClass, CommandIterator, OpcodeInfo, PayloadShape};
pub use decoder::{decode, CancelToken, DecodeOptions, Decoder};
pub use decompress::decompress;
pub use error::{DecodeError, Result};
pub use format::{sniff, CompressionScheme, FormatTag, ReplayVersion};
pub use header::{GameType, HeaderBlock, RawSlot, ReplayHeader};
pub use metrics::{BuildAction, BuildOrderEntry, PlayerMetrics};
pub use players::{Player, Race, RaceHints};
pub use replay::ReplayResult;
