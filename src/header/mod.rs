//! Header decoding for the decompressed replay payload.
//!
//! The header block is the first 633 bytes of the decompressed payload.
//! Decoding reads fixed-offset fields through the version-keyed layout
//! table in [`layout`] and produces a [`ReplayHeader`] plus the raw slot
//! records the player resolver consumes.
//!
//! A header that fails any structural or sanity check aborts the whole
//! decode with `MalformedHeader`; no partial or placeholder header is ever
//! synthesized here.
//!
//! # Example
//!
//! ```no_run
//! use bwrep_parser::format::ReplayVersion;
//! use bwrep_parser::header::HeaderBlock;
//!
//! # fn payload() -> Vec<u8> { vec![] }
//! let payload: Vec<u8> = payload();
//! let block = HeaderBlock::parse(&payload, ReplayVersion::Classic)?;
//!
//! println!("Map: {}", block.header.map_name);
//! println!("Frames: {}", block.header.frame_count);
//! # Ok::<(), bwrep_parser::error::DecodeError>(())
//! ```

pub mod layout;

use serde::Serialize;

use crate::binary::{read_text_field, read_u16_le, read_u32_le, read_u8};
use crate::error::{DecodeError, Result};
use crate::format::ReplayVersion;
use crate::metrics::format_game_time;

use layout::{
    layout_for, COLOR_COUNT, HEADER_BLOCK_SIZE, MAX_FRAME_COUNT, SLOT_COUNT, SLOT_RECORD_SIZE,
};

/// The game type code from the header, normalized to an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameType {
    /// Standard melee game.
    Melee,
    /// Free-for-all.
    FreeForAll,
    /// One-on-one.
    OneOnOne,
    /// Ladder game.
    Ladder,
    /// Use Map Settings.
    UseMapSettings,
    /// Team melee.
    TeamMelee,
    /// Top vs Bottom.
    TopVsBottom,
    /// A code this decoder does not recognize.
    Unknown,
}

impl GameType {
    /// Maps the raw u16 game type code to the enum.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            0x02 => GameType::Melee,
            0x03 => GameType::FreeForAll,
            0x04 => GameType::OneOnOne,
            0x09 => GameType::Ladder,
            0x0A => GameType::UseMapSettings,
            0x0B => GameType::TeamMelee,
            0x0F => GameType::TopVsBottom,
            _ => GameType::Unknown,
        }
    }
}

/// One raw slot record from the header's player table.
///
/// These are the bytes as written by the game; the player resolver turns
/// populated slots into canonical [`crate::players::Player`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSlot {
    /// Slot id, the stable identity of a participant.
    pub slot_id: u8,

    /// Storm network id.
    pub storm_id: u8,

    /// Player type: 0 = empty, 1 = computer, 2 = human.
    pub player_type: u8,

    /// Raw race code as written by the recording client.
    pub race_code: u8,

    /// Team number.
    pub team: u8,

    /// Color id from the header's color table.
    pub color: u8,

    /// Player name, control characters stripped.
    pub name: String,
}

impl RawSlot {
    /// Returns whether this slot holds an actual participant.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        (self.player_type == 1 || self.player_type == 2) && !self.name.is_empty()
    }
}

/// Decoded header fields, read-only after parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayHeader {
    /// Human-readable engine description, e.g. `"Brood War (Remastered)"`.
    pub engine_version: String,

    /// Total simulation frames in the game.
    pub frame_count: u32,

    /// Game start time as unix seconds, taken verbatim from the header.
    pub start_time: u32,

    /// Normalized game type.
    pub game_type: GameType,

    /// Raw game speed setting (6 = fastest).
    pub game_speed: u8,

    /// Game title as entered by the host.
    pub title: String,

    /// Host player name.
    pub host_name: String,

    /// Map name, control characters stripped.
    pub map_name: String,

    /// Map width in tiles.
    pub map_width: u16,

    /// Map height in tiles.
    pub map_height: u16,

    /// Game duration as `m:ss`, derived from the frame count at the
    /// version's frame rate.
    pub duration: String,
}

/// The parsed header block: decoded fields plus the raw slot table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    /// Decoded fixed-offset fields.
    pub header: ReplayHeader,

    /// All twelve raw slot records, populated or not.
    pub slots: Vec<RawSlot>,
}

impl HeaderBlock {
    /// Parses the header block from the start of the decompressed payload.
    ///
    /// # Arguments
    ///
    /// * `payload` - The decompressed replay payload
    /// * `version` - The container version from the format sniffer
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::MalformedHeader` if the payload is shorter
    /// than the header block, the engine id is unrecognized, the frame
    /// count exceeds the 24-hour sanity bound, or a slot id does not fit
    /// in a byte.
    pub fn parse(payload: &[u8], version: ReplayVersion) -> Result<Self> {
        if payload.len() < HEADER_BLOCK_SIZE {
            return Err(DecodeError::malformed_header(format!(
                "payload is {} bytes, header block needs {HEADER_BLOCK_SIZE}",
                payload.len()
            )));
        }

        let layout = layout_for(version);

        let engine = read_u8(payload, layout.engine)?;
        let engine_name = match engine {
            0 => "StarCraft",
            1 => "Brood War",
            other => {
                return Err(DecodeError::malformed_header(format!(
                    "unrecognized engine id {other} at offset {:#X}",
                    layout.engine
                )));
            }
        };

        let frame_count = read_u32_le(payload, layout.frame_count)?;
        if frame_count > MAX_FRAME_COUNT {
            return Err(DecodeError::malformed_header(format!(
                "frame count {frame_count} exceeds sanity bound {MAX_FRAME_COUNT}"
            )));
        }

        let start_time = read_u32_le(payload, layout.start_time)?;
        let game_type = GameType::from_code(read_u16_le(payload, layout.game_type)?);
        let game_speed = read_u8(payload, layout.game_speed)?;
        let title = read_text_field(payload, layout.title.0, layout.title.1)?;
        let host_name = read_text_field(payload, layout.host_name.0, layout.host_name.1)?;
        let map_name = read_text_field(payload, layout.map_name.0, layout.map_name.1)?;
        let map_width = read_u16_le(payload, layout.map_width)?;
        let map_height = read_u16_le(payload, layout.map_height)?;

        let version_name = match version {
            ReplayVersion::Classic => "Classic",
            ReplayVersion::Remastered => "Remastered",
        };

        let header = ReplayHeader {
            engine_version: format!("{engine_name} ({version_name})"),
            frame_count,
            start_time,
            game_type,
            game_speed,
            title,
            host_name,
            map_name,
            map_width,
            map_height,
            duration: format_game_time(frame_count, version.frames_per_second()),
        };

        let slots = parse_slot_table(payload, layout)?;

        Ok(HeaderBlock { header, slots })
    }
}

/// Parses all twelve slot records plus the color table.
fn parse_slot_table(payload: &[u8], layout: &layout::HeaderLayout) -> Result<Vec<RawSlot>> {
    let mut slots = Vec::with_capacity(SLOT_COUNT);

    for index in 0..SLOT_COUNT {
        let base = layout.slot_table + index * SLOT_RECORD_SIZE;

        let slot_id_raw = read_u16_le(payload, base)?;
        let slot_id = u8::try_from(slot_id_raw).map_err(|_| {
            DecodeError::malformed_header(format!(
                "slot record {index}: slot id {slot_id_raw} does not fit in a byte"
            ))
        })?;

        let storm_id = read_u8(payload, base + 0x04)?;
        let player_type = read_u8(payload, base + 0x08)?;
        let race_code = read_u8(payload, base + 0x09)?;
        let team = read_u8(payload, base + 0x0A)?;
        let name = read_text_field(payload, base + 0x0B, 25)?;

        // Colors are indexed by slot position; slots past the color table
        // share the last entry (observer slots in UMS games).
        let color_index = index.min(COLOR_COUNT - 1);
        let color_word = read_u32_le(payload, layout.color_table + color_index * 4)?;
        #[allow(clippy::cast_possible_truncation)]
        let color = (color_word & 0xFF) as u8;

        slots.push(RawSlot {
            slot_id,
            storm_id,
            player_type,
            race_code,
            team,
            color,
            name,
        });
    }

    Ok(slots)
}
