//! Fixed-offset layout tables for the replay header block.
//!
//! The header block is a 633-byte (0x279) structure at offset 0 of the
//! decompressed payload. Every field lives at a fixed offset; the offsets
//! are collected here in one version-keyed lookup table instead of being
//! scattered through parsing code.
//!
//! # Header block layout
//!
//! | Offset | Size | Type | Field |
//! |--------|------|------|-------|
//! | 0x00 | 1 | u8 | Engine id (0 = StarCraft, 1 = Brood War) |
//! | 0x01 | 4 | u32 | Frame count |
//! | 0x08 | 4 | u32 | Start time (unix seconds) |
//! | 0x18 | 28 | text | Game title |
//! | 0x34 | 2 | u16 | Map width (tiles) |
//! | 0x36 | 2 | u16 | Map height (tiles) |
//! | 0x3A | 1 | u8 | Game speed |
//! | 0x3C | 2 | u16 | Game type code |
//! | 0x48 | 25 | text | Host name |
//! | 0x61 | 32 | text | Map name |
//! | 0xA1 | 432 | 12 × 36 | Player slot table |
//! | 0x251 | 32 | 8 × u32 | Player color table |
//!
//! # Slot record layout (36 bytes)
//!
//! | Offset | Size | Type | Field |
//! |--------|------|------|-------|
//! | 0x00 | 2 | u16 | Slot id |
//! | 0x04 | 1 | u8 | Storm id |
//! | 0x08 | 1 | u8 | Player type (0 = none, 1 = computer, 2 = human) |
//! | 0x09 | 1 | u8 | Race code |
//! | 0x0A | 1 | u8 | Team |
//! | 0x0B | 25 | text | Player name |

use crate::format::ReplayVersion;

/// Total size of the header block at the start of the payload.
pub const HEADER_BLOCK_SIZE: usize = 0x279;

/// Upper sanity bound for the header's frame count.
///
/// Game sessions do not exceed 24 hours of Classic frames
/// (24 fps x 86,400 s).
pub const MAX_FRAME_COUNT: u32 = 24 * 86_400;

/// Number of slot records in the player table.
pub const SLOT_COUNT: usize = 12;

/// Size of one slot record in bytes.
pub const SLOT_RECORD_SIZE: usize = 36;

/// Number of entries in the color table.
pub const COLOR_COUNT: usize = 8;

/// Fixed field offsets for one header block version.
///
/// Kept as plain data so version differences stay in this table rather
/// than in conditionals inside the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Offset of the engine id byte.
    pub engine: usize,

    /// Offset of the u32 frame count.
    pub frame_count: usize,

    /// Offset of the u32 start time (unix seconds).
    pub start_time: usize,

    /// Offset and length of the game title field.
    pub title: (usize, usize),

    /// Offset of the u16 map width.
    pub map_width: usize,

    /// Offset of the u16 map height.
    pub map_height: usize,

    /// Offset of the game speed byte.
    pub game_speed: usize,

    /// Offset of the u16 game type code.
    pub game_type: usize,

    /// Offset and length of the host name field.
    pub host_name: (usize, usize),

    /// Offset and length of the map name field.
    pub map_name: (usize, usize),

    /// Offset of the first slot record.
    pub slot_table: usize,

    /// Offset of the color table.
    pub color_table: usize,
}

/// Layout of the Classic header block.
pub const CLASSIC_LAYOUT: HeaderLayout = HeaderLayout {
    engine: 0x00,
    frame_count: 0x01,
    start_time: 0x08,
    title: (0x18, 28),
    map_width: 0x34,
    map_height: 0x36,
    game_speed: 0x3A,
    game_type: 0x3C,
    host_name: (0x48, 25),
    map_name: (0x61, 32),
    slot_table: 0xA1,
    color_table: 0x251,
};

/// Layout of the Remastered header block.
///
/// Remastered kept the legacy block layout inside its new container; the
/// entry exists so version differences stay behind the table lookup.
pub const REMASTERED_LAYOUT: HeaderLayout = CLASSIC_LAYOUT;

/// Returns the header layout for the given container version.
#[must_use]
pub const fn layout_for(version: ReplayVersion) -> &'static HeaderLayout {
    match version {
        ReplayVersion::Classic => &CLASSIC_LAYOUT,
        ReplayVersion::Remastered => &REMASTERED_LAYOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_lookup() {
        assert_eq!(layout_for(ReplayVersion::Classic), &CLASSIC_LAYOUT);
        assert_eq!(layout_for(ReplayVersion::Remastered), &REMASTERED_LAYOUT);
    }

    #[test]
    fn test_slot_table_fits_header_block() {
        let table_end = CLASSIC_LAYOUT.slot_table + SLOT_COUNT * SLOT_RECORD_SIZE;
        assert_eq!(table_end, CLASSIC_LAYOUT.color_table);

        let colors_end = CLASSIC_LAYOUT.color_table + COLOR_COUNT * 4;
        assert!(colors_end <= HEADER_BLOCK_SIZE);
    }

    #[test]
    fn test_text_fields_do_not_overlap() {
        let (host_off, host_len) = CLASSIC_LAYOUT.host_name;
        let (map_off, _) = CLASSIC_LAYOUT.map_name;
        assert!(host_off + host_len <= map_off);
    }

    #[test]
    fn test_max_frame_count_is_24_hours() {
        assert_eq!(MAX_FRAME_COUNT, 2_073_600);
    }
}
