//! The static opcode table for the replay command stream.
//!
//! Every command in the decompressed stream is tagged with a single opcode
//! byte. This table maps each known opcode to its name, payload shape, and
//! gameplay class. The table is the single source of truth for stream
//! walking: the decoder consumes exactly the bytes the table declares and
//! never guesses a length for an opcode that is absent.
//!
//! # Payload shapes
//!
//! Most commands have a fixed payload length. Selection commands are
//! length-prefixed: a count byte followed by `count` unit tags (2 bytes
//! each in Classic, 4 bytes in the Remastered wide variants).
//!
//! # Classes
//!
//! The [`CommandClass`] drives the metrics engine: selection and hotkey
//! traffic is excluded from effective APM, and the build/train/morph/
//! research/upgrade classes feed build-order extraction.

/// How many payload bytes follow an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// A fixed number of payload bytes.
    Fixed(usize),

    /// A count byte followed by `count * item_size` bytes.
    CountPrefixed {
        /// Size of one counted item in bytes.
        item_size: usize,
    },
}

/// Gameplay classification of a command, used by the metrics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandClass {
    /// Unit selection and control-group traffic. Never effective.
    Selection,

    /// Movement, attack, and other unit orders. Effective.
    Order,

    /// Placing a building. Effective; feeds build orders.
    Build,

    /// Training a unit. Effective; feeds build orders.
    Train,

    /// Unit or building morph (Zerg). Effective; feeds build orders.
    Morph,

    /// Research of a tech. Effective; feeds build orders.
    Research,

    /// An armor/weapon/ability upgrade. Effective; feeds build orders.
    Upgrade,

    /// Everything else: vision, alliance, chat, pings, sync traffic.
    /// Never effective.
    Other,
}

impl CommandClass {
    /// Returns whether commands of this class count toward effective APM.
    #[must_use]
    pub const fn is_effective(self) -> bool {
        !matches!(self, CommandClass::Selection | CommandClass::Other)
    }

    /// Returns whether commands of this class appear in build orders.
    #[must_use]
    pub const fn is_build_order(self) -> bool {
        matches!(
            self,
            CommandClass::Build
                | CommandClass::Train
                | CommandClass::Morph
                | CommandClass::Research
                | CommandClass::Upgrade
        )
    }
}

/// One entry of the static opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// The opcode byte.
    pub opcode: u8,

    /// Human-readable command name.
    pub name: &'static str,

    /// Payload shape following the opcode byte.
    pub shape: PayloadShape,

    /// Gameplay classification.
    pub class: CommandClass,
}

use CommandClass::{Build, Morph, Order, Other, Research, Selection, Train, Upgrade};
use PayloadShape::{CountPrefixed, Fixed};

macro_rules! op {
    ($opcode:expr, $name:expr, $shape:expr, $class:expr) => {
        OpcodeInfo {
            opcode: $opcode,
            name: $name,
            shape: $shape,
            class: $class,
        }
    };
}

/// The static opcode table, sorted by opcode byte.
///
/// Classic opcodes occupy 0x05..=0x5C; the 0x60..=0x65 range holds the
/// Remastered 1.21+ wide-slot variants.
pub static OPCODE_TABLE: &[OpcodeInfo] = &[
    op!(0x05, "Keep Alive", Fixed(0), Other),
    op!(0x09, "Select", CountPrefixed { item_size: 2 }, Selection),
    op!(0x0A, "Shift Select", CountPrefixed { item_size: 2 }, Selection),
    op!(0x0B, "Shift Deselect", CountPrefixed { item_size: 2 }, Selection),
    op!(0x0C, "Build", Fixed(7), Build),
    op!(0x0D, "Vision", Fixed(2), Other),
    op!(0x0E, "Alliance", Fixed(4), Other),
    op!(0x0F, "Game Speed", Fixed(1), Other),
    op!(0x10, "Pause", Fixed(0), Other),
    op!(0x11, "Resume", Fixed(0), Other),
    op!(0x13, "Hotkey", Fixed(2), Selection),
    op!(0x14, "Right Click", Fixed(9), Order),
    op!(0x15, "Targeted Order", Fixed(10), Order),
    op!(0x18, "Cancel", Fixed(0), Order),
    op!(0x19, "Cancel Hatch", Fixed(0), Order),
    op!(0x1A, "Stop", Fixed(1), Order),
    op!(0x1E, "Return Cargo", Fixed(1), Order),
    op!(0x1F, "Train", Fixed(2), Train),
    op!(0x20, "Cancel Train", Fixed(2), Order),
    op!(0x21, "Cloak", Fixed(1), Order),
    op!(0x22, "Decloak", Fixed(1), Order),
    op!(0x23, "Unit Morph", Fixed(2), Morph),
    op!(0x25, "Unsiege", Fixed(1), Order),
    op!(0x26, "Siege", Fixed(1), Order),
    op!(0x27, "Train Fighter", Fixed(0), Train),
    op!(0x28, "Unload All", Fixed(1), Order),
    op!(0x29, "Unload", Fixed(2), Order),
    op!(0x2A, "Merge Archon", Fixed(0), Order),
    op!(0x2B, "Hold Position", Fixed(1), Order),
    op!(0x2C, "Burrow", Fixed(1), Order),
    op!(0x2D, "Unburrow", Fixed(1), Order),
    op!(0x2E, "Cancel Nuke", Fixed(0), Order),
    op!(0x2F, "Lift", Fixed(4), Order),
    op!(0x30, "Research", Fixed(1), Research),
    op!(0x31, "Cancel Research", Fixed(0), Order),
    op!(0x32, "Upgrade", Fixed(1), Upgrade),
    op!(0x33, "Cancel Upgrade", Fixed(0), Order),
    op!(0x35, "Building Morph", Fixed(2), Morph),
    op!(0x36, "Stim", Fixed(0), Order),
    op!(0x37, "Sync", Fixed(6), Other),
    op!(0x57, "Leave Game", Fixed(1), Other),
    op!(0x58, "Minimap Ping", Fixed(4), Other),
    op!(0x5A, "Merge Dark Archon", Fixed(0), Order),
    op!(0x5C, "Chat", Fixed(81), Other),
    op!(0x60, "Right Click (wide)", Fixed(11), Order),
    op!(0x61, "Targeted Order (wide)", Fixed(12), Order),
    op!(0x62, "Unload (wide)", Fixed(3), Order),
    op!(0x63, "Select (wide)", CountPrefixed { item_size: 4 }, Selection),
    op!(0x64, "Shift Select (wide)", CountPrefixed { item_size: 4 }, Selection),
    op!(0x65, "Shift Deselect (wide)", CountPrefixed { item_size: 4 }, Selection),
];

/// Looks up an opcode in the static table.
///
/// Returns `None` for opcodes with no entry; the caller decides whether
/// that is an `UnknownOpcode` failure.
#[must_use]
pub fn lookup(opcode: u8) -> Option<&'static OpcodeInfo> {
    OPCODE_TABLE
        .binary_search_by_key(&opcode, |info| info.opcode)
        .ok()
        .map(|index| &OPCODE_TABLE[index])
}
