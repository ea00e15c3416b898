//! Synthetic replay containers for integration tests.
//!
//! The library ships no binary fixtures; these builders assemble
//! complete, structurally valid replay buffers from scratch (header
//! block, slot table, frame-block command segment) in every container
//! variant the sniffer recognizes.

// Each integration suite compiles its own copy of this module and uses a
// different subset of it.
#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use bwrep_parser::header::layout::{HEADER_BLOCK_SIZE, SLOT_RECORD_SIZE};

/// A player definition for the synthetic slot table.
pub struct TestPlayer {
    pub slot_id: u8,
    pub race_code: u8,
    pub team: u8,
    pub name: &'static str,
}

impl TestPlayer {
    pub fn terran(slot_id: u8, name: &'static str) -> Self {
        Self {
            slot_id,
            race_code: 1,
            team: 0,
            name,
        }
    }

    pub fn protoss(slot_id: u8, name: &'static str) -> Self {
        Self {
            slot_id,
            race_code: 2,
            team: 1,
            name,
        }
    }

    pub fn zerg(slot_id: u8, name: &'static str) -> Self {
        Self {
            slot_id,
            race_code: 0,
            team: 1,
            name,
        }
    }
}

/// Builds complete synthetic replay payloads and containers.
pub struct ReplayBuilder {
    frame_count: u32,
    start_time: u32,
    map_name: &'static str,
    players: Vec<TestPlayer>,
    blocks: Vec<u8>,
}

impl ReplayBuilder {
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count,
            start_time: 1_600_000_000,
            map_name: "Fighting Spirit",
            players: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn map_name(mut self, name: &'static str) -> Self {
        self.map_name = name;
        self
    }

    pub fn start_time(mut self, start_time: u32) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn player(mut self, player: TestPlayer) -> Self {
        self.players.push(player);
        self
    }

    /// Appends one frame block holding a single command.
    pub fn command(mut self, frame: u32, slot_id: u8, opcode: u8, payload: &[u8]) -> Self {
        let mut commands = Vec::with_capacity(2 + payload.len());
        commands.push(slot_id);
        commands.push(opcode);
        commands.extend_from_slice(payload);

        self.blocks.extend_from_slice(&frame.to_le_bytes());
        self.blocks.push(u8::try_from(commands.len()).unwrap());
        self.blocks.extend_from_slice(&commands);
        self
    }

    /// Appends one frame block with raw command bytes (for malformed cases).
    pub fn raw_block(mut self, frame: u32, commands: &[u8]) -> Self {
        self.blocks.extend_from_slice(&frame.to_le_bytes());
        self.blocks.push(u8::try_from(commands.len()).unwrap());
        self.blocks.extend_from_slice(commands);
        self
    }

    /// Produces the bare payload: header block plus command segment.
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = vec![0u8; HEADER_BLOCK_SIZE];

        payload[0x00] = 1; // Brood War engine
        payload[0x01..0x05].copy_from_slice(&self.frame_count.to_le_bytes());
        payload[0x08..0x0C].copy_from_slice(&self.start_time.to_le_bytes());
        write_text(&mut payload, 0x18, b"synthetic game");
        payload[0x34..0x36].copy_from_slice(&128u16.to_le_bytes());
        payload[0x36..0x38].copy_from_slice(&128u16.to_le_bytes());
        payload[0x3A] = 6; // fastest
        payload[0x3C..0x3E].copy_from_slice(&2u16.to_le_bytes()); // melee
        write_text(&mut payload, 0x48, b"host");
        write_text(&mut payload, 0x61, self.map_name.as_bytes());

        for (index, player) in self.players.iter().enumerate() {
            let base = 0xA1 + index * SLOT_RECORD_SIZE;
            payload[base..base + 2].copy_from_slice(&u16::from(player.slot_id).to_le_bytes());
            payload[base + 0x04] = player.slot_id;
            payload[base + 0x08] = 2; // human
            payload[base + 0x09] = player.race_code;
            payload[base + 0x0A] = player.team;
            write_text(&mut payload, base + 0x0B, player.name.as_bytes());

            payload[0x251 + index * 4..0x251 + index * 4 + 4]
                .copy_from_slice(&u32::from(player.slot_id).to_le_bytes());
        }

        payload.extend_from_slice(&u32::try_from(self.blocks.len()).unwrap().to_le_bytes());
        payload.extend_from_slice(&self.blocks);
        payload
    }

    /// A Classic container with an uncompressed payload.
    pub fn build_classic_raw(&self) -> Vec<u8> {
        self.payload()
    }

    /// A Classic container wrapping the payload in a zlib stream.
    pub fn build_classic_zlib(&self) -> Vec<u8> {
        zlib_compress(&self.payload())
    }

    /// A Remastered container: 16-byte preamble with the `seRS` magic at
    /// offset 12, then a zlib stream.
    pub fn build_remastered(&self) -> Vec<u8> {
        let mut container = vec![0u8; 16];
        container[12..16].copy_from_slice(b"seRS");
        container.extend_from_slice(&zlib_compress(&self.payload()));
        container
    }
}

fn write_text(buffer: &mut [u8], offset: usize, text: &[u8]) {
    buffer[offset..offset + text.len()].copy_from_slice(text);
}

pub fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A ready-made two-player skirmish used across the suites.
pub fn two_player_game(frame_count: u32) -> ReplayBuilder {
    ReplayBuilder::new(frame_count)
        .player(TestPlayer::terran(0, "Boxer"))
        .player(TestPlayer::protoss(1, "Bisu"))
}
