//! Binary to analyze replay structure for debugging

use std::collections::HashMap;
use std::env;
use std::fs;

use bwrep_parser::commands::{parse_command_segment, OPCODE_TABLE};
use bwrep_parser::decompress::decompress;
use bwrep_parser::format::sniff;
use bwrep_parser::header::layout::HEADER_BLOCK_SIZE;
use bwrep_parser::header::HeaderBlock;
use bwrep_parser::players::resolve_players;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: analyze <replay.rep>");
        std::process::exit(1);
    }

    let data = fs::read(&args[1]).unwrap();
    println!("File size: {} bytes", data.len());

    // Sniff format
    let tag = match sniff(&data) {
        Ok(tag) => tag,
        Err(e) => {
            println!("Sniff failed: {e}");
            println!("\n=== First 64 bytes (hex) ===");
            hex_dump(&data, 0, 64.min(data.len()));
            std::process::exit(1);
        }
    };

    println!("\n=== Format ===");
    println!("Version: {:?}", tag.version);
    println!("Compression: {}", tag.compression.name());
    println!("Payload offset: {}", tag.payload_offset);

    // Decompress
    let payload = match decompress(&data, &tag) {
        Ok(payload) => payload,
        Err(e) => {
            println!("Decompression failed: {e}");
            std::process::exit(1);
        }
    };
    println!("\n=== Payload ===");
    println!("Decompressed size: {} bytes", payload.len());

    println!("\n=== First 256 payload bytes (hex) ===");
    hex_dump(&payload, 0, 256.min(payload.len()));

    // Header block
    println!("\n=== Header Block ===");
    let block = match HeaderBlock::parse(&payload, tag.version) {
        Ok(block) => block,
        Err(e) => {
            println!("Header decode failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Engine: {}", block.header.engine_version);
    println!("Frames: {}", block.header.frame_count);
    println!("Duration: {}", block.header.duration);
    println!("Start time: {}", block.header.start_time);
    println!("Game type: {:?}", block.header.game_type);
    println!("Title: {}", block.header.title);
    println!("Host: {}", block.header.host_name);
    println!("Map: {} ({}x{})", block.header.map_name, block.header.map_width, block.header.map_height);

    println!("\n=== Slot Table ===");
    for slot in &block.slots {
        let state = if slot.is_populated() { "" } else { " (empty)" };
        println!(
            "  slot {:>2}: type={} race={} team={} color={} name={:?}{state}",
            slot.slot_id, slot.player_type, slot.race_code, slot.team, slot.color, slot.name
        );
    }

    match resolve_players(&block.slots) {
        Ok(players) => {
            println!("\n=== Players ===");
            for p in &players {
                println!("  [{}] {} - {}", p.slot_id, p.name, p.race);
            }
        }
        Err(e) => println!("\nPlayer resolution failed: {e}"),
    }

    // Command segment
    println!("\n=== Command Segment ===");
    match parse_command_segment(&payload, HEADER_BLOCK_SIZE, block.header.frame_count) {
        Ok(commands) => {
            println!("Decoded {} commands", commands.len());

            // Opcode distribution
            let mut by_opcode: HashMap<u8, usize> = HashMap::new();
            let mut by_slot: HashMap<u8, usize> = HashMap::new();
            for c in &commands {
                *by_opcode.entry(c.opcode).or_insert(0) += 1;
                *by_slot.entry(c.slot_id).or_insert(0) += 1;
            }

            println!("\n=== Opcode Distribution ===");
            let mut opcodes: Vec<_> = by_opcode.into_iter().collect();
            opcodes.sort_by(|a, b| b.1.cmp(&a.1));
            for (opcode, count) in opcodes {
                let name = OPCODE_TABLE
                    .iter()
                    .find(|info| info.opcode == opcode)
                    .map_or("?", |info| info.name);
                println!("  0x{opcode:02X} ({name}): {count}");
            }

            println!("\n=== Commands per Slot ===");
            let mut slots: Vec<_> = by_slot.into_iter().collect();
            slots.sort();
            for (slot, count) in slots {
                println!("  slot {slot}: {count}");
            }

            // First few commands for eyeballing
            println!("\n=== First 20 Commands ===");
            for c in commands.iter().take(20) {
                let name = c.info().map_or("?", |info| info.name);
                println!(
                    "  frame {:>7} slot {} {} {:02X?}",
                    c.frame, c.slot_id, name, c.payload
                );
            }
        }
        Err(e) => {
            println!("Command decode failed: {e}");
            // Show bytes around the failure region
            println!("\n=== Bytes at segment start ===");
            if HEADER_BLOCK_SIZE < payload.len() {
                hex_dump(
                    &payload,
                    HEADER_BLOCK_SIZE,
                    128.min(payload.len() - HEADER_BLOCK_SIZE),
                );
            }
        }
    }
}

fn hex_dump(data: &[u8], offset: usize, len: usize) {
    let end = (offset + len).min(data.len());
    for row_start in (offset..end).step_by(16) {
        let row_end = (row_start + 16).min(end);
        let row = &data[row_start..row_end];
        print!("{row_start:08X}: ");
        for (i, byte) in row.iter().enumerate() {
            print!("{byte:02X} ");
            if i == 7 {
                print!(" ");
            }
        }
        for i in row.len()..16 {
            print!("   ");
            if i == 7 {
                print!(" ");
            }
        }
        print!(" |");
        for byte in row {
            if *byte >= 0x20 && *byte < 0x7F {
                print!("{}", *byte as char);
            } else {
                print!(".");
            }
        }
        println!("|");
    }
}
