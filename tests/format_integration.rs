//! Integration tests for format sniffing against synthetic containers.

mod common;

use bwrep_parser::error::DecodeError;
use bwrep_parser::format::{sniff, CompressionScheme, ReplayVersion, REMASTERED_MAGIC};

use common::two_player_game;

#[test]
fn test_sniff_remastered_container() {
    let data = two_player_game(2880).build_remastered();
    let tag = sniff(&data).unwrap();

    assert_eq!(tag.version, ReplayVersion::Remastered);
    assert_eq!(tag.compression, CompressionScheme::Zlib);
    assert_eq!(tag.payload_offset, 16);
}

#[test]
fn test_sniff_classic_zlib_container() {
    let data = two_player_game(2880).build_classic_zlib();
    let tag = sniff(&data).unwrap();

    assert_eq!(tag.version, ReplayVersion::Classic);
    assert_eq!(tag.compression, CompressionScheme::Zlib);
    assert_eq!(tag.payload_offset, 0);
}

#[test]
fn test_sniff_classic_raw_container() {
    let data = two_player_game(2880).build_classic_raw();
    let tag = sniff(&data).unwrap();

    assert_eq!(tag.version, ReplayVersion::Classic);
    assert_eq!(tag.compression, CompressionScheme::Raw);
    assert_eq!(tag.payload_offset, 0);
}

#[test]
fn test_sixteen_byte_buffer_is_truncated_input() {
    let data = [0u8; 16];
    assert!(matches!(
        sniff(&data),
        Err(DecodeError::TruncatedInput { .. })
    ));
}

#[test]
fn test_remastered_magic_without_marker_is_hard_failure() {
    // seRS at offset 12 but nothing resembling a zlib stream afterwards:
    // the sniffer must fail rather than substitute synthetic data.
    let mut data = vec![0u8; 512];
    data[12..16].copy_from_slice(REMASTERED_MAGIC);

    assert!(matches!(
        sniff(&data),
        Err(DecodeError::NoCompressedPayloadFound { window: 128 })
    ));
}

#[test]
fn test_remastered_marker_outside_window_not_found() {
    let mut data = vec![0u8; 512];
    data[12..16].copy_from_slice(REMASTERED_MAGIC);
    // Marker beyond the 128-byte scan window
    data[200] = 0x78;
    data[201] = 0x9C;

    assert!(matches!(
        sniff(&data),
        Err(DecodeError::NoCompressedPayloadFound { .. })
    ));
}

#[test]
fn test_unrecognizable_buffer_is_unsupported() {
    let data = vec![0xEEu8; 256];
    assert!(matches!(
        sniff(&data),
        Err(DecodeError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_sniff_is_pure() {
    let data = two_player_game(2880).build_remastered();
    let first = sniff(&data).unwrap();
    let second = sniff(&data).unwrap();
    assert_eq!(first, second);
}
