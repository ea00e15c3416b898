//! End-to-end decoder tests: the full pipeline, metrics, build orders,
//! and the output-contract properties.

mod common;

use bwrep_parser::error::DecodeError;
use bwrep_parser::{decode, BuildAction, CancelToken, Decoder, Race};

use common::{two_player_game, ReplayBuilder};

// ============================================================================
// Metrics
// ============================================================================

#[test]
fn test_apm_scenario_two_minute_game() {
    // 2880 frames at 24 fps is exactly 2 minutes; 300 commands for
    // slot 0 gives APM of about 150
    let mut builder = two_player_game(2880);
    for i in 0..300u32 {
        builder = builder.command(i * 9, 0, 0x14, &[0; 9]);
    }
    let result = decode(&builder.build_classic_zlib()).unwrap();

    let metrics = result.metrics_for(0).unwrap();
    assert_eq!(metrics.apm, 150);
}

#[test]
fn test_eapm_filters_selection_spam() {
    // Slot 0: alternating effective orders and selections. Selections
    // count toward APM but never EAPM.
    let mut builder = two_player_game(2880);
    for i in 0..60u32 {
        builder = builder
            .command(i * 40, 0, 0x14, &[0; 9]) // Right Click: effective
            .command(i * 40 + 20, 0, 0x09, &[0x00]); // Select: not
    }
    let result = decode(&builder.build_classic_zlib()).unwrap();

    let metrics = result.metrics_for(0).unwrap();
    assert_eq!(metrics.apm, 60); // 120 commands over 2 minutes
    assert_eq!(metrics.eapm, 30); // only the 60 orders
}

#[test]
fn test_eapm_suppresses_rapid_repeats() {
    // Four identical orders within the spam window: one effective
    let result = decode(
        &two_player_game(2880)
            .command(100, 0, 0x14, &[0; 9])
            .command(102, 0, 0x14, &[0; 9])
            .command(104, 0, 0x14, &[0; 9])
            .command(106, 0, 0x14, &[0; 9])
            .build_classic_zlib(),
    )
    .unwrap();

    let metrics = result.metrics_for(0).unwrap();
    assert_eq!(metrics.apm, 2); // 4 commands / 2 minutes
    assert_eq!(metrics.eapm, 1); // round(1 / 2.0) = 1
}

#[test]
fn test_metrics_remastered_frame_rate() {
    // 1440 frames at 23.81 fps is ~60.5 s; 100 commands give an APM of
    // round(100 / 1.008) = 99
    let mut builder = two_player_game(1440);
    for i in 0..100u32 {
        builder = builder.command(i * 14, 0, 0x15, &[0; 10]);
    }
    let result = decode(&builder.build_remastered()).unwrap();

    assert_eq!(result.metrics_for(0).unwrap().apm, 99);
}

// ============================================================================
// Build orders
// ============================================================================

#[test]
fn test_build_order_extraction() {
    let result = decode(
        &two_player_game(14_400)
            .command(720, 0, 0x1F, &[7, 0]) // Train SCV at 0:30
            .command(1440, 0, 0x0C, &[0, 8, 0, 8, 0, 109, 0]) // Supply Depot at 1:00
            .command(2880, 0, 0x0C, &[0, 8, 0, 8, 0, 111, 0]) // Barracks at 2:00
            .command(4320, 1, 0x1F, &[64, 0]) // Probe at 3:00
            .command(5760, 1, 0x30, &[19]) // Psionic Storm at 4:00
            .build_remastered(),
    )
    .unwrap();

    let slot0 = result.build_order_for(0).unwrap();
    assert_eq!(slot0.len(), 3);
    assert_eq!(slot0[0].action, BuildAction::Train);
    assert_eq!(slot0[0].unit_or_building, "SCV");
    assert_eq!(slot0[1].unit_or_building, "Supply Depot");
    assert_eq!(slot0[1].time, "1:00");
    assert_eq!(slot0[2].unit_or_building, "Barracks");

    let slot1 = result.build_order_for(1).unwrap();
    assert_eq!(slot1[0].unit_or_building, "Probe");
    assert_eq!(slot1[1].action, BuildAction::Research);
    assert_eq!(slot1[1].unit_or_building, "Psionic Storm");
}

#[test]
fn test_build_order_supply_interpolated_not_omitted() {
    let result = decode(
        &two_player_game(14_400)
            .command(1440, 0, 0x1F, &[7, 0])
            .build_remastered(),
    )
    .unwrap();

    let entry = &result.build_order_for(0).unwrap()[0];
    // One minute in: 4 base + 8 per minute
    assert_eq!(entry.supply, 12);
    assert!(entry.supply_estimated);
}

#[test]
fn test_build_orders_ordered_by_frame() {
    let mut builder = two_player_game(100_000);
    for i in 0..30u32 {
        builder = builder.command(i * 500, 0, 0x1F, &[7, 0]);
    }
    let result = decode(&builder.build_classic_zlib()).unwrap();

    let entries = result.build_order_for(0).unwrap();
    assert!(entries.windows(2).all(|w| w[0].frame <= w[1].frame));
}

// ============================================================================
// Output contract properties
// ============================================================================

#[test]
fn test_referential_integrity() {
    let result = decode(
        &two_player_game(2880)
            .command(10, 0, 0x14, &[0; 9])
            .command(20, 1, 0x1F, &[64, 0])
            .build_remastered(),
    )
    .unwrap();

    for command in &result.commands {
        assert!(
            result.player(command.slot_id).is_some(),
            "command slot {} has no player",
            command.slot_id
        );
    }
    for slot_id in result.build_orders.keys() {
        assert!(result.player(*slot_id).is_some());
    }
    for slot_id in result.metrics.keys() {
        assert!(result.player(*slot_id).is_some());
    }
}

#[test]
fn test_command_for_unpopulated_slot_rejected() {
    // Slot 5 holds no player; a command claiming it is a format violation
    let data = two_player_game(2880)
        .command(10, 5, 0x14, &[0; 9])
        .build_remastered();

    assert!(decode(&data).is_err());
}

#[test]
fn test_decode_is_idempotent() {
    let data = two_player_game(2880)
        .start_time(1_234_567_890)
        .command(10, 0, 0x14, &[0; 9])
        .command(500, 1, 0x1F, &[64, 0])
        .build_remastered();

    let first = decode(&data).unwrap();
    let second = decode(&data).unwrap();

    assert_eq!(first, second);

    // Byte-identical serialized form: no hidden timestamps or randomness
    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_json_output_contract() {
    let result = decode(
        &two_player_game(2880)
            .command(1440, 0, 0x1F, &[7, 0])
            .build_remastered(),
    )
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert!(json["header"]["map_name"].is_string());
    assert!(json["header"]["frame_count"].is_u64());
    assert!(json["players"].is_array());
    assert_eq!(json["players"][0]["race"], "Terran");
    assert_eq!(json["players"][1]["race"], "Protoss");
    assert!(json["metrics"]["0"]["apm"].is_u64());
    assert!(json["metrics"]["0"]["eapm"].is_u64());

    let entry = &json["buildOrders"]["0"][0];
    assert!(entry["time"].is_string());
    assert!(entry["supply"].is_u64());
    assert!(entry["action"].is_string());
    assert!(entry["unit"].is_string());
}

#[test]
fn test_duration_round_trip() {
    // 1440 frames: exactly "1:00" Classic; within one second Remastered
    let classic = decode(&two_player_game(1440).build_classic_zlib()).unwrap();
    assert_eq!(classic.header.duration, "1:00");

    let remastered = decode(&two_player_game(1440).build_remastered()).unwrap();
    assert!(
        remastered.header.duration == "1:00" || remastered.header.duration == "1:01",
        "got {}",
        remastered.header.duration
    );
}

// ============================================================================
// Failure paths and cancellation
// ============================================================================

#[test]
fn test_no_players_found() {
    let data = ReplayBuilder::new(2880).build_classic_zlib();
    assert!(matches!(
        decode(&data),
        Err(DecodeError::NoPlayersFound)
    ));
}

#[test]
fn test_races_resolved_from_slot_codes() {
    let result = decode(
        &two_player_game(2880)
            .command(10, 0, 0x14, &[0; 9])
            .build_remastered(),
    )
    .unwrap();

    assert_eq!(result.player(0).unwrap().race, Race::Terran);
    assert_eq!(result.player(1).unwrap().race, Race::Protoss);
}

#[test]
fn test_cancelled_decode() {
    let data = two_player_game(2880).build_remastered();
    let token = CancelToken::new();
    token.cancel();

    let err = Decoder::new()
        .decode_with_cancel(&data, &token)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Cancelled { .. }));
}

#[test]
fn test_untripped_token_decodes_normally() {
    let data = two_player_game(2880).build_remastered();
    let token = CancelToken::new();

    let result = Decoder::new().decode_with_cancel(&data, &token).unwrap();
    assert_eq!(result.players.len(), 2);
}

#[test]
fn test_concurrent_decodes_share_nothing() {
    // The decoder holds no global state; parallel decodes of different
    // buffers must not interfere
    let data_a = two_player_game(2880)
        .command(10, 0, 0x14, &[0; 9])
        .build_remastered();
    let data_b = two_player_game(1440)
        .map_name("Python")
        .command(10, 1, 0x1F, &[64, 0])
        .build_classic_zlib();

    let handle_a = std::thread::spawn(move || decode(&data_a).unwrap());
    let handle_b = std::thread::spawn(move || decode(&data_b).unwrap());

    let result_a = handle_a.join().unwrap();
    let result_b = handle_b.join().unwrap();

    assert_eq!(result_a.header.map_name, "Fighting Spirit");
    assert_eq!(result_a.header.frame_count, 2880);
    assert_eq!(result_b.header.map_name, "Python");
    assert_eq!(result_b.header.frame_count, 1440);
}
