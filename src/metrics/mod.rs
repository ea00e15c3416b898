//! Gameplay metrics computed from the decoded command stream.
//!
//! Two rates are computed per player:
//!
//! - **APM**: every command attributable to the player, divided by
//!   elapsed game minutes (`frame_count / fps / 60`). The frame rate is
//!   version-dependent: 24 fps Classic, 23.81 fps Remastered.
//! - **EAPM**: effective APM. A command counts as effective when its
//!   opcode class is meaningful (build, train, orders, research,
//!   upgrade; not pure selection or hotkey traffic) and it is not a
//!   repeat of
//!   the player's immediately preceding command within the spam window.
//!
//! Build-order extraction lives in [`build_order`]; the static unit/tech/
//! upgrade name tables in [`units`].

pub mod build_order;
pub mod units;

pub use build_order::{extract_build_orders, BuildAction, BuildOrderEntry};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::commands::Command;

/// Default spam-suppression window in frames (~0.4 s at 24 fps).
pub const DEFAULT_SPAM_WINDOW_FRAMES: u32 = 10;

/// Per-player action rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerMetrics {
    /// Actions per minute over the whole game.
    pub apm: u32,

    /// Effective (spam-filtered) actions per minute.
    pub eapm: u32,
}

/// Formats a frame number as a `m:ss` game-time string.
///
/// # Example
///
/// ```
/// use bwrep_parser::metrics::format_game_time;
///
/// assert_eq!(format_game_time(1440, 24.0), "1:00");
/// assert_eq!(format_game_time(0, 24.0), "0:00");
/// ```
#[must_use]
pub fn format_game_time(frame: u32, fps: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_seconds = (f64::from(frame) / fps) as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

/// Computes APM and EAPM for every slot that issued commands.
///
/// # Arguments
///
/// * `commands` - The full decoded command stream, frame-ordered
/// * `frame_count` - The header's frame count
/// * `fps` - The version's frame rate
/// * `spam_window` - Frames within which a repeated opcode is spam
#[must_use]
pub fn compute_metrics(
    commands: &[Command],
    frame_count: u32,
    fps: f64,
    spam_window: u32,
) -> BTreeMap<u8, PlayerMetrics> {
    let minutes = f64::from(frame_count) / fps / 60.0;

    let mut total: BTreeMap<u8, u32> = BTreeMap::new();
    let mut effective: BTreeMap<u8, u32> = BTreeMap::new();
    // Last (opcode, frame) per slot, for spam suppression
    let mut last_seen: BTreeMap<u8, (u8, u32)> = BTreeMap::new();

    for command in commands {
        *total.entry(command.slot_id).or_insert(0) += 1;

        let is_effective = command
            .info()
            .is_some_and(|info| info.class.is_effective());

        if is_effective {
            let is_spam = last_seen
                .get(&command.slot_id)
                .is_some_and(|&(opcode, frame)| {
                    opcode == command.opcode && command.frame.saturating_sub(frame) <= spam_window
                });

            if !is_spam {
                *effective.entry(command.slot_id).or_insert(0) += 1;
            }
        }

        last_seen.insert(command.slot_id, (command.opcode, command.frame));
    }

    total
        .into_iter()
        .map(|(slot_id, count)| {
            let apm = per_minute(count, minutes);
            let eapm = per_minute(effective.get(&slot_id).copied().unwrap_or(0), minutes);
            (slot_id, PlayerMetrics { apm, eapm })
        })
        .collect()
}

/// Converts a command count to a rounded per-minute rate.
fn per_minute(count: u32, minutes: f64) -> u32 {
    if minutes <= 0.0 {
        return 0;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rate = (f64::from(count) / minutes).round() as u32;
    rate
}
