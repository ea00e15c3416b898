//! Build-order extraction from the decoded command stream.
//!
//! A build order is the time-ordered list of build/train/morph/research/
//! upgrade commands for one player, with ids resolved through the static
//! name tables and an estimated supply count attached to each entry.
//!
//! The classic command stream carries no supply field, so supply is
//! always estimated by linear interpolation from elapsed game time.
//! Estimated values are flagged `supply_estimated` in the output:
//! lower confidence, but never omitted.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::commands::{Command, CommandClass};
use crate::metrics::format_game_time;
use crate::metrics::units::{tech_name, unit_name, upgrade_name};

/// Starting supply of a standard melee game.
const BASE_SUPPLY: u16 = 4;

/// Supply growth per minute assumed by the interpolation model.
const SUPPLY_PER_MINUTE: f64 = 8.0;

/// Maximum supply in the game.
const MAX_SUPPLY: u16 = 200;

/// The kind of build-order action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildAction {
    /// Placing a building.
    Build,
    /// Training a unit.
    Train,
    /// Unit or building morph.
    Morph,
    /// Researching a tech.
    Research,
    /// Starting an upgrade.
    Upgrade,
}

/// One entry of a player's build order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOrderEntry {
    /// Frame the command was issued on.
    pub frame: u32,

    /// Game time as `m:ss`.
    pub time: String,

    /// Estimated supply at the time of the command.
    pub supply: u16,

    /// True when `supply` was interpolated rather than read from the
    /// stream. Always true for the classic command set.
    pub supply_estimated: bool,

    /// The kind of action.
    pub action: BuildAction,

    /// Name of the unit, building, tech, or upgrade.
    #[serde(rename = "unit")]
    pub unit_or_building: String,
}

/// Estimates supply from elapsed frames.
///
/// Linear model: 4 starting supply plus 8 per minute, capped at 200.
#[must_use]
pub fn estimate_supply(frame: u32, fps: f64) -> u16 {
    let minutes = f64::from(frame) / fps / 60.0;
    let estimate = f64::from(BASE_SUPPLY) + minutes * SUPPLY_PER_MINUTE;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let supply = estimate.round() as u16;
    supply.min(MAX_SUPPLY)
}

/// Maps a build-order command to its action kind and subject name.
///
/// Returns `None` for commands outside the build-order classes.
fn classify(command: &Command) -> Option<(BuildAction, String)> {
    let info = command.info()?;

    match info.class {
        CommandClass::Build => {
            // Build payload: order byte, x u16, y u16, unit id u16
            let id = payload_u16(&command.payload, 5)?;
            Some((BuildAction::Build, resolve_unit(id)))
        }
        CommandClass::Train => {
            if command.payload.is_empty() {
                // Train Fighter has no payload; the unit is implied by
                // the producing building
                Some((BuildAction::Train, "Interceptor/Scarab".to_string()))
            } else {
                let id = payload_u16(&command.payload, 0)?;
                Some((BuildAction::Train, resolve_unit(id)))
            }
        }
        CommandClass::Morph => {
            let id = payload_u16(&command.payload, 0)?;
            Some((BuildAction::Morph, resolve_unit(id)))
        }
        CommandClass::Research => {
            let id = *command.payload.first()?;
            let name = tech_name(id)
                .map_or_else(|| format!("Tech 0x{id:02X}"), ToString::to_string);
            Some((BuildAction::Research, name))
        }
        CommandClass::Upgrade => {
            let id = *command.payload.first()?;
            let name = upgrade_name(id)
                .map_or_else(|| format!("Upgrade 0x{id:02X}"), ToString::to_string);
            Some((BuildAction::Upgrade, name))
        }
        _ => None,
    }
}

fn payload_u16(payload: &[u8], offset: usize) -> Option<u16> {
    let bytes = payload.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn resolve_unit(id: u16) -> String {
    unit_name(id).map_or_else(|| format!("Unit 0x{id:02X}"), ToString::to_string)
}

/// Extracts per-player build orders from the command stream.
///
/// Each player's list is ordered by frame (inherited from the command
/// stream's ordering invariant).
#[must_use]
pub fn extract_build_orders(commands: &[Command], fps: f64) -> BTreeMap<u8, Vec<BuildOrderEntry>> {
    let mut orders: BTreeMap<u8, Vec<BuildOrderEntry>> = BTreeMap::new();

    for command in commands {
        let Some((action, unit_or_building)) = classify(command) else {
            continue;
        };

        orders.entry(command.slot_id).or_default().push(BuildOrderEntry {
            frame: command.frame,
            time: format_game_time(command.frame, fps),
            supply: estimate_supply(command.frame, fps),
            supply_estimated: true,
            action,
            unit_or_building,
        });
    }

    orders
}
