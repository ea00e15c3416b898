//! Player resolution: raw slot records to the canonical player model.
//!
//! Race encoding is the messiest corner of the format. At least four
//! incompatible numeric schemes appear in the wild, plus free-text race
//! names written by third-party tools. Resolution follows one explicit
//! priority order instead of guessing a single "correct" scheme:
//!
//! 1. structured race-name field
//! 2. structured race-id field (the in-game scheme, the only one the
//!    game client itself writes)
//! 3. free-text heuristic match
//! 4. numeric-code table covering every observed scheme
//! 5. `Unknown`
//!
//! `Unknown` is a first-class race value and is never silently coerced
//! to Terran. Callers that want a fallback make that decision themselves.

use serde::Serialize;
use std::fmt;

use crate::error::{DecodeError, Result};
use crate::header::RawSlot;

/// The canonical race of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Race {
    /// Terran.
    Terran,
    /// Protoss.
    Protoss,
    /// Zerg.
    Zerg,
    /// Random (the resolved race is not recorded in the slot).
    Random,
    /// No scheme could decode the race. First-class, never coerced.
    Unknown,
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Race::Terran => "Terran",
            Race::Protoss => "Protoss",
            Race::Zerg => "Zerg",
            Race::Random => "Random",
            Race::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// The inputs a caller may have for race resolution.
///
/// Different replay sources expose different subsets: the header slot
/// table only has the race-id byte, while external metadata may carry
/// structured or free-text names.
#[derive(Debug, Clone, Default)]
pub struct RaceHints<'a> {
    /// A structured race-name field, if the source has one.
    pub name: Option<&'a str>,

    /// A structured race-id byte in the in-game scheme.
    pub id: Option<u8>,

    /// Free-form text that may mention a race.
    pub text: Option<&'a str>,

    /// A numeric code of unknown provenance, tried against every
    /// observed scheme.
    pub code: Option<u8>,
}

impl Race {
    /// Resolves a race from the available hints, in priority order.
    ///
    /// # Example
    ///
    /// ```
    /// use bwrep_parser::players::{Race, RaceHints};
    ///
    /// let race = Race::resolve(&RaceHints {
    ///     id: Some(1),
    ///     ..RaceHints::default()
    /// });
    /// assert_eq!(race, Race::Terran);
    /// ```
    #[must_use]
    pub fn resolve(hints: &RaceHints<'_>) -> Race {
        if let Some(name) = hints.name {
            if let Some(race) = Race::from_name(name) {
                return race;
            }
        }

        if let Some(id) = hints.id {
            if let Some(race) = Race::from_game_id(id) {
                return race;
            }
        }

        if let Some(text) = hints.text {
            if let Some(race) = Race::from_text(text) {
                return race;
            }
        }

        if let Some(code) = hints.code {
            if let Some(race) = Race::from_numeric_code(code) {
                return race;
            }
        }

        Race::Unknown
    }

    /// Matches a structured race name exactly (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Race> {
        match name.to_ascii_lowercase().as_str() {
            "terran" => Some(Race::Terran),
            "protoss" => Some(Race::Protoss),
            "zerg" => Some(Race::Zerg),
            "random" => Some(Race::Random),
            _ => None,
        }
    }

    /// Decodes the in-game race-id scheme written by the client.
    #[must_use]
    pub const fn from_game_id(id: u8) -> Option<Race> {
        match id {
            0 => Some(Race::Zerg),
            1 => Some(Race::Terran),
            2 => Some(Race::Protoss),
            6 => Some(Race::Random),
            _ => None,
        }
    }

    /// Heuristic substring match on free-form text.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Race> {
        let lower = text.to_ascii_lowercase();
        if lower.contains("terr") {
            Some(Race::Terran)
        } else if lower.contains("prot") {
            Some(Race::Protoss)
        } else if lower.contains("zerg") {
            Some(Race::Zerg)
        } else if lower.contains("rand") {
            Some(Race::Random)
        } else {
            None
        }
    }

    /// Tries a numeric code against every scheme observed in the wild.
    ///
    /// Schemes, in the order they are consulted:
    /// - in-game `0/1/2` (+`6` random)
    /// - legacy-tool `100/101/102` (in-game values shifted by 100)
    /// - UI-slot `5/7` (`6` is shadowed by the in-game random code)
    /// - campaign `3/4`
    #[must_use]
    pub const fn from_numeric_code(code: u8) -> Option<Race> {
        match code {
            // In-game scheme
            0 => Some(Race::Zerg),
            1 => Some(Race::Terran),
            2 => Some(Race::Protoss),
            6 => Some(Race::Random),
            // Legacy-tool scheme: in-game shifted by 100
            100 => Some(Race::Zerg),
            101 => Some(Race::Terran),
            102 => Some(Race::Protoss),
            // UI-slot scheme (6 would be random here, but the in-game
            // scheme claims it first)
            5 => Some(Race::Terran),
            7 => Some(Race::Protoss),
            // Campaign scheme
            3 => Some(Race::Terran),
            4 => Some(Race::Protoss),
            _ => None,
        }
    }
}

/// A canonical player resolved from a populated slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Slot id, the stable identity of this participant.
    pub slot_id: u8,

    /// Player name.
    pub name: String,

    /// Resolved race.
    pub race: Race,

    /// Team number.
    pub team: u8,

    /// Color id.
    pub color: u8,

    /// Whether this slot is computer-controlled.
    pub is_computer: bool,
}

/// Resolves the header's raw slot table into canonical players.
///
/// Only populated slots (human or computer with a non-empty name) become
/// players; empty and observer slots are dropped.
///
/// # Errors
///
/// Returns `DecodeError::NoPlayersFound` if no slot is populated.
pub fn resolve_players(slots: &[RawSlot]) -> Result<Vec<Player>> {
    let players: Vec<Player> = slots
        .iter()
        .filter(|slot| slot.is_populated())
        .map(|slot| Player {
            slot_id: slot.slot_id,
            name: slot.name.clone(),
            race: Race::resolve(&RaceHints {
                id: Some(slot.race_code),
                code: Some(slot.race_code),
                ..RaceHints::default()
            }),
            team: slot.team,
            color: slot.color,
            is_computer: slot.player_type == 1,
        })
        .collect();

    if players.is_empty() {
        return Err(DecodeError::NoPlayersFound);
    }

    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(slot_id: u8, player_type: u8, race_code: u8, name: &str) -> RawSlot {
        RawSlot {
            slot_id,
            storm_id: slot_id,
            player_type,
            race_code,
            team: 0,
            color: slot_id,
            name: name.to_string(),
        }
    }

    // ========================
    // Race resolution tests
    // ========================

    #[test]
    fn test_resolve_priority_name_wins() {
        // A structured name outranks a conflicting race id
        let race = Race::resolve(&RaceHints {
            name: Some("Protoss"),
            id: Some(1),
            ..RaceHints::default()
        });
        assert_eq!(race, Race::Protoss);
    }

    #[test]
    fn test_resolve_id_before_text() {
        let race = Race::resolve(&RaceHints {
            id: Some(0),
            text: Some("terran player"),
            ..RaceHints::default()
        });
        assert_eq!(race, Race::Zerg);
    }

    #[test]
    fn test_resolve_text_heuristic() {
        assert_eq!(
            Race::resolve(&RaceHints {
                text: Some("ProToSs mirror"),
                ..RaceHints::default()
            }),
            Race::Protoss
        );
        assert_eq!(
            Race::resolve(&RaceHints {
                text: Some("going rand"),
                ..RaceHints::default()
            }),
            Race::Random
        );
    }

    #[test]
    fn test_resolve_falls_through_to_code_table() {
        // 101 is not a valid in-game id but is a legacy-tool code
        let race = Race::resolve(&RaceHints {
            id: Some(101),
            code: Some(101),
            ..RaceHints::default()
        });
        assert_eq!(race, Race::Terran);
    }

    #[test]
    fn test_resolve_unknown_is_first_class() {
        let race = Race::resolve(&RaceHints {
            id: Some(0xFF),
            code: Some(0xFF),
            ..RaceHints::default()
        });
        assert_eq!(race, Race::Unknown);
    }

    #[test]
    fn test_game_id_scheme() {
        assert_eq!(Race::from_game_id(0), Some(Race::Zerg));
        assert_eq!(Race::from_game_id(1), Some(Race::Terran));
        assert_eq!(Race::from_game_id(2), Some(Race::Protoss));
        assert_eq!(Race::from_game_id(6), Some(Race::Random));
        assert_eq!(Race::from_game_id(3), None);
    }

    #[test]
    fn test_all_numeric_schemes_preserved() {
        // In-game
        assert_eq!(Race::from_numeric_code(0), Some(Race::Zerg));
        // Legacy-tool
        assert_eq!(Race::from_numeric_code(100), Some(Race::Zerg));
        assert_eq!(Race::from_numeric_code(102), Some(Race::Protoss));
        // UI-slot
        assert_eq!(Race::from_numeric_code(5), Some(Race::Terran));
        assert_eq!(Race::from_numeric_code(7), Some(Race::Protoss));
        // Campaign
        assert_eq!(Race::from_numeric_code(3), Some(Race::Terran));
        assert_eq!(Race::from_numeric_code(4), Some(Race::Protoss));
        // Out of every scheme
        assert_eq!(Race::from_numeric_code(50), None);
    }

    #[test]
    fn test_race_display() {
        assert_eq!(Race::Terran.to_string(), "Terran");
        assert_eq!(Race::Unknown.to_string(), "Unknown");
    }

    // ========================
    // resolve_players tests
    // ========================

    #[test]
    fn test_resolve_players_filters_empty_slots() {
        let slots = vec![
            slot(0, 2, 1, "Boxer"),
            slot(1, 0, 0, ""),
            slot(2, 2, 2, "Bisu"),
            slot(3, 0, 0, ""),
        ];
        let players = resolve_players(&slots).unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].slot_id, 0);
        assert_eq!(players[0].race, Race::Terran);
        assert!(!players[0].is_computer);
        assert_eq!(players[1].slot_id, 2);
        assert_eq!(players[1].race, Race::Protoss);
    }

    #[test]
    fn test_resolve_players_computer_slot() {
        let slots = vec![slot(0, 1, 0, "Computer")];
        let players = resolve_players(&slots).unwrap();
        assert!(players[0].is_computer);
        assert_eq!(players[0].race, Race::Zerg);
    }

    #[test]
    fn test_resolve_players_empty_table() {
        let slots = vec![slot(0, 0, 0, ""), slot(1, 0, 0, "")];
        assert!(matches!(
            resolve_players(&slots),
            Err(DecodeError::NoPlayersFound)
        ));
    }

    #[test]
    fn test_unknown_race_not_coerced() {
        let slots = vec![slot(0, 2, 0xAB, "Mystery")];
        let players = resolve_players(&slots).unwrap();
        assert_eq!(players[0].race, Race::Unknown);
    }
}
