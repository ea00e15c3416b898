//! The top-level replay result aggregate.
//!
//! [`ReplayResult`] is the only value the decoder exposes across its
//! boundary: an immutable, JSON-serializable aggregate of the header, the
//! resolved players, the full command log, and the derived metrics. It
//! owns all of its data; nothing in it refers back to the input buffer.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::commands::Command;
use crate::header::ReplayHeader;
use crate::metrics::{BuildOrderEntry, PlayerMetrics};
use crate::players::Player;

/// The complete decoded replay.
///
/// Invariants guaranteed by construction:
/// - `commands` is ordered by non-decreasing frame
/// - every `slot_id` in `commands`, `build_orders`, and `metrics` refers
///   to a player in `players`
/// - no command frame exceeds `header.frame_count`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayResult {
    /// Decoded header fields.
    pub header: ReplayHeader,

    /// All resolved players, ordered by slot id.
    pub players: Vec<Player>,

    /// The canonical event log, frame-ordered.
    pub commands: Vec<Command>,

    /// Per-player build orders, keyed by slot id.
    #[serde(rename = "buildOrders")]
    pub build_orders: BTreeMap<u8, Vec<BuildOrderEntry>>,

    /// Per-player action rates, keyed by slot id.
    pub metrics: BTreeMap<u8, PlayerMetrics>,
}

impl ReplayResult {
    /// Returns the player occupying a slot, if any.
    #[must_use]
    pub fn player(&self, slot_id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.slot_id == slot_id)
    }

    /// Returns the metrics for a slot, if the player issued any commands.
    #[must_use]
    pub fn metrics_for(&self, slot_id: u8) -> Option<&PlayerMetrics> {
        self.metrics.get(&slot_id)
    }

    /// Returns the build order for a slot, if any entries exist.
    #[must_use]
    pub fn build_order_for(&self, slot_id: u8) -> Option<&[BuildOrderEntry]> {
        self.build_orders.get(&slot_id).map(Vec::as_slice)
    }
}
