//! Event types for different topics.

use gacha_core::BattleExit;
use serde::{Deserialize, Serialize};

/// Events related to the player's roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterEvent {
    /// Gold balance changed (currently only by a battle reward)
    GoldChanged { gold: u64 },

    /// Roster was written to the repository after a battle
    Saved { outcome: BattleExit },

    /// Writing the roster failed; the in-memory roster is still current
    SaveFailed { error: String },
}

/// Player-facing message (invalid swap, empty team, forced swap, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeEvent {
    pub message: String,
}
