use crate::combat::UnitRef;
use crate::reward::Reward;

use super::{BattleOutcome, BattlePhase};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapReason {
    /// Requested by the player during their turn.
    Voluntary,
    /// The active unit fell and the next living unit stepped in.
    Forced,
}

/// Observable effects of a battle step, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    PhaseChanged {
        from: BattlePhase,
        to: BattlePhase,
    },
    MoveUsed {
        unit: UnitRef,
        move_name: String,
    },
    DamageApplied {
        attacker: UnitRef,
        target: UnitRef,
        amount: u32,
        remaining_hp: u32,
    },
    ActiveSwapped {
        from: usize,
        to: usize,
        reason: SwapReason,
    },
    UnitDefeated {
        unit: UnitRef,
    },
    RewardGranted {
        reward: Reward,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
    /// Player-facing message.
    Notice {
        message: String,
    },
}

impl BattleEvent {
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }
}
