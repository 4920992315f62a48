use crate::error::{ErrorSeverity, GameError};

use super::BattlePhase;

/// Why a swap target was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapRejection {
    #[error("no unit at index {index} (team has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("unit {index} is defeated")]
    Defeated { index: usize },
}

/// Rejected battle input. The session is unchanged on error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("input not accepted during {phase}")]
    InvalidAction { phase: BattlePhase },

    #[error("move {index} does not exist (unit has {available})")]
    UnknownMove { index: usize, available: usize },

    #[error("invalid swap target: {0}")]
    InvalidSwapTarget(#[from] SwapRejection),

    #[error("no team members to battle with")]
    MissingTeamData,

    #[error("battle already finished")]
    BattleFinished,
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction { .. } | Self::UnknownMove { .. } | Self::BattleFinished => {
                ErrorSeverity::Silent
            }
            Self::InvalidSwapTarget(_) => ErrorSeverity::Recoverable,
            Self::MissingTeamData => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAction { .. } => "BATTLE_INVALID_ACTION",
            Self::UnknownMove { .. } => "BATTLE_UNKNOWN_MOVE",
            Self::InvalidSwapTarget(SwapRejection::OutOfRange { .. }) => {
                "BATTLE_SWAP_OUT_OF_RANGE"
            }
            Self::InvalidSwapTarget(SwapRejection::Defeated { .. }) => "BATTLE_SWAP_DEFEATED",
            Self::MissingTeamData => "BATTLE_MISSING_TEAM",
            Self::BattleFinished => "BATTLE_FINISHED",
        }
    }

    fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSwapTarget(SwapRejection::Defeated { .. }) => {
                Some("Character is defeated!")
            }
            Self::InvalidSwapTarget(SwapRejection::OutOfRange { .. }) => {
                Some("No character in that slot!")
            }
            Self::MissingTeamData => Some("Add characters to your team before battling!"),
            _ => None,
        }
    }
}
