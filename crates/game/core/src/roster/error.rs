use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::CharacterKey;

/// Rejections raised by roster mutators. The store is unchanged on error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("team slot {index} is out of range (0..{slots})", slots = GameConfig::TEAM_SLOTS)]
    SlotOutOfRange { index: usize },

    #[error("{key} is not in the collection")]
    NotInCollection { key: CharacterKey },

    #[error("{key} already occupies team slot {slot}")]
    AlreadyInTeam { key: CharacterKey, slot: usize },

    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u64, available: u64 },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SlotOutOfRange { .. } | Self::NotInCollection { .. } => {
                ErrorSeverity::Validation
            }
            Self::AlreadyInTeam { .. } | Self::InsufficientGold { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SlotOutOfRange { .. } => "ROSTER_SLOT_OUT_OF_RANGE",
            Self::NotInCollection { .. } => "ROSTER_NOT_IN_COLLECTION",
            Self::AlreadyInTeam { .. } => "ROSTER_ALREADY_IN_TEAM",
            Self::InsufficientGold { .. } => "ROSTER_INSUFFICIENT_GOLD",
        }
    }

    fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::AlreadyInTeam { .. } => Some("Character is already in your team!"),
            Self::InsufficientGold { .. } => Some("Not enough gold!"),
            _ => None,
        }
    }
}
