//! Common error infrastructure for gacha-core.
//!
//! Domain errors (`RosterError`, `BattleError`, `ShopError`) live next to the
//! operations they reject. This module holds the shared classification used by
//! callers to decide whether a rejection is logged, surfaced or escalated.

/// Severity level of an error, used to pick a handling strategy.
///
/// - **Silent**: input arriving at the wrong moment; drop it and carry on
/// - **Recoverable**: the player picked something unusable; tell them and wait
/// - **Validation**: a request that can never succeed against the current data
/// - **Internal**: state inconsistency that indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Ignored without feedback.
    ///
    /// Examples: a move submitted while a strike is still animating
    Silent,

    /// Reported to the player, who can pick again.
    ///
    /// Examples: swapping to a defeated character
    Recoverable,

    /// Rejected input that should not be retried unchanged.
    ///
    /// Examples: placing an unowned character in a team slot
    Validation,

    /// Unexpected inconsistency.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the error should produce no player-visible feedback.
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Silent)
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all gacha-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by how the caller should react, not by impact
/// - Provide `user_message` only for rejections the player should see
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Short text suitable for an in-game notice.
    fn user_message(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_are_stable() {
        assert_eq!(ErrorSeverity::Silent.as_str(), "silent");
        assert!(ErrorSeverity::Silent.is_silent());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
    }
}
