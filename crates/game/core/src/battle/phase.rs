use core::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

impl BattleOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
        }
    }
}

/// Where a session is in its turn cycle. Exactly one phase holds at a time.
///
/// ```text
/// Idle -> PlayerTurn -> Animating -> EnemyTurn -> Animating -> PlayerTurn ...
///                                                          \-> BattleEnd(_)
/// ```
///
/// `NoTeam` is entered at construction when no team slot is filled and is
/// never left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    Idle,
    PlayerTurn,
    Animating,
    EnemyTurn,
    BattleEnd(BattleOutcome),
    NoTeam,
}

impl BattlePhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PlayerTurn => "player_turn",
            Self::Animating => "animating",
            Self::EnemyTurn => "enemy_turn",
            Self::BattleEnd(BattleOutcome::Victory) => "battle_end(victory)",
            Self::BattleEnd(BattleOutcome::Defeat) => "battle_end(defeat)",
            Self::NoTeam => "no_team",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::BattleEnd(_) | Self::NoTeam)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a session ended, as reported to whoever started it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleExit {
    Victory,
    Defeat,
    /// The battle never started because the team was empty.
    NoTeam,
}

impl From<BattleOutcome> for BattleExit {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Victory => Self::Victory,
            BattleOutcome::Defeat => Self::Defeat,
        }
    }
}
