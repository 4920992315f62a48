use core::time::Duration;

use arrayvec::ArrayVec;

use crate::combat::{CombatUnit, EnemyDefinition};
use crate::config::{BattleConfig, GameConfig};
use crate::reward::Reward;
use crate::roster::RosterStore;

use super::{BattleExit, BattleOutcome, BattlePhase};

/// Deferred battle step, fired once its delay has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    /// The player's strike has finished playing out.
    PlayerStrikeSettled,
    /// The enemy takes its turn.
    EnemyAttack,
    /// The enemy's strike has finished playing out.
    EnemyStrikeSettled,
}

impl Continuation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerStrikeSettled => "player_strike_settled",
            Self::EnemyAttack => "enemy_attack",
            Self::EnemyStrikeSettled => "enemy_strike_settled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduled {
    pub continuation: Continuation,
    pub remaining: Duration,
}

/// State of one encounter: the projected team, the enemy and the turn cycle.
///
/// A session is created per battle and discarded afterwards; nothing in it
/// writes back to the roster. Mutation goes through [`super::BattleEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub(crate) players: ArrayVec<CombatUnit, { GameConfig::TEAM_SLOTS }>,
    pub(crate) enemy: CombatUnit,
    pub(crate) active: usize,
    pub(crate) phase: BattlePhase,
    pub(crate) is_animating: bool,
    pub(crate) pending: Option<Scheduled>,
    pub(crate) strike_delay: Duration,
    pub(crate) enemy_turn_delay: Duration,
    pub(crate) seed: u64,
    pub(crate) nonce: u64,
    pub(crate) turns: u32,
    pub(crate) reward: Option<Reward>,
}

impl BattleSession {
    /// Builds a session in `Idle`, or `NoTeam` when no unit in `players` has
    /// HP left. The first living unit starts active.
    ///
    /// Units beyond the team size are dropped.
    pub fn new(
        players: impl IntoIterator<Item = CombatUnit>,
        enemy: CombatUnit,
        config: &BattleConfig,
        seed: u64,
    ) -> Self {
        let mut units = ArrayVec::new();
        for unit in players {
            if units.try_push(unit).is_err() {
                tracing::warn!("more units than team slots; extra units ignored");
                break;
            }
        }
        let first_living = units.iter().position(|unit: &CombatUnit| !unit.is_defeated());
        let phase = match first_living {
            Some(_) => BattlePhase::Idle,
            None => BattlePhase::NoTeam,
        };

        Self {
            players: units,
            enemy,
            active: first_living.unwrap_or(0),
            phase,
            is_animating: false,
            pending: None,
            strike_delay: config.strike_delay(),
            enemy_turn_delay: config.enemy_turn_delay(),
            seed,
            nonce: 0,
            turns: 0,
            reward: None,
        }
    }

    /// Projects the roster's filled team slots (in slot order) against `enemy`.
    pub fn from_roster(
        roster: &RosterStore,
        enemy: &EnemyDefinition,
        config: &BattleConfig,
        seed: u64,
    ) -> Self {
        let players = roster
            .team_members()
            .into_iter()
            .map(CombatUnit::from_character);
        Self::new(players, CombatUnit::from_enemy_definition(enemy), config, seed)
    }

    pub fn players(&self) -> &[CombatUnit] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&CombatUnit> {
        self.players.get(index)
    }

    pub fn enemy(&self) -> &CombatUnit {
        &self.enemy
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_unit(&self) -> Option<&CombatUnit> {
        self.players.get(self.active)
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn pending(&self) -> Option<&Scheduled> {
        self.pending.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Completed player/enemy exchanges.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Reward settled at victory, if any.
    pub fn reward(&self) -> Option<Reward> {
        self.reward
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::BattleEnd(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn exit(&self) -> Option<BattleExit> {
        match self.phase {
            BattlePhase::BattleEnd(outcome) => Some(outcome.into()),
            BattlePhase::NoTeam => Some(BattleExit::NoTeam),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Sum of current HP across the player's units.
    pub fn team_hp(&self) -> u32 {
        self.players.iter().map(CombatUnit::hp).sum()
    }

    pub(crate) fn all_players_defeated(&self) -> bool {
        self.players.iter().all(CombatUnit::is_defeated)
    }

    /// Next living unit after the active one in roster order, wrapping.
    pub(crate) fn next_living_after_active(&self) -> Option<usize> {
        let len = self.players.len();
        (1..len)
            .map(|offset| (self.active + offset) % len)
            .find(|&index| !self.players[index].is_defeated())
    }
}
