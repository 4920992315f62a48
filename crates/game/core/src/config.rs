use core::time::Duration;

/// Game configuration: battle pacing, rewards and the shop economy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub battle: BattleConfig,
    pub economy: EconomyConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of team slots a roster exposes to battle.
    pub const TEAM_SLOTS: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Tunables for a single battle session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Presentation delay after every strike before the next step resolves.
    pub strike_delay_ms: u64,
    /// Delay between the player's strike settling and the enemy attacking.
    pub enemy_turn_delay_ms: u64,
    /// Gold granted once per won battle.
    pub victory_gold: u64,
    /// Catalog name of the encounter's enemy (matched case-insensitively).
    pub boss_name: String,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STRIKE_DELAY_MS: u64 = 300;
    pub const DEFAULT_ENEMY_TURN_DELAY_MS: u64 = 1000;
    pub const DEFAULT_VICTORY_GOLD: u64 = 10;
    pub const DEFAULT_BOSS_NAME: &'static str = "Elepha";

    pub fn strike_delay(&self) -> Duration {
        Duration::from_millis(self.strike_delay_ms)
    }

    pub fn enemy_turn_delay(&self) -> Duration {
        Duration::from_millis(self.enemy_turn_delay_ms)
    }

    /// Same rules with every presentation delay removed.
    pub fn without_delays(mut self) -> Self {
        self.strike_delay_ms = 0;
        self.enemy_turn_delay_ms = 0;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            strike_delay_ms: Self::DEFAULT_STRIKE_DELAY_MS,
            enemy_turn_delay_ms: Self::DEFAULT_ENEMY_TURN_DELAY_MS,
            victory_gold: Self::DEFAULT_VICTORY_GOLD,
            boss_name: Self::DEFAULT_BOSS_NAME.to_string(),
        }
    }
}

/// Gold economy shared by the pack draw and the market.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    pub starting_gold: u64,
    pub pack_cost: u64,
}

impl EconomyConfig {
    pub const DEFAULT_STARTING_GOLD: u64 = 100;
    pub const DEFAULT_PACK_COST: u64 = 5;
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            pack_cost: Self::DEFAULT_PACK_COST,
        }
    }
}
