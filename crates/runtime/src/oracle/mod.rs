//! Runtime wrappers around static game content oracles.
//!
//! These implementations expose `gacha-core` oracle traits and bundle them into
//! an [`OracleManager`] so the runtime can build [`gacha_core::BattleEnv`]
//! views on demand. The data is immutable at runtime; the roster lives in
//! repositories and the battle in the worker's session.
mod catalog;

use std::sync::Arc;

use gacha_core::{
    BattleConfig, BattleEnv, FixedGoldReward, OpponentPolicy, PcgRng, RandomMovePolicy,
};

pub use catalog::CatalogOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<CatalogOracleImpl>,
    pub(crate) rng: PcgRng,
    pub(crate) policy: Arc<dyn OpponentPolicy>,
    pub(crate) reward: FixedGoldReward,
}

impl OracleManager {
    /// Creates a manager with a random enemy and the configured victory payout.
    pub fn new(catalog: Arc<CatalogOracleImpl>, battle: &BattleConfig) -> Self {
        Self {
            catalog,
            rng: PcgRng, // PcgRng is stateless
            policy: Arc::new(RandomMovePolicy),
            reward: FixedGoldReward::new(battle.victory_gold),
        }
    }

    /// Replaces the enemy move policy.
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Borrows the per-battle oracles for [`gacha_core::BattleEngine`].
    pub fn as_battle_env(&self) -> BattleEnv<'_> {
        BattleEnv::new(&self.rng, self.policy.as_ref(), &self.reward)
    }

    pub fn catalog(&self) -> &CatalogOracleImpl {
        &self.catalog
    }
}
