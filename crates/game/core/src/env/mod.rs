//! Read-only collaborators the battle engine consults.
//!
//! The catalog supplies character data, the RNG oracle supplies seeded rolls,
//! and the policy and reward resolver decide the enemy's move and the victory
//! payout. [`BattleEnv`] bundles the per-battle ones so the engine never owns
//! a concrete implementation.
mod catalog;
mod rng;

pub use catalog::{CatalogEntry, CatalogOracle};
pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::policy::OpponentPolicy;
use crate::reward::RewardResolver;

/// Aggregates the oracles a battle needs.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    rng: &'a dyn RngOracle,
    policy: &'a dyn OpponentPolicy,
    reward: &'a dyn RewardResolver,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        rng: &'a dyn RngOracle,
        policy: &'a dyn OpponentPolicy,
        reward: &'a dyn RewardResolver,
    ) -> Self {
        Self {
            rng,
            policy,
            reward,
        }
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn policy(&self) -> &'a dyn OpponentPolicy {
        self.policy
    }

    pub fn reward(&self) -> &'a dyn RewardResolver {
        self.reward
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv").finish_non_exhaustive()
    }
}
