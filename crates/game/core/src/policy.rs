//! Enemy move selection.
use crate::combat::CombatUnit;
use crate::env::RngOracle;

/// Picks which of the enemy's moves is used this turn.
///
/// The returned index must be below `enemy.moves().len()`; the engine clamps
/// anything larger to the last move.
pub trait OpponentPolicy: Send + Sync {
    fn choose_move(&self, enemy: &CombatUnit, rng: &dyn RngOracle, seed: u64) -> usize;
}

/// Uniform choice over the enemy's moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMovePolicy;

impl OpponentPolicy for RandomMovePolicy {
    fn choose_move(&self, enemy: &CombatUnit, rng: &dyn RngOracle, seed: u64) -> usize {
        rng.pick_index(seed, enemy.moves().len())
    }
}

/// Always uses the first move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMovePolicy;

impl OpponentPolicy for FirstMovePolicy {
    fn choose_move(&self, _enemy: &CombatUnit, _rng: &dyn RngOracle, _seed: u64) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EnemyDefinition;
    use crate::env::{PcgRng, compute_seed, context};

    #[test]
    fn random_policy_covers_every_move() {
        let enemy = CombatUnit::from_enemy_definition(&EnemyDefinition::fallback());
        let mut seen = vec![false; enemy.moves().len()];
        for nonce in 0..64 {
            let seed = compute_seed(3, nonce, context::ENEMY_MOVE);
            let index = RandomMovePolicy.choose_move(&enemy, &PcgRng, seed);
            seen[index] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
