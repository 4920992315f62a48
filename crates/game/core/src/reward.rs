//! Battle payout.
use crate::battle::BattleOutcome;

/// Something that holds gold and can be credited with it.
pub trait GoldLedger {
    fn grant_gold(&mut self, amount: u64);

    fn balance(&self) -> u64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub gold: u64,
}

/// Decides what a finished battle pays out.
pub trait RewardResolver: Send + Sync {
    fn resolve(&self, outcome: BattleOutcome) -> Option<Reward>;
}

/// Pays a flat amount of gold for a victory and nothing for a defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedGoldReward {
    pub gold: u64,
}

impl FixedGoldReward {
    pub const fn new(gold: u64) -> Self {
        Self { gold }
    }
}

impl Default for FixedGoldReward {
    fn default() -> Self {
        Self::new(crate::config::BattleConfig::DEFAULT_VICTORY_GOLD)
    }
}

impl RewardResolver for FixedGoldReward {
    fn resolve(&self, outcome: BattleOutcome) -> Option<Reward> {
        match outcome {
            BattleOutcome::Victory => Some(Reward { gold: self.gold }),
            BattleOutcome::Defeat => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pays_on_victory_only() {
        let reward = FixedGoldReward::default();
        assert_eq!(reward.resolve(BattleOutcome::Victory), Some(Reward { gold: 10 }));
        assert_eq!(reward.resolve(BattleOutcome::Defeat), None);
    }
}
