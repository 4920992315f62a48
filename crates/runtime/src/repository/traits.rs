//! Repository contracts for saving and loading the player's roster.

use gacha_core::SaveData;

use super::Result;

/// Repository for roster persistence.
///
/// This is for DYNAMIC data that outlives a battle:
/// - Gold balance
/// - Collection and team slots
///
/// Content (catalog, config) is static and loaded through `gacha-content`.
pub trait RosterRepository: Send + Sync {
    /// Load the saved roster, or `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveData>>;

    /// Replace the saved roster.
    fn save(&self, data: &SaveData) -> Result<()>;

    /// Credit gold to the saved roster and return the new balance.
    fn grant_gold(&self, amount: u64) -> Result<u64> {
        let mut data = self.load()?.unwrap_or_default();
        data.gold = data.gold.saturating_add(amount);
        self.save(&data)?;
        Ok(data.gold)
    }
}
