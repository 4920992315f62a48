use crate::roster::{BaseStats, Move, Rarity};

/// A character as published by the catalog. Stats and moves may be absent;
/// they are defaulted when the entry enters a collection or a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Option<BaseStats>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves: Vec<Move>,
}

/// Read-only access to the character catalog.
pub trait CatalogOracle: Send + Sync {
    fn entry(&self, id: u32) -> Option<CatalogEntry>;

    /// Case-insensitive lookup by display name.
    fn find_by_name(&self, name: &str) -> Option<CatalogEntry>;

    /// Every entry, ordered by id.
    fn entries(&self) -> Vec<CatalogEntry>;
}
