use std::collections::BTreeMap;

use crate::config::{EconomyConfig, GameConfig};

use super::store::TeamSlots;
use super::{
    CharacterKey, CollectedCharacter, RosterStore, default_moves, normalize_moves, normalize_stats,
};

/// Persisted form of a [`RosterStore`].
///
/// `team` is a list rather than a fixed array so older saves with fewer slots
/// still load; [`RosterStore::import`] pads it to the full team size.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveData {
    #[cfg_attr(feature = "serde", serde(default = "default_gold"))]
    pub gold: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub collection: Vec<CollectedCharacter>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub team: Vec<Option<CharacterKey>>,
}

#[cfg(feature = "serde")]
fn default_gold() -> u64 {
    EconomyConfig::DEFAULT_STARTING_GOLD
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            gold: EconomyConfig::DEFAULT_STARTING_GOLD,
            collection: Vec::new(),
            team: vec![None; GameConfig::TEAM_SLOTS],
        }
    }
}

impl RosterStore {
    pub fn export(&self) -> SaveData {
        SaveData {
            gold: self.gold,
            collection: self.collection.values().cloned().collect(),
            team: self.team.as_array().to_vec(),
        }
    }

    /// Rebuilds a store from saved data, repairing what it can.
    ///
    /// Entries with a zero count are dropped and repeated entries are merged.
    /// Stats and moves are normalized the same way as on collection.
    /// Team keys that are no longer owned, or that repeat an earlier slot, are
    /// cleared. Slots beyond the team size are ignored.
    pub fn import(data: SaveData) -> Self {
        let mut collection: BTreeMap<CharacterKey, CollectedCharacter> = BTreeMap::new();
        for mut character in data.collection {
            if character.count == 0 {
                tracing::warn!(name = %character.name, "dropping saved character with zero count");
                continue;
            }
            character.stats = normalize_stats(Some(character.stats), &character.name);
            character.moves = normalize_moves(character.moves, &character.name, default_moves);
            let key = character.key();
            match collection.get_mut(&key) {
                Some(existing) => {
                    existing.count = existing.count.saturating_add(character.count);
                }
                None => {
                    collection.insert(key, character);
                }
            }
        }

        if data.team.len() > GameConfig::TEAM_SLOTS {
            tracing::warn!(slots = data.team.len(), "saved team has extra slots; ignoring them");
        }
        let mut team = TeamSlots::default();
        for (index, key) in data.team.into_iter().take(GameConfig::TEAM_SLOTS).enumerate() {
            let Some(key) = key else {
                continue;
            };
            if !collection.contains_key(&key) {
                tracing::warn!(slot = index, %key, "saved team references an unowned character");
                continue;
            }
            if team.position(&key).is_some() {
                tracing::warn!(slot = index, %key, "saved team repeats a character");
                continue;
            }
            team.place(index, Some(key));
        }

        Self {
            gold: data.gold,
            collection,
            team,
        }
    }
}
