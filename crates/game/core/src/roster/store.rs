use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use crate::config::{EconomyConfig, GameConfig};
use crate::env::CatalogEntry;
use crate::reward::GoldLedger;

use super::{
    CharacterKey, CollectedCharacter, RosterError, default_moves, normalize_moves,
    normalize_stats,
};

/// The five ordered team slots. A key occupies at most one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamSlots([Option<CharacterKey>; GameConfig::TEAM_SLOTS]);

impl TeamSlots {
    pub fn get(&self, index: usize) -> Option<&CharacterKey> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Slot currently holding `key`.
    pub fn position(&self, key: &CharacterKey) -> Option<usize> {
        self.0.iter().position(|slot| slot.as_ref() == Some(key))
    }

    pub fn as_array(&self) -> &[Option<CharacterKey>; GameConfig::TEAM_SLOTS] {
        &self.0
    }

    /// Filled slots in slot order.
    pub fn filled(&self) -> impl Iterator<Item = &CharacterKey> {
        self.0.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub(crate) fn place(&mut self, index: usize, key: Option<CharacterKey>) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = key;
        }
    }
}

/// Owns the player's gold, collection and team.
///
/// Every mutator is synchronous and validates before changing anything, so a
/// rejected call leaves the store as it was. Persisting is the caller's job
/// (see [`RosterStore::export`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterStore {
    pub(crate) gold: u64,
    pub(crate) collection: BTreeMap<CharacterKey, CollectedCharacter>,
    pub(crate) team: TeamSlots,
}

impl RosterStore {
    pub fn new(starting_gold: u64) -> Self {
        Self {
            gold: starting_gold,
            collection: BTreeMap::new(),
            team: TeamSlots::default(),
        }
    }

    // ===== team =====

    pub fn team(&self) -> [Option<CharacterKey>; GameConfig::TEAM_SLOTS] {
        self.team.as_array().clone()
    }

    pub fn team_slots(&self) -> &TeamSlots {
        &self.team
    }

    /// Characters in filled slots, in slot order.
    pub fn team_members(&self) -> Vec<&CollectedCharacter> {
        self.team
            .filled()
            .filter_map(|key| self.collection.get(key))
            .collect()
    }

    /// Places `key` in slot `index`, or clears the slot when `key` is `None`.
    ///
    /// Re-placing a key into the slot it already holds is accepted.
    pub fn set_slot(&mut self, index: usize, key: Option<CharacterKey>) -> Result<(), RosterError> {
        if index >= GameConfig::TEAM_SLOTS {
            return Err(RosterError::SlotOutOfRange { index });
        }
        let Some(key) = key else {
            return self.clear_slot(index);
        };
        if !self.collection.contains_key(&key) {
            return Err(RosterError::NotInCollection { key });
        }
        if let Some(slot) = self.team.position(&key)
            && slot != index
        {
            return Err(RosterError::AlreadyInTeam { key, slot });
        }

        tracing::debug!(slot = index, %key, "team slot set");
        self.team.place(index, Some(key));
        Ok(())
    }

    pub fn clear_slot(&mut self, index: usize) -> Result<(), RosterError> {
        if index >= GameConfig::TEAM_SLOTS {
            return Err(RosterError::SlotOutOfRange { index });
        }
        self.team.place(index, None);
        Ok(())
    }

    pub fn is_in_team(&self, key: &CharacterKey) -> bool {
        self.team.position(key).is_some()
    }

    // ===== collection =====

    pub fn collection(&self) -> &BTreeMap<CharacterKey, CollectedCharacter> {
        &self.collection
    }

    pub fn character(&self, key: &CharacterKey) -> Option<&CollectedCharacter> {
        self.collection.get(key)
    }

    /// Adds one copy of `entry`. Duplicates bump the owned count.
    pub fn add_to_collection(
        &mut self,
        entry: &CatalogEntry,
        obtained_at: DateTime<Utc>,
    ) -> CharacterKey {
        let key = CharacterKey::new(entry.name.clone(), entry.rarity);
        match self.collection.entry(key.clone()) {
            Entry::Occupied(mut owned) => {
                let owned = owned.get_mut();
                owned.count = owned.count.saturating_add(1);
                tracing::debug!(%key, count = owned.count, "duplicate added to collection");
            }
            Entry::Vacant(slot) => {
                slot.insert(CollectedCharacter {
                    catalog_id: Some(entry.id),
                    name: entry.name.clone(),
                    rarity: entry.rarity,
                    stats: normalize_stats(entry.stats, &entry.name),
                    moves: normalize_moves(entry.moves.clone(), &entry.name, default_moves),
                    count: 1,
                    obtained_at,
                });
                tracing::debug!(%key, "new character added to collection");
            }
        }
        key
    }

    /// Removes one copy of `key`. Returns false when the key is not owned.
    ///
    /// Removing the last copy also empties any team slot holding it.
    pub fn remove_from_collection(&mut self, key: &CharacterKey) -> bool {
        let Some(owned) = self.collection.get_mut(key) else {
            return false;
        };
        if owned.count > 1 {
            owned.count -= 1;
            return true;
        }

        self.collection.remove(key);
        if let Some(slot) = self.team.position(key) {
            tracing::debug!(slot, %key, "last copy removed; clearing team slot");
            self.team.place(slot, None);
        }
        true
    }

    // ===== gold =====

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn spend_gold(&mut self, amount: u64) -> Result<(), RosterError> {
        if amount > self.gold {
            return Err(RosterError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new(EconomyConfig::DEFAULT_STARTING_GOLD)
    }
}

impl GoldLedger for RosterStore {
    fn grant_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    fn balance(&self) -> u64 {
        self.gold
    }
}
