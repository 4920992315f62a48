//! Gold sinks and sources outside battle: pack draws, the market and fusion.
//!
//! Each operation checks everything it can before touching the store, so a
//! rejected call never leaves gold spent without a character to show for it.

use chrono::{DateTime, Utc};

use crate::env::{CatalogEntry, CatalogOracle, RngOracle, compute_seed, context};
use crate::error::{ErrorSeverity, GameError};
use crate::reward::GoldLedger;
use crate::roster::{CharacterKey, Rarity, RosterStore};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("the character pool is empty")]
    EmptyPool,

    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u64, available: u64 },

    #[error("{key} is not owned")]
    NotOwned { key: CharacterKey },

    #[error("{key} is in the team and cannot be sold")]
    InTeam { key: CharacterKey },

    #[error("cannot fuse {key} with itself")]
    SameCharacter { key: CharacterKey },
}

impl GameError for ShopError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyPool => ErrorSeverity::Internal,
            Self::NotOwned { .. } => ErrorSeverity::Validation,
            Self::InsufficientGold { .. } | Self::InTeam { .. } | Self::SameCharacter { .. } => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPool => "SHOP_EMPTY_POOL",
            Self::InsufficientGold { .. } => "SHOP_INSUFFICIENT_GOLD",
            Self::NotOwned { .. } => "SHOP_NOT_OWNED",
            Self::InTeam { .. } => "SHOP_IN_TEAM",
            Self::SameCharacter { .. } => "SHOP_SAME_CHARACTER",
        }
    }

    fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::InsufficientGold { .. } => Some("Not enough gold!"),
            Self::InTeam { .. } => Some("Cannot sell characters in your team!"),
            Self::SameCharacter { .. } => Some("Cannot fuse a character with itself!"),
            _ => None,
        }
    }
}

/// Weighted draw over catalog entries, weighted by rarity.
#[derive(Clone, Debug, Default)]
pub struct CharacterPool {
    entries: Vec<CatalogEntry>,
    total_weight: u32,
}

impl CharacterPool {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let total_weight = entries
            .iter()
            .map(|entry| entry.rarity.draw_weight())
            .sum();
        Self {
            entries,
            total_weight,
        }
    }

    pub fn from_catalog(catalog: &dyn CatalogOracle) -> Self {
        Self::new(catalog.entries())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draw(&self, rng: &dyn RngOracle, seed: u64) -> Option<&CatalogEntry> {
        if self.total_weight == 0 {
            return None;
        }
        let mut roll = rng.range(seed, 0, self.total_weight - 1);
        for entry in &self.entries {
            let weight = entry.rarity.draw_weight();
            if roll < weight {
                return Some(entry);
            }
            roll -= weight;
        }
        self.entries.last()
    }

    /// `count` independent draws for a market page.
    pub fn listings(&self, rng: &dyn RngOracle, seed: u64, count: usize) -> Vec<&CatalogEntry> {
        (0..count as u64)
            .filter_map(|slot| self.draw(rng, compute_seed(seed, slot, context::MARKET_LISTING)))
            .collect()
    }
}

fn charge(store: &mut RosterStore, amount: u64) -> Result<(), ShopError> {
    store
        .spend_gold(amount)
        .map_err(|_| ShopError::InsufficientGold {
            required: amount,
            available: store.gold(),
        })
}

/// Spends `cost` gold and adds one drawn character to the collection.
pub fn open_pack(
    store: &mut RosterStore,
    pool: &CharacterPool,
    cost: u64,
    rng: &dyn RngOracle,
    seed: u64,
    now: DateTime<Utc>,
) -> Result<CharacterKey, ShopError> {
    let entry = pool
        .draw(rng, compute_seed(seed, 0, context::PACK_DRAW))
        .ok_or(ShopError::EmptyPool)?;
    charge(store, cost)?;
    let key = store.add_to_collection(entry, now);
    tracing::info!(%key, cost, "pack opened");
    Ok(key)
}

pub const fn buy_price(rarity: Rarity) -> u64 {
    match rarity {
        Rarity::Common => 50,
        Rarity::Rare => 100,
        Rarity::Epic => 200,
        Rarity::Legendary => 400,
    }
}

/// 70% of the buy price, rounded down.
pub const fn sell_price(rarity: Rarity) -> u64 {
    buy_price(rarity) * 7 / 10
}

pub fn buy(
    store: &mut RosterStore,
    entry: &CatalogEntry,
    now: DateTime<Utc>,
) -> Result<CharacterKey, ShopError> {
    let price = buy_price(entry.rarity);
    charge(store, price)?;
    let key = store.add_to_collection(entry, now);
    tracing::info!(%key, price, "character bought");
    Ok(key)
}

/// Sells one copy of `key` and returns the gold received.
pub fn sell(store: &mut RosterStore, key: &CharacterKey) -> Result<u64, ShopError> {
    if store.character(key).is_none() {
        return Err(ShopError::NotOwned { key: key.clone() });
    }
    if store.is_in_team(key) {
        return Err(ShopError::InTeam { key: key.clone() });
    }
    let price = sell_price(key.rarity);
    store.remove_from_collection(key);
    store.grant_gold(price);
    tracing::info!(%key, price, "character sold");
    Ok(price)
}

/// Consumes one copy of each of two different characters and adds `minted`.
pub fn apply_fusion(
    store: &mut RosterStore,
    consumed: [&CharacterKey; 2],
    minted: &CatalogEntry,
    now: DateTime<Utc>,
) -> Result<CharacterKey, ShopError> {
    let [first, second] = consumed;
    if first == second {
        return Err(ShopError::SameCharacter { key: first.clone() });
    }
    for key in consumed {
        if store.character(key).is_none() {
            return Err(ShopError::NotOwned { key: key.clone() });
        }
    }

    store.remove_from_collection(first);
    store.remove_from_collection(second);
    let key = store.add_to_collection(minted, now);
    tracing::info!(%first, %second, result = %key, "fusion applied");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::roster::BaseStats;

    fn entry(id: u32, name: &str, rarity: Rarity) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            rarity,
            stats: Some(BaseStats::new(60, 12, 6)),
            moves: Vec::new(),
        }
    }

    fn pool() -> CharacterPool {
        CharacterPool::new(vec![
            entry(1, "Sprout", Rarity::Common),
            entry(2, "Pyro", Rarity::Rare),
            entry(3, "Glacia", Rarity::Epic),
            entry(4, "Elepha", Rarity::Legendary),
        ])
    }

    #[test]
    fn draw_follows_rarity_weights() {
        let pool = pool();
        let mut commons = 0;
        let mut legendaries = 0;
        for nonce in 0..2000 {
            let seed = compute_seed(11, nonce, context::PACK_DRAW);
            match pool.draw(&PcgRng, seed).map(|e| e.rarity) {
                Some(Rarity::Common) => commons += 1,
                Some(Rarity::Legendary) => legendaries += 1,
                Some(_) => {}
                None => panic!("non-empty pool must draw"),
            }
        }
        assert!(commons > legendaries * 4, "{commons} commons vs {legendaries} legendaries");
        assert!(legendaries > 0);
    }

    #[test]
    fn empty_pool_does_not_charge() {
        let mut store = RosterStore::new(20);
        let result = open_pack(&mut store, &CharacterPool::default(), 5, &PcgRng, 1, Utc::now());
        assert_eq!(result, Err(ShopError::EmptyPool));
        assert_eq!(store.gold(), 20);
    }

    #[test]
    fn pack_spends_cost_and_adds_character() {
        let mut store = RosterStore::new(7);
        let key = open_pack(&mut store, &pool(), 5, &PcgRng, 1, Utc::now()).expect("pack");
        assert_eq!(store.gold(), 2);
        assert!(store.character(&key).is_some());

        let broke = open_pack(&mut store, &pool(), 5, &PcgRng, 2, Utc::now());
        assert_eq!(
            broke,
            Err(ShopError::InsufficientGold {
                required: 5,
                available: 2
            })
        );
        assert_eq!(store.collection().len(), 1);
    }

    #[test]
    fn prices_by_rarity() {
        assert_eq!(buy_price(Rarity::Common), 50);
        assert_eq!(sell_price(Rarity::Common), 35);
        assert_eq!(sell_price(Rarity::Rare), 70);
        assert_eq!(sell_price(Rarity::Epic), 140);
        assert_eq!(sell_price(Rarity::Legendary), 280);
    }

    #[test]
    fn buy_and_sell_round_trip_gold() {
        let mut store = RosterStore::new(100);
        let pyro = buy(&mut store, &entry(2, "Pyro", Rarity::Rare), Utc::now()).expect("buy");
        assert_eq!(store.gold(), 0);
        assert!(matches!(
            buy(&mut store, &entry(1, "Sprout", Rarity::Common), Utc::now()),
            Err(ShopError::InsufficientGold { .. })
        ));

        store.set_slot(0, Some(pyro.clone())).expect("team");
        assert_eq!(
            sell(&mut store, &pyro),
            Err(ShopError::InTeam { key: pyro.clone() })
        );

        store.clear_slot(0).expect("clear");
        assert_eq!(sell(&mut store, &pyro), Ok(70));
        assert_eq!(store.gold(), 70);
        assert_eq!(
            sell(&mut store, &pyro),
            Err(ShopError::NotOwned { key: pyro })
        );
    }

    #[test]
    fn fusion_consumes_two_and_mints_one() {
        let mut store = RosterStore::default();
        let a = store.add_to_collection(&entry(1, "Sprout", Rarity::Common), Utc::now());
        let b = store.add_to_collection(&entry(2, "Pyro", Rarity::Rare), Utc::now());

        assert_eq!(
            apply_fusion(&mut store, [&a, &a], &entry(9, "Blaze", Rarity::Epic), Utc::now()),
            Err(ShopError::SameCharacter { key: a.clone() })
        );

        let fused = apply_fusion(&mut store, [&a, &b], &entry(9, "Blaze", Rarity::Epic), Utc::now())
            .expect("fusion");
        assert!(store.character(&a).is_none());
        assert!(store.character(&b).is_none());
        assert_eq!(store.character(&fused).map(|c| c.rarity), Some(Rarity::Epic));
    }

    #[test]
    fn listings_draw_requested_count() {
        assert_eq!(pool().listings(&PcgRng, 5, 3).len(), 3);
        assert!(CharacterPool::default().listings(&PcgRng, 5, 3).is_empty());
    }
}
