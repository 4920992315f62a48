//! First-run team assembly from pack draws.

use chrono::{DateTime, Utc};
use gacha_core::shop::{self, CharacterPool};
use gacha_core::{CatalogEntry, RngOracle, RosterStore};
use tracing::{debug, info};

/// Slots filled for a new player.
pub const STARTER_TEAM_SIZE: usize = 3;
/// Pack budget for the starter team; duplicates still count.
pub const STARTER_PACK_LIMIT: usize = 10;

/// Pack pool without the boss, so a new player never fields it.
pub fn starter_pool(entries: Vec<CatalogEntry>, boss_name: &str) -> CharacterPool {
    CharacterPool::new(
        entries
            .into_iter()
            .filter(|entry| !entry.name.eq_ignore_ascii_case(boss_name))
            .collect(),
    )
}

/// Opens packs until `STARTER_TEAM_SIZE` slots hold distinct characters, the
/// pack budget is spent, or gold runs out. Returns the number of packs opened.
pub fn fill_team(
    roster: &mut RosterStore,
    pool: &CharacterPool,
    pack_cost: u64,
    rng: &dyn RngOracle,
    seed: u64,
    now: DateTime<Utc>,
) -> usize {
    let mut opened = 0;
    for pack in 0..STARTER_PACK_LIMIT {
        if roster.team_slots().filled().count() >= STARTER_TEAM_SIZE {
            break;
        }
        let pack_seed = seed.wrapping_add(pack as u64);
        let key = match shop::open_pack(roster, pool, pack_cost, rng, pack_seed, now) {
            Ok(key) => key,
            Err(err) => {
                debug!("stopping starter packs: {err}");
                break;
            }
        };
        opened += 1;
        if roster.is_in_team(&key) {
            continue;
        }
        let free = roster.team().iter().position(Option::is_none);
        if let Some(slot) = free
            && roster.set_slot(slot, Some(key.clone())).is_ok()
        {
            info!(%key, slot, "starter joined the team");
        }
    }
    opened
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use gacha_core::{PcgRng, Rarity};

    fn entry(id: u32, name: &str, rarity: Rarity) -> CatalogEntry {
        CatalogEntry {
            id,
            name: name.to_string(),
            rarity,
            stats: None,
            moves: Vec::new(),
        }
    }

    #[test]
    fn boss_is_left_out_of_the_pool() {
        let pool = starter_pool(
            vec![
                entry(1, "Sprout", Rarity::Common),
                entry(2, "Elepha", Rarity::Legendary),
            ],
            "elepha",
        );
        assert_eq!(pool.entries().len(), 1);
        assert_eq!(pool.entries()[0].name, "Sprout");
    }

    #[test]
    fn fills_distinct_slots_within_budget() {
        let pool = CharacterPool::new(vec![
            entry(1, "Sprout", Rarity::Common),
            entry(2, "Pebble", Rarity::Common),
            entry(3, "Pyro", Rarity::Rare),
            entry(4, "Tidal", Rarity::Rare),
        ]);
        let mut roster = RosterStore::new(100);

        let opened = fill_team(&mut roster, &pool, 5, &PcgRng, 42, Utc::now());

        assert!(opened <= STARTER_PACK_LIMIT);
        assert_eq!(roster.gold(), 100 - 5 * opened as u64);
        let team: Vec<_> = roster.team_slots().filled().cloned().collect();
        assert!(!team.is_empty() && team.len() <= STARTER_TEAM_SIZE);
        let unique: BTreeSet<_> = team.iter().collect();
        assert_eq!(unique.len(), team.len());
    }

    #[test]
    fn stops_when_gold_runs_out() {
        let pool = CharacterPool::new(vec![entry(1, "Sprout", Rarity::Common)]);
        let mut roster = RosterStore::new(7);

        let opened = fill_team(&mut roster, &pool, 5, &PcgRng, 1, Utc::now());

        assert_eq!(opened, 1);
        assert_eq!(roster.gold(), 2);
        assert_eq!(roster.team_slots().filled().count(), 1);
    }
}
