use core::fmt;

use crate::env::CatalogOracle;
use crate::roster::{
    BaseStats, CollectedCharacter, Move, default_moves, normalize_moves, normalize_stats,
};

use super::damage::apply_damage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

/// Addresses one unit of a battle session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitRef {
    /// Index into the session's player units.
    Player(usize),
    Enemy,
}

impl fmt::Display for UnitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(index) => write!(f, "player#{index}"),
            Self::Enemy => f.write_str("enemy"),
        }
    }
}

/// A battle-scoped unit. HP starts full and only goes down; a unit at 0 HP
/// is defeated but stays addressable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatUnit {
    name: String,
    side: Side,
    hp: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
    moves: Vec<Move>,
}

impl CombatUnit {
    /// Builds a unit at full HP. An empty move list is replaced with the
    /// default pair.
    pub fn new(name: impl Into<String>, side: Side, stats: BaseStats, moves: Vec<Move>) -> Self {
        let name = name.into();
        let moves = normalize_moves(moves, &name, default_moves);
        Self {
            name,
            side,
            hp: stats.hp,
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            moves,
        }
    }

    /// Unusable stats (zero hp) fall back to the defaults.
    pub fn from_character(character: &CollectedCharacter) -> Self {
        Self::new(
            character.name.clone(),
            Side::Player,
            normalize_stats(Some(character.stats), &character.name),
            character.moves.clone(),
        )
    }

    pub fn from_enemy_definition(definition: &EnemyDefinition) -> Self {
        let moves = normalize_moves(definition.moves.clone(), &definition.name, enemy_default_moves);
        Self::new(definition.name.clone(), Side::Enemy, definition.stats, moves)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Applies `damage` and returns the remaining HP.
    pub(crate) fn take_damage(&mut self, damage: u32) -> u32 {
        self.hp = apply_damage(self.hp, damage);
        self.hp
    }
}

/// Moves given to an enemy whose catalog entry has none.
pub fn enemy_default_moves() -> Vec<Move> {
    vec![
        Move::new("Trunk Slam", 20, "A powerful trunk attack"),
        Move::new("Stomp", 18, "Crushes enemies underfoot"),
    ]
}

/// The encounter's opponent, resolved from the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub name: String,
    pub stats: BaseStats,
    pub moves: Vec<Move>,
}

impl EnemyDefinition {
    pub const FALLBACK_NAME: &'static str = "Enemy Monster";
    pub const FALLBACK_STATS: BaseStats = BaseStats::new(100, 25, 8);

    /// Stand-in used when the boss is missing from the catalog.
    pub fn fallback() -> Self {
        Self {
            name: Self::FALLBACK_NAME.to_string(),
            stats: Self::FALLBACK_STATS,
            moves: default_moves(),
        }
    }

    /// Looks `boss_name` up in the catalog, falling back to [`Self::fallback`].
    pub fn resolve(catalog: &dyn CatalogOracle, boss_name: &str) -> Self {
        match catalog.find_by_name(boss_name) {
            Some(entry) => Self {
                stats: normalize_stats(entry.stats, &entry.name),
                moves: normalize_moves(entry.moves, &entry.name, enemy_default_moves),
                name: entry.name,
            },
            None => {
                tracing::warn!(boss = boss_name, "boss missing from catalog; using fallback enemy");
                Self::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::CatalogEntry;
    use crate::roster::Rarity;

    struct OneEntry(CatalogEntry);

    impl CatalogOracle for OneEntry {
        fn entry(&self, id: u32) -> Option<CatalogEntry> {
            (self.0.id == id).then(|| self.0.clone())
        }

        fn find_by_name(&self, name: &str) -> Option<CatalogEntry> {
            self.0.name.eq_ignore_ascii_case(name).then(|| self.0.clone())
        }

        fn entries(&self) -> Vec<CatalogEntry> {
            vec![self.0.clone()]
        }
    }

    fn elepha(moves: Vec<Move>) -> OneEntry {
        OneEntry(CatalogEntry {
            id: 7,
            name: "Elepha".to_string(),
            rarity: Rarity::Legendary,
            stats: Some(BaseStats::new(180, 22, 12)),
            moves,
        })
    }

    #[test]
    fn unit_starts_at_full_hp() {
        let unit = CombatUnit::new("A", Side::Player, BaseStats::new(30, 15, 5), Vec::new());
        assert_eq!(unit.hp(), 30);
        assert_eq!(unit.max_hp(), 30);
        assert_eq!(unit.moves().len(), 2);
    }

    #[test]
    fn damage_stops_at_zero() {
        let mut unit = CombatUnit::new("A", Side::Player, BaseStats::new(5, 1, 1), Vec::new());
        assert_eq!(unit.take_damage(9), 0);
        assert!(unit.is_defeated());
    }

    #[test]
    fn boss_lookup_is_case_insensitive_and_defaults_moves() {
        let catalog = elepha(Vec::new());
        let boss = EnemyDefinition::resolve(&catalog, "elepha");
        assert_eq!(boss.name, "Elepha");
        assert_eq!(boss.stats.hp, 180);
        assert_eq!(boss.moves[0].name, "Trunk Slam");
        assert_eq!(boss.moves[0].description, "A powerful trunk attack");
        assert_eq!(boss.moves[1].description, "Crushes enemies underfoot");
        assert_eq!(boss.moves[1].name, "Stomp");
    }

    #[test]
    fn missing_boss_uses_fallback() {
        let catalog = elepha(Vec::new());
        let enemy = EnemyDefinition::resolve(&catalog, "Mammoth");
        assert_eq!(enemy, EnemyDefinition::fallback());
        let unit = CombatUnit::from_enemy_definition(&enemy);
        assert_eq!(unit.side(), Side::Enemy);
        assert_eq!((unit.hp(), unit.attack(), unit.defense()), (100, 25, 8));
    }
}
