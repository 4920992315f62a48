//! Owned character data and the normalization applied to incoming catalog data.

use core::fmt;

use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Character rarity tier, ordered from most to least common.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Relative weight of this tier in a pack draw.
    pub const fn draw_weight(self) -> u32 {
        match self {
            Self::Common => 50,
            Self::Rare => 30,
            Self::Epic => 15,
            Self::Legendary => 5,
        }
    }
}

/// A named attack with flat bonus damage.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_move_damage"))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

#[cfg(feature = "serde")]
fn default_move_damage() -> u32 {
    Move::DEFAULT_DAMAGE
}

impl Move {
    /// Bonus damage of a move whose data leaves it out.
    pub const DEFAULT_DAMAGE: u32 = 10;

    pub fn new(name: impl Into<String>, damage: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            damage,
            description: description.into(),
        }
    }
}

/// Moves given to any character whose data carries none.
pub fn default_moves() -> Vec<Move> {
    vec![
        Move::new("Basic Attack", 15, "A basic attack"),
        Move::new("Power Strike", 20, "A stronger attack"),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl BaseStats {
    pub const DEFAULT: Self = Self {
        hp: 100,
        attack: 10,
        defense: 5,
    };

    pub const fn new(hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            hp,
            attack,
            defense,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Replaces absent or unusable (zero hp) stats with [`BaseStats::DEFAULT`].
pub fn normalize_stats(stats: Option<BaseStats>, owner: &str) -> BaseStats {
    match stats {
        Some(stats) if stats.hp > 0 => stats,
        _ => {
            tracing::warn!(character = owner, "missing stats; using defaults");
            BaseStats::DEFAULT
        }
    }
}

/// Returns `moves` unchanged unless empty, in which case `fallback` is used.
pub fn normalize_moves(moves: Vec<Move>, owner: &str, fallback: fn() -> Vec<Move>) -> Vec<Move> {
    if moves.is_empty() {
        tracing::warn!(character = owner, "missing move data; using default moves");
        fallback()
    } else {
        moves
    }
}

/// Collection identity: a name is owned once per rarity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterKey {
    pub name: String,
    pub rarity: Rarity,
}

impl CharacterKey {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
        }
    }
}

impl fmt::Display for CharacterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.rarity)
    }
}

/// A character in the player's collection. `count` is always at least 1.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectedCharacter {
    #[cfg_attr(feature = "serde", serde(default))]
    pub catalog_id: Option<u32>,
    pub name: String,
    pub rarity: Rarity,
    pub stats: BaseStats,
    pub moves: Vec<Move>,
    pub count: u32,
    pub obtained_at: DateTime<Utc>,
}

impl CollectedCharacter {
    pub fn key(&self) -> CharacterKey {
        CharacterKey::new(self.name.clone(), self.rarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_joins_name_and_rarity() {
        let key = CharacterKey::new("Pyro", Rarity::Epic);
        assert_eq!(key.to_string(), "Pyro-epic");
    }

    #[test]
    fn rarity_parses_lowercase_and_orders() {
        assert_eq!("legendary".parse::<Rarity>(), Ok(Rarity::Legendary));
        assert_eq!("Rare".parse::<Rarity>(), Ok(Rarity::Rare));
        assert!(Rarity::Common < Rarity::Legendary);
    }

    #[test]
    fn missing_data_falls_back() {
        assert_eq!(normalize_stats(None, "x"), BaseStats::DEFAULT);
        assert_eq!(
            normalize_stats(Some(BaseStats::new(0, 3, 3)), "x"),
            BaseStats::DEFAULT
        );
        let moves = normalize_moves(Vec::new(), "x", default_moves);
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].name, "Basic Attack");
        assert_eq!(moves[1].damage, 20);
    }
}
