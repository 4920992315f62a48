//! Player-owned data: gold, the character collection and the five-slot team.
mod character;
mod error;
mod save;
mod store;

pub use character::{
    BaseStats, CharacterKey, CollectedCharacter, Move, Rarity, default_moves, normalize_moves,
    normalize_stats,
};
pub use error::RosterError;
pub use save::SaveData;
pub use store::{RosterStore, TeamSlots};
