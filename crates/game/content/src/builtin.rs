//! Characters available when no catalog can be loaded.

use gacha_core::{BaseStats, CatalogEntry, Move, Rarity};

/// Two common characters, enough to draw a pack and fill a team.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: 1,
            name: "Default Hero".to_string(),
            rarity: Rarity::Common,
            stats: Some(BaseStats::new(90, 12, 10)),
            moves: vec![
                Move::new("Slash", 15, "A quick sword strike"),
                Move::new("Shield Bash", 12, "Strike with shield"),
            ],
        },
        CatalogEntry {
            id: 2,
            name: "Default Monster".to_string(),
            rarity: Rarity::Common,
            stats: Some(BaseStats::new(75, 15, 6)),
            moves: vec![
                Move::new("Claw", 14, "Sharp claw attack"),
                Move::new("Bite", 16, "Vicious bite"),
            ],
        },
    ]
}
