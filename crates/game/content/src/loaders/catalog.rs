//! Character catalog loader.

use std::collections::HashSet;
use std::path::Path;

use gacha_core::CatalogEntry;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub characters: Vec<CatalogEntry>,
}

/// Loader for the character catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog from a RON file.
    ///
    /// Entries keep their optional stats and moves; defaults are applied when a
    /// character enters a collection or a battle.
    pub fn load(path: &Path) -> LoadResult<Vec<CatalogEntry>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse catalog RON, rejecting blank names and repeated ids or names.
    pub fn parse(content: &str) -> LoadResult<Vec<CatalogEntry>> {
        let catalog: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for entry in &catalog.characters {
            if entry.name.trim().is_empty() {
                anyhow::bail!("Catalog entry {} has an empty name", entry.id);
            }
            if !ids.insert(entry.id) {
                anyhow::bail!("Duplicate catalog id {}", entry.id);
            }
            if !names.insert((entry.name.to_lowercase(), entry.rarity)) {
                anyhow::bail!(
                    "Duplicate catalog character '{}' ({})",
                    entry.name,
                    entry.rarity
                );
            }
        }

        Ok(catalog.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::Rarity;

    #[test]
    fn parses_optional_fields() {
        let entries = CatalogLoader::parse(
            r#"(
                characters: [
                    (id: 1, name: "Sprout", rarity: common),
                    (
                        id: 2,
                        name: "Pyro",
                        rarity: rare,
                        stats: Some((hp: 70, attack: 18, defense: 4)),
                        moves: [(name: "Ember", damage: 16, description: "A small flame")],
                    ),
                ],
            )"#,
        )
        .expect("valid catalog");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].stats, None);
        assert!(entries[0].moves.is_empty());
        assert_eq!(entries[1].rarity, Rarity::Rare);
        assert_eq!(entries[1].moves[0].name, "Ember");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = CatalogLoader::parse(
            r#"(characters: [
                (id: 1, name: "A", rarity: common),
                (id: 1, name: "B", rarity: common),
            ])"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn move_without_damage_gets_default() {
        let entries = CatalogLoader::parse(
            r#"(
                characters: [
                    (id: 1, name: "Sprout", rarity: common, moves: [(name: "Poke")]),
                ],
            )"#,
        )
        .expect("valid catalog");

        assert_eq!(entries[0].moves[0].damage, gacha_core::Move::DEFAULT_DAMAGE);
        assert_eq!(entries[0].moves[0].damage, 10);
    }
}
