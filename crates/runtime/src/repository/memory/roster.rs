//! In-memory RosterRepository implementation for tests and local runs.

use std::sync::RwLock;

use gacha_core::SaveData;

use crate::repository::{RepositoryError, Result, RosterRepository};

/// In-memory implementation of RosterRepository.
pub struct InMemoryRosterRepo {
    data: RwLock<Option<SaveData>>,
}

impl InMemoryRosterRepo {
    /// Create an empty repository (nothing saved yet).
    pub fn new() -> Self {
        Self {
            data: RwLock::new(None),
        }
    }

    /// Create with an existing save.
    pub fn with_save(data: SaveData) -> Self {
        Self {
            data: RwLock::new(Some(data)),
        }
    }
}

impl Default for InMemoryRosterRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterRepository for InMemoryRosterRepo {
    fn load(&self) -> Result<Option<SaveData>> {
        let data = self.data.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(data.clone())
    }

    fn save(&self, data: &SaveData) -> Result<()> {
        let mut slot = self.data.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_gold_starts_from_default_save() {
        let repo = InMemoryRosterRepo::new();
        assert_eq!(repo.load().expect("load"), None);

        assert_eq!(repo.grant_gold(10).expect("grant"), 110);
        assert_eq!(repo.grant_gold(5).expect("grant"), 115);
        assert_eq!(repo.load().expect("load").map(|d| d.gold), Some(115));
    }
}
