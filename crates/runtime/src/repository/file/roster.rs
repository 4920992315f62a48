//! File-based RosterRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use gacha_core::SaveData;

use crate::repository::{RepositoryError, Result, RosterRepository};

/// File-based implementation of RosterRepository.
///
/// The roster is stored as a single pretty-printed JSON document. Saves go to
/// a sibling temp file first and are renamed into place, so a crash mid-write
/// leaves the previous save intact.
pub struct FileRosterRepository {
    path: PathBuf,
}

impl FileRosterRepository {
    pub const FILE_NAME: &'static str = "save.json";

    /// Create a repository writing to `path`. Parent directories are created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }
        Ok(Self { path })
    }

    /// Platform data directory location, e.g. `~/.local/share/gacha-arena/save.json`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gacha-arena").map(|dirs| dirs.data_dir().join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterRepository for FileRosterRepository {
    fn load(&self) -> Result<Option<SaveData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let data: SaveData = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;

        tracing::debug!("Loaded roster from {}", self.path.display());

        Ok(Some(data))
    }

    fn save(&self, data: &SaveData) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!(gold = data.gold, "Saved roster to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{CharacterKey, Rarity};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileRosterRepository::new(dir.path().join("nested/save.json")).expect("repo");
        assert!(repo.load().expect("load").is_none());
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = FileRosterRepository::new(dir.path().join("save.json")).expect("repo");

        let mut data = SaveData::default();
        repo.save(&data).expect("first save");
        data.gold = 3;
        data.team[0] = Some(CharacterKey::new("Pyro", Rarity::Rare));
        repo.save(&data).expect("second save");

        assert_eq!(repo.load().expect("load"), Some(data));
        assert!(!repo.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn garbage_is_reported_as_corrupted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("save.json");
        fs::write(&path, b"not json").expect("write");
        let repo = FileRosterRepository::new(&path).expect("repo");
        assert!(matches!(repo.load(), Err(RepositoryError::CorruptedData(_))));
    }
}
