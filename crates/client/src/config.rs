//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use gacha_runtime::{FileRosterRepository, Pacing};

/// Where content lives, where the save goes, and how the battle is paced.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub save_path: PathBuf,
    pub pacing: Pacing,
    pub seed: Option<u64>,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_path: FileRosterRepository::default_path()
                .unwrap_or_else(|| PathBuf::from(FileRosterRepository::FILE_NAME)),
            pacing: Pacing::default(),
            seed: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GACHA_DATA_DIR` - Directory holding `config.toml` and `catalog.ron` (default: `data`)
    /// - `GACHA_SAVE_PATH` - Save file (default: platform data dir)
    /// - `GACHA_PACING` - `realtime` or `instant` (default: realtime)
    /// - `GACHA_SEED` - Battle and pack seed (default: random)
    /// - `LOG_DIR` - Also write logs to `LOG_DIR/client.log`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("GACHA_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(path) = read_env::<PathBuf>("GACHA_SAVE_PATH") {
            config.save_path = path;
        }
        if let Some(pacing) = read_env::<Pacing>("GACHA_PACING") {
            config.pacing = pacing;
        }
        config.seed = read_env::<u64>("GACHA_SEED");
        config.log_dir = read_env::<PathBuf>("LOG_DIR");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
