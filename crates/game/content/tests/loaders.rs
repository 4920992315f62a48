use std::fs;
use std::path::PathBuf;

use gacha_content::{ContentFactory, default_catalog};
use gacha_core::{BattleConfig, GameConfig, Rarity};

fn repo_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn shipped_content_loads() {
    let factory = ContentFactory::new(repo_data_dir());

    let config = factory.load_config().expect("config.toml");
    assert_eq!(config, GameConfig::default());

    let catalog = factory.load_catalog().expect("catalog.ron");
    let boss = catalog
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(BattleConfig::DEFAULT_BOSS_NAME))
        .expect("boss is in the catalog");
    assert_eq!(boss.rarity, Rarity::Legendary);
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[battle]\nstrike_delay_ms = 0\n",
    )
    .expect("write config");

    let config = ContentFactory::new(dir.path()).load_config().expect("config");
    assert_eq!(config.battle.strike_delay_ms, 0);
    assert_eq!(config.battle.enemy_turn_delay_ms, 1000);
    assert_eq!(config.battle.boss_name, "Elepha");
    assert_eq!(config.economy.pack_cost, 5);
}

#[test]
fn missing_catalog_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = ContentFactory::new(dir.path())
        .load_catalog()
        .expect_err("no catalog file");
    assert!(error.to_string().contains("catalog.ron"));
}

#[test]
fn default_catalog_has_no_boss() {
    assert!(
        default_catalog()
            .iter()
            .all(|entry| !entry.name.eq_ignore_ascii_case(BattleConfig::DEFAULT_BOSS_NAME))
    );
}
