//! Gacha arena client binary.
//!
//! Composition root that assembles:
//! 1. Content (config + catalog) via `gacha-content`, falling back to the
//!    built-in catalog
//! 2. The saved roster, topped up with starter packs on first run
//! 3. Runtime via RuntimeBuilder, auto-played by the strongest-move provider
//!
//! Battle events are printed to stdout as they arrive; logs go to stderr and,
//! when `LOG_DIR` is set, to a file.
//!
//! # Examples
//!
//! ```bash
//! GACHA_PACING=instant GACHA_SEED=7 cargo run -p gacha-client
//! ```

mod config;
mod logging;
mod presenter;
mod starter;

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use gacha_content::{ContentFactory, default_catalog};
use gacha_core::{BattleExit, CatalogEntry, GameConfig, PcgRng, RosterStore};
use gacha_runtime::{
    CatalogOracleImpl, Event, FileRosterRepository, OracleManager, RosterRepository, Runtime,
    RuntimeConfig, RuntimeHandle, StrongestMoveProvider, Topic,
};

use config::ClientConfig;
use presenter::Presenter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting gacha arena client");
    tracing::info!("Data dir: {}", config.data_dir.display());
    tracing::info!("Save file: {}", config.save_path.display());

    let (game_config, entries) = load_content(&config);
    let seed = config.seed.unwrap_or_else(rand::random);

    let repository = Arc::new(FileRosterRepository::new(&config.save_path)?);
    let roster = prepare_roster(repository.as_ref(), &game_config, entries.clone(), seed)?;

    let catalog = Arc::new(CatalogOracleImpl::from_entries(entries));
    let oracles = OracleManager::new(catalog, &game_config.battle);

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            game_config,
            pacing: config.pacing,
            seed: Some(seed),
            ..RuntimeConfig::default()
        })
        .oracles(oracles)
        .repository(repository)
        .roster(roster)
        .player_provider(StrongestMoveProvider)
        .build()
        .await?;
    tracing::info!("Runtime built successfully");

    let printer = spawn_printer(runtime.handle()).await?;
    let report = runtime.run_battle().await?;
    runtime.shutdown().await?;
    if let Err(err) = printer.await {
        tracing::warn!("event printer stopped abnormally: {err}");
    }

    let summary = match report.outcome {
        BattleExit::Victory => "Victory",
        BattleExit::Defeat => "Defeat",
        BattleExit::NoTeam => "No team to battle with",
    };
    println!("\n{summary} ({} turns). Gold: {}", report.turns, report.gold);

    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Loads `config.toml` and `catalog.ron`; either one falls back to defaults.
fn load_content(config: &ClientConfig) -> (GameConfig, Vec<CatalogEntry>) {
    let factory = ContentFactory::new(config.data_dir.clone());

    let game_config = factory.load_config().unwrap_or_else(|err| {
        tracing::warn!("using default game config: {err:#}");
        GameConfig::default()
    });
    let entries = match factory.load_catalog() {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => {
            tracing::warn!("catalog is empty; using built-in characters");
            default_catalog()
        }
        Err(err) => {
            tracing::warn!("using built-in characters: {err:#}");
            default_catalog()
        }
    };
    tracing::info!(characters = entries.len(), "content loaded");

    (game_config, entries)
}

/// Loads the saved roster, opening starter packs when the team is empty.
fn prepare_roster(
    repository: &dyn RosterRepository,
    game_config: &GameConfig,
    entries: Vec<CatalogEntry>,
    seed: u64,
) -> Result<RosterStore> {
    let mut roster = match repository.load()? {
        Some(data) => RosterStore::import(data),
        None => RosterStore::new(game_config.economy.starting_gold),
    };

    if roster.team_slots().is_empty() {
        let pool = starter::starter_pool(entries, &game_config.battle.boss_name);
        let opened = starter::fill_team(
            &mut roster,
            &pool,
            game_config.economy.pack_cost,
            &PcgRng,
            seed,
            Utc::now(),
        );
        tracing::info!(opened, gold = roster.gold(), "starter packs opened");
        repository.save(&roster.export())?;
    }

    for member in roster.team_members() {
        println!(
            "{} ({}) HP {} ATK {} DEF {}",
            member.name, member.rarity, member.stats.hp, member.stats.attack, member.stats.defense
        );
    }
    Ok(roster)
}

/// Prints every event on all topics until the runtime shuts down.
async fn spawn_printer(handle: RuntimeHandle) -> Result<JoinHandle<()>> {
    let presenter = Presenter::new(&handle.query_session().await?);
    let [mut battle, mut roster, mut notice] = Topic::ALL.map(|topic| handle.subscribe(topic));
    drop(handle);

    Ok(tokio::spawn(async move {
        // Indexed in `Topic::ALL` order.
        let mut open = [true; Topic::ALL.len()];
        while open.contains(&true) {
            let (topic, received) = tokio::select! {
                event = battle.recv(), if open[0] => (0, event),
                event = roster.recv(), if open[1] => (1, event),
                event = notice.recv(), if open[2] => (2, event),
            };
            match received {
                Ok(event) => print_event(&presenter, &event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event printer fell behind");
                }
                Err(RecvError::Closed) => open[topic] = false,
            }
        }
    }))
}

fn print_event(presenter: &Presenter, event: &Event) {
    if let Some(line) = presenter.describe(event) {
        println!("{line}");
    }
}
