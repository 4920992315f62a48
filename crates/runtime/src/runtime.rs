//! High-level runtime orchestrator.
//!
//! The runtime owns the battle worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive one battle.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use gacha_core::{
    BattleError, BattleExit, BattleSession, EnemyDefinition, GameConfig, Reward, RosterStore,
};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{InMemoryRosterRepo, RosterRepository};
use crate::workers::{BattleWorker, Command, Pacing};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub pacing: Pacing,
    /// Battle seed; a random one is drawn when unset.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            pacing: Pacing::default(),
            seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Summary of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: BattleExit,
    pub reward: Option<Reward>,
    /// Completed player/enemy exchanges.
    pub turns: u32,
    /// Gold balance after any reward.
    pub gold: u64,
}

/// Main runtime that hosts one battle
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Ask the provider for one intent and submit it.
    ///
    /// Returns the session snapshot the intent was chosen against, or `None`
    /// when the battle is already over.
    pub async fn step(&mut self) -> Result<Option<BattleSession>> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let session = self.handle.await_input().await?;
        if session.is_over() {
            return Ok(None);
        }

        let intent = provider.provide_intent(&session).await?;
        debug!(?intent, turn = session.turns(), "submitting player intent");
        self.handle.submit(intent).await?;
        Ok(Some(session))
    }

    /// Run the battle from `Idle` until it ends.
    ///
    /// Rejected intents that are recoverable (for example swapping to a
    /// defeated unit) are reported on the notice topic and the loop asks the
    /// provider again.
    pub async fn run_battle(&mut self) -> Result<BattleReport> {
        if self.player_provider.is_none() {
            return Err(RuntimeError::ProviderNotSet);
        }

        match self.handle.start().await {
            Ok(()) => {}
            Err(RuntimeError::Battle(BattleError::MissingTeamData)) => {
                info!("no team assembled; battle not started");
                return self.report().await;
            }
            Err(err) => return Err(err),
        }

        loop {
            match self.step().await {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(err) if err.battle_severity().is_some_and(|s| s.is_recoverable()) => {
                    debug!("intent rejected, asking provider again: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        self.report().await
    }

    async fn report(&self) -> Result<BattleReport> {
        let session = self.handle.query_session().await?;
        let roster = self.handle.query_roster().await?;
        Ok(BattleReport {
            outcome: session.exit().unwrap_or(BattleExit::NoTeam),
            reward: session.reward(),
            turns: session.turns(),
            gold: roster.gold(),
        })
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn RosterRepository>>,
    roster: Option<RosterStore>,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
            roster: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the roster repository (defaults to in-memory)
    pub fn repository(mut self, repository: Arc<dyn RosterRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use this roster instead of loading it from the repository
    pub fn roster(mut self, roster: RosterStore) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryRosterRepo::new()));
        let game_config = &self.config.game_config;

        let roster = match self.roster {
            Some(roster) => roster,
            None => match repository.load()? {
                Some(data) => RosterStore::import(data),
                None => {
                    info!("no saved roster; starting fresh");
                    RosterStore::new(game_config.economy.starting_gold)
                }
            },
        };

        let enemy = EnemyDefinition::resolve(oracles.catalog(), &game_config.battle.boss_name);
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let session = BattleSession::from_roster(&roster, &enemy, &game_config.battle, seed);
        info!(seed, enemy = %enemy.name, team = session.players().len(), "battle prepared");

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = BattleWorker::new(
            session,
            roster,
            oracles,
            repository,
            command_rx,
            event_bus,
            self.config.pacing,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
