//! Battle worker that owns the authoritative [`gacha_core::BattleSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives them through
//! [`gacha_core::BattleEngine`], fires pending continuations according to the
//! configured [`Pacing`], and publishes every resulting event to the EventBus.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use gacha_core::{
    BattleEngine, BattleError, BattleEvent, BattleExit, BattleOutcome, BattleResult,
    BattleSession, GameError, RosterStore,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, RosterEvent};
use crate::oracle::OracleManager;
use crate::repository::{RepositoryError, RosterRepository};

/// How pending continuations are released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pacing {
    /// Wait out each continuation's delay on the tokio clock.
    #[default]
    Realtime,
    /// Fire continuations as soon as they are scheduled.
    Instant,
}

impl std::str::FromStr for Pacing {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "realtime" => Ok(Self::Realtime),
            "instant" => Ok(Self::Instant),
            other => Err(format!("unknown pacing '{other}' (expected realtime|instant)")),
        }
    }
}

/// Commands that can be sent to the battle worker
pub enum Command {
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    SubmitMove {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    Swap {
        index: usize,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Resolved once the session accepts input or has ended.
    AwaitInput {
        reply: oneshot::Sender<BattleSession>,
    },
    QuerySession {
        reply: oneshot::Sender<BattleSession>,
    },
    QueryRoster {
        reply: oneshot::Sender<RosterStore>,
    },
}

/// Background task that hosts one battle.
///
/// The worker is the only owner of the session and of the roster snapshot the
/// reward is credited to, so no locking is needed around either.
pub struct BattleWorker {
    session: BattleSession,
    roster: RosterStore,
    oracles: OracleManager,
    repository: Arc<dyn RosterRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    pacing: Pacing,
    deadline: Option<Instant>,
    waiters: Vec<oneshot::Sender<BattleSession>>,
}

impl BattleWorker {
    pub fn new(
        session: BattleSession,
        roster: RosterStore,
        oracles: OracleManager,
        repository: Arc<dyn RosterRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        pacing: Pacing,
    ) -> Self {
        info!(
            team = session.players().len(),
            enemy = session.enemy().name(),
            ?pacing,
            "BattleWorker initialized"
        );

        Self {
            session,
            roster,
            oracles,
            repository,
            command_rx,
            event_bus,
            pacing,
            deadline: None,
            waiters: Vec::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self.deadline;
            let timer = async move {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            };

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                () = timer => self.fire_due(),
            }
        }
        debug!("BattleWorker command channel closed; stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result = self.apply_input(|engine| engine.start());
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::SubmitMove { index, reply } => {
                let result = self.apply_input(|engine| engine.submit_move(index));
                if reply.send(result).is_err() {
                    debug!("SubmitMove reply channel closed (caller dropped)");
                }
            }
            Command::Swap { index, reply } => {
                let result = self.apply_input(|engine| engine.swap(index));
                if reply.send(result).is_err() {
                    debug!("Swap reply channel closed (caller dropped)");
                }
            }
            Command::AwaitInput { reply } => {
                self.waiters.push(reply);
                self.notify_waiters();
            }
            Command::QuerySession { reply } => {
                if reply.send(self.session.clone()).is_err() {
                    debug!("QuerySession reply channel closed (caller dropped)");
                }
            }
            Command::QueryRoster { reply } => {
                if reply.send(self.roster.clone()).is_err() {
                    debug!("QueryRoster reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Runs one player input through the engine and classifies rejections.
    fn apply_input(
        &mut self,
        input: impl FnOnce(&mut BattleEngine<'_>) -> BattleResult,
    ) -> Result<()> {
        let result = {
            let env = self.oracles.as_battle_env();
            let mut engine = BattleEngine::new(&mut self.session, &mut self.roster, env);
            input(&mut engine)
        };

        match result {
            Ok(events) => {
                self.publish_all(events);
                self.after_step();
                Ok(())
            }
            Err(error) => self.reject(error),
        }
    }

    fn reject(&self, error: BattleError) -> Result<()> {
        let severity = error.severity();
        if severity.is_silent() {
            debug!(
                code = error.error_code(),
                phase = %self.session.phase(),
                "input ignored: {error}"
            );
            return Ok(());
        }

        debug!(code = error.error_code(), severity = severity.as_str(), "input rejected: {error}");
        if let Some(message) = error.user_message() {
            self.event_bus.publish(BattleEvent::notice(message));
        }
        Err(RuntimeError::Battle(error))
    }

    /// Fires the continuation whose deadline has passed.
    fn fire_due(&mut self) {
        self.deadline = None;
        let events = {
            let env = self.oracles.as_battle_env();
            let mut engine = BattleEngine::new(&mut self.session, &mut self.roster, env);
            engine.advance()
        };
        self.publish_all(events);
        self.after_step();
    }

    /// Arms the timer (or drains instantly), then settles finished battles.
    fn after_step(&mut self) {
        match self.pacing {
            Pacing::Realtime => {
                self.deadline = self
                    .session
                    .pending()
                    .map(|pending| Instant::now() + pending.remaining);
            }
            Pacing::Instant => {
                let events = {
                    let env = self.oracles.as_battle_env();
                    let mut engine = BattleEngine::new(&mut self.session, &mut self.roster, env);
                    engine.run_pending()
                };
                self.publish_all(events);
            }
        }
        self.notify_waiters();
    }

    fn publish_all(&mut self, events: Vec<BattleEvent>) {
        for event in events {
            match &event {
                BattleEvent::RewardGranted { .. } => {
                    self.event_bus.publish(Event::Roster(RosterEvent::GoldChanged {
                        gold: self.roster.gold(),
                    }));
                }
                BattleEvent::BattleEnded { outcome } => self.on_battle_ended(*outcome),
                _ => {}
            }
            self.event_bus.publish(event);
        }
    }

    fn on_battle_ended(&mut self, outcome: BattleOutcome) {
        if outcome != BattleOutcome::Victory {
            return;
        }
        match self.persist_victory() {
            Ok(balance) => {
                info!(gold = balance, "roster saved after victory");
                self.event_bus.publish(Event::Roster(RosterEvent::Saved {
                    outcome: BattleExit::Victory,
                }));
            }
            Err(err) => {
                error!("failed to save roster after victory: {err}");
                self.event_bus.publish(Event::Roster(RosterEvent::SaveFailed {
                    error: err.to_string(),
                }));
            }
        }
    }

    /// Credits the reward to the saved roster and returns the saved balance.
    ///
    /// With nothing saved yet the whole snapshot is written; it already holds
    /// the reward.
    fn persist_victory(&self) -> std::result::Result<u64, RepositoryError> {
        if self.repository.load()?.is_none() {
            self.repository.save(&self.roster.export())?;
            return Ok(self.roster.gold());
        }
        let gold = self.session.reward().map_or(0, |reward| reward.gold);
        let balance = self.repository.grant_gold(gold)?;
        if balance != self.roster.gold() {
            warn!(
                saved = balance,
                session = self.roster.gold(),
                "saved gold differs from the battle roster"
            );
        }
        Ok(balance)
    }

    fn ready_for_input(&self) -> bool {
        self.session.is_over()
            || (self.session.phase() == gacha_core::BattlePhase::PlayerTurn
                && !self.session.is_animating())
    }

    fn notify_waiters(&mut self) {
        if !self.ready_for_input() {
            return;
        }
        for waiter in self.waiters.drain(..) {
            if waiter.send(self.session.clone()).is_err() {
                debug!("AwaitInput reply channel closed (caller dropped)");
            }
        }
    }
}
