//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the battle or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use gacha_core::{BattleSession, RosterStore};

use super::errors::{Result, RuntimeError};
use super::providers::PlayerIntent;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Open the first player turn.
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Strike with the active unit.
    ///
    /// Input that arrives at the wrong moment is dropped and reported as `Ok`.
    pub async fn submit_move(&self, index: usize) -> Result<()> {
        self.request(|reply| Command::SubmitMove { index, reply })
            .await?
    }

    /// Switch the active unit.
    pub async fn swap(&self, index: usize) -> Result<()> {
        self.request(|reply| Command::Swap { index, reply }).await?
    }

    pub async fn submit(&self, intent: PlayerIntent) -> Result<()> {
        match intent {
            PlayerIntent::UseMove(index) => self.submit_move(index).await,
            PlayerIntent::Swap(index) => self.swap(index).await,
        }
    }

    /// Wait until the battle accepts player input or has ended, then return a
    /// snapshot of the session.
    pub async fn await_input(&self) -> Result<BattleSession> {
        self.request(|reply| Command::AwaitInput { reply }).await
    }

    /// Query the current battle session (read-only snapshot)
    pub async fn query_session(&self) -> Result<BattleSession> {
        self.request(|reply| Command::QuerySession { reply }).await
    }

    /// Query the worker's roster, including any reward already granted
    pub async fn query_roster(&self) -> Result<RosterStore> {
        self.request(|reply| Command::QueryRoster { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Phase changes, strikes, swaps, outcome
    /// - `Topic::Roster` - Gold changes and saves
    /// - `Topic::Notice` - Player-facing messages
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
