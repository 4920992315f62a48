//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or a simple heuristic.
use std::collections::VecDeque;

use async_trait::async_trait;
use gacha_core::BattleSession;
use tokio::sync::Mutex;

use super::errors::Result;

/// What the player wants to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Strike with the active unit's move at this index.
    UseMove(usize),
    /// Make the unit at this index the active one.
    Swap(usize),
}

/// Trait for providing player intent based on the current battle.
///
/// Called only while the session is waiting on the player.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_intent(&self, session: &BattleSession) -> Result<PlayerIntent>;
}

/// Replays a fixed list of intents, then keeps using the first move.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<PlayerIntent>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = PlayerIntent>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_intent(&self, _session: &BattleSession) -> Result<PlayerIntent> {
        let mut script = self.script.lock().await;
        Ok(script.pop_front().unwrap_or(PlayerIntent::UseMove(0)))
    }
}

/// Always uses the active unit's highest-damage move.
pub struct StrongestMoveProvider;

#[async_trait]
impl ActionProvider for StrongestMoveProvider {
    async fn provide_intent(&self, session: &BattleSession) -> Result<PlayerIntent> {
        let index = session
            .active_unit()
            .and_then(|unit| {
                unit.moves()
                    .iter()
                    .enumerate()
                    .max_by_key(|(index, mv)| (mv.damage, std::cmp::Reverse(*index)))
                    .map(|(index, _)| index)
            })
            .unwrap_or(0);
        Ok(PlayerIntent::UseMove(index))
    }
}
