//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and action providers
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use gacha_core::{BattleError, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl RuntimeError {
    /// Severity of the underlying battle rejection, if this is one.
    pub fn battle_severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Battle(error) => Some(error.severity()),
            _ => None,
        }
    }
}
