//! Turn-based battles between the player's team and a single enemy.
//!
//! A [`BattleSession`] holds the battle-scoped units and the turn cycle;
//! [`BattleEngine`] borrows it together with a gold ledger and the battle
//! oracles, and is the only code that advances it.
mod engine;
mod error;
mod event;
mod phase;
mod session;

pub use engine::{BattleEngine, BattleResult};
pub use error::{BattleError, SwapRejection};
pub use event::{BattleEvent, SwapReason};
pub use phase::{BattleExit, BattleOutcome, BattlePhase};
pub use session::{BattleSession, Continuation, Scheduled};
