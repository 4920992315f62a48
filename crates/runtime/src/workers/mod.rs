//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the live session and executes every command sent
//! through [`crate::RuntimeHandle`].

mod battle;

pub use battle::{BattleWorker, Command, Pacing};
