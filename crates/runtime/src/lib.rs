//! Async runtime that hosts a battle on top of `gacha-core`.
//!
//! This crate wires together the action provider abstraction, oracle access,
//! roster repositories, and the battle worker into a cohesive runtime API.
//! Consumers embed [`Runtime`] to run a battle, subscribe to events, and
//! interact with the session through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, PlayerIntent, Result, RuntimeError, RuntimeHandle, ScriptedProvider,
    StrongestMoveProvider,
};
pub use events::{Event, EventBus, NoticeEvent, RosterEvent, Topic};
pub use oracle::{CatalogOracleImpl, OracleManager};
pub use repository::{
    FileRosterRepository, InMemoryRosterRepo, RepositoryError, RosterRepository,
};
pub use runtime::{BattleReport, Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::Pacing;
