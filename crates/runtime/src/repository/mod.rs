//! Persistence adapters for the player's roster.
//!
//! The battle worker only ever talks to [`RosterRepository`]; which backend is
//! used is decided when the runtime is built.
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileRosterRepository;
pub use memory::InMemoryRosterRepo;
pub use traits::RosterRepository;
