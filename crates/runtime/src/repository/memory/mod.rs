//! In-memory repository implementations.

mod roster;

pub use roster::InMemoryRosterRepo;
