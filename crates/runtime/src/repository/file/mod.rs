//! File-backed repository implementations.

mod roster;

pub use roster::FileRosterRepository;
