//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Character catalog (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//! - A built-in fallback catalog
//!
//! Content is consumed by runtime oracles and never appears in battle state.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builtin::default_catalog;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
