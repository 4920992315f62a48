//! Deterministic battle rules and roster data shared across clients.
//!
//! `gacha-core` defines the canonical rules (roster, combat, battle state
//! machine, shop economy) and exposes pure APIs reused by the runtime and the
//! content loaders. Battle state only changes through [`battle::BattleEngine`];
//! roster state only through [`roster::RosterStore`] mutators.
pub mod battle;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod policy;
pub mod reward;
pub mod roster;
pub mod shop;

pub use battle::{
    BattleEngine, BattleError, BattleEvent, BattleExit, BattleOutcome, BattlePhase, BattleResult,
    BattleSession, Continuation, SwapReason, SwapRejection,
};
pub use combat::{CombatUnit, EnemyDefinition, Side, UnitRef};
pub use config::{BattleConfig, EconomyConfig, GameConfig};
pub use env::{BattleEnv, CatalogEntry, CatalogOracle, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use policy::{FirstMovePolicy, OpponentPolicy, RandomMovePolicy};
pub use reward::{FixedGoldReward, GoldLedger, Reward, RewardResolver};
pub use roster::{
    BaseStats, CharacterKey, CollectedCharacter, Move, Rarity, RosterError, RosterStore, SaveData,
    TeamSlots,
};
pub use shop::{CharacterPool, ShopError};
