//! Combat resolution.
//!
//! Pure functions and battle-scoped unit data. Nothing here touches the
//! roster; units are projected from collected characters when a battle starts.
//!
//! - `resolve_player_strike` / `resolve_enemy_strike`: damage formulas
//! - `apply_damage`: HP reduction (clamped to 0)
//! - `CombatUnit`: hp-tracking copy of a character or enemy

pub mod damage;
pub mod unit;

pub use damage::{MINIMUM_DAMAGE, apply_damage, resolve_enemy_strike, resolve_player_strike};
pub use unit::{CombatUnit, EnemyDefinition, Side, UnitRef, enemy_default_moves};
