//! Damage calculation and application.

use crate::roster::Move;

/// Every landed strike deals at least this much.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Damage dealt by a player unit using `mv`.
///
/// # Formula
///
/// ```text
/// damage = max(1, attack + move.damage - defense)
/// ```
pub fn resolve_player_strike(attacker_attack: u32, mv: &Move, defender_defense: u32) -> u32 {
    attacker_attack
        .saturating_add(mv.damage)
        .saturating_sub(defender_defense)
        .max(MINIMUM_DAMAGE)
}

/// Damage dealt by the enemy.
///
/// The enemy's chosen move only names the attack; its damage field is not
/// added.
///
/// ```text
/// damage = max(1, attack - defense)
/// ```
pub fn resolve_enemy_strike(enemy_attack: u32, player_defense: u32) -> u32 {
    enemy_attack
        .saturating_sub(player_defense)
        .max(MINIMUM_DAMAGE)
}

/// Apply damage to current HP, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_strike_adds_move_damage() {
        let mv = Move::new("Slash", 10, "");
        assert_eq!(resolve_player_strike(15, &mv, 2), 23);
    }

    #[test]
    fn strikes_never_drop_below_one() {
        let mv = Move::new("Tap", 0, "");
        assert_eq!(resolve_player_strike(3, &mv, 50), 1);
        assert_eq!(resolve_player_strike(0, &mv, 0), 1);
        assert_eq!(resolve_enemy_strike(4, 9), 1);
        assert_eq!(resolve_enemy_strike(4, 4), 1);
    }

    #[test]
    fn enemy_strike_ignores_move_damage() {
        assert_eq!(resolve_enemy_strike(12, 3), 9);
    }

    #[test]
    fn apply_damage_clamps_at_zero() {
        assert_eq!(apply_damage(5, 9), 0);
        assert_eq!(apply_damage(30, 23), 7);
    }
}
