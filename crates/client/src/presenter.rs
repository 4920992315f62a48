//! Renders runtime events as battle log lines.

use gacha_core::{BattleEvent, BattleOutcome, BattlePhase, BattleSession, UnitRef};
use gacha_runtime::{Event, RosterEvent};

/// Unit names captured from the session before the battle starts.
pub struct Presenter {
    players: Vec<String>,
    enemy: String,
}

impl Presenter {
    pub fn new(session: &BattleSession) -> Self {
        Self {
            players: session.players().iter().map(|unit| unit.name().to_string()).collect(),
            enemy: session.enemy().name().to_string(),
        }
    }

    fn name(&self, unit: UnitRef) -> &str {
        match unit {
            UnitRef::Player(index) => self.players.get(index).map_or("?", String::as_str),
            UnitRef::Enemy => &self.enemy,
        }
    }

    /// One line per event worth showing; phase bookkeeping is skipped.
    pub fn describe(&self, event: &Event) -> Option<String> {
        match event {
            Event::Battle(event) => self.describe_battle(event),
            Event::Roster(RosterEvent::GoldChanged { gold }) => Some(format!("Gold: {gold}")),
            Event::Roster(RosterEvent::Saved { .. }) => Some("Progress saved.".to_string()),
            Event::Roster(RosterEvent::SaveFailed { error }) => {
                Some(format!("Could not save progress: {error}"))
            }
            Event::Notice(notice) => Some(format!(">> {}", notice.message)),
        }
    }

    fn describe_battle(&self, event: &BattleEvent) -> Option<String> {
        let line = match event {
            BattleEvent::PhaseChanged {
                to: BattlePhase::PlayerTurn,
                ..
            } => "-- Your turn --".to_string(),
            BattleEvent::PhaseChanged {
                to: BattlePhase::EnemyTurn,
                ..
            } => format!("-- {}'s turn --", self.enemy),
            BattleEvent::PhaseChanged { .. } => return None,
            BattleEvent::MoveUsed { unit, move_name } => {
                format!("{} uses {move_name}!", self.name(*unit))
            }
            BattleEvent::DamageApplied {
                target,
                amount,
                remaining_hp,
                ..
            } => format!("{} takes {amount} damage ({remaining_hp} HP left)", self.name(*target)),
            BattleEvent::ActiveSwapped { .. } => return None,
            BattleEvent::UnitDefeated { unit } => format!("{} is defeated!", self.name(*unit)),
            BattleEvent::RewardGranted { reward } => format!("You earned {} gold!", reward.gold),
            BattleEvent::BattleEnded {
                outcome: BattleOutcome::Victory,
            } => "Victory!".to_string(),
            BattleEvent::BattleEnded {
                outcome: BattleOutcome::Defeat,
            } => "Defeat...".to_string(),
            BattleEvent::Notice { message } => format!(">> {message}"),
        };
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::{BaseStats, BattleConfig, CombatUnit, Move, Side};
    use gacha_runtime::NoticeEvent;

    fn presenter() -> Presenter {
        let unit = |name: &str, side| {
            CombatUnit::new(name, side, BaseStats::new(10, 1, 1), vec![Move::new("Tap", 1, "")])
        };
        let session = BattleSession::new(
            [unit("Pyro", Side::Player)],
            unit("Elepha", Side::Enemy),
            &BattleConfig::default(),
            0,
        );
        Presenter::new(&session)
    }

    #[test]
    fn strikes_name_both_sides() {
        let presenter = presenter();
        let line = presenter.describe(&Event::Battle(BattleEvent::DamageApplied {
            attacker: UnitRef::Enemy,
            target: UnitRef::Player(0),
            amount: 9,
            remaining_hp: 1,
        }));
        assert_eq!(line.as_deref(), Some("Pyro takes 9 damage (1 HP left)"));

        let line = presenter.describe(&Event::Battle(BattleEvent::MoveUsed {
            unit: UnitRef::Enemy,
            move_name: "Stomp".to_string(),
        }));
        assert_eq!(line.as_deref(), Some("Elepha uses Stomp!"));
    }

    #[test]
    fn animation_phase_is_not_printed() {
        let presenter = presenter();
        let event = Event::Battle(BattleEvent::PhaseChanged {
            from: BattlePhase::PlayerTurn,
            to: BattlePhase::Animating,
        });
        assert_eq!(presenter.describe(&event), None);
    }

    #[test]
    fn notices_are_prefixed() {
        let presenter = presenter();
        let event = Event::Notice(NoticeEvent {
            message: "Character is defeated!".to_string(),
        });
        assert_eq!(presenter.describe(&event).as_deref(), Some(">> Character is defeated!"));
    }
}
