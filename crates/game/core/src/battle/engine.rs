//! Turn resolution for a single battle session.
//!
//! The [`BattleEngine`] is the only writer of a [`BattleSession`]. Player input
//! (`submit_move`, `swap`) is accepted only in `PlayerTurn` with no strike
//! playing out; everything after a strike is a [`Continuation`] that the host
//! fires with `advance`, `tick` or `run_pending`. Because the engine keeps at
//! most one continuation pending and input is refused while one is, a battle
//! can never have two strikes in flight.

use core::time::Duration;

use crate::combat::{UnitRef, resolve_enemy_strike, resolve_player_strike};
use crate::env::{BattleEnv, compute_seed, context};
use crate::reward::GoldLedger;

use super::{
    BattleError, BattleEvent, BattleOutcome, BattlePhase, BattleSession, Continuation, Scheduled,
    SwapReason, SwapRejection,
};

pub type BattleResult = Result<Vec<BattleEvent>, BattleError>;

/// Battle state machine over a borrowed session.
pub struct BattleEngine<'a> {
    session: &'a mut BattleSession,
    ledger: &'a mut dyn GoldLedger,
    env: BattleEnv<'a>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(
        session: &'a mut BattleSession,
        ledger: &'a mut dyn GoldLedger,
        env: BattleEnv<'a>,
    ) -> Self {
        Self {
            session,
            ledger,
            env,
        }
    }

    pub fn session(&self) -> &BattleSession {
        self.session
    }

    /// Opens the first player turn.
    pub fn start(&mut self) -> BattleResult {
        match self.session.phase {
            BattlePhase::Idle => {
                let mut events = Vec::new();
                tracing::info!(
                    team = self.session.players.len(),
                    enemy = self.session.enemy.name(),
                    "battle started"
                );
                self.set_phase(BattlePhase::PlayerTurn, &mut events);
                Ok(events)
            }
            BattlePhase::NoTeam => Err(BattleError::MissingTeamData),
            BattlePhase::BattleEnd(_) => Err(BattleError::BattleFinished),
            phase => Err(BattleError::InvalidAction { phase }),
        }
    }

    /// The active unit strikes the enemy with move `move_index`.
    ///
    /// Damage lands immediately; the rest of the turn is scheduled.
    pub fn submit_move(&mut self, move_index: usize) -> BattleResult {
        self.ensure_player_input()?;

        let active = self.session.active;
        let attacker = &self.session.players[active];
        let Some(mv) = attacker.moves().get(move_index) else {
            return Err(BattleError::UnknownMove {
                index: move_index,
                available: attacker.moves().len(),
            });
        };
        let damage = resolve_player_strike(attacker.attack(), mv, self.session.enemy.defense());
        let move_name = mv.name.clone();

        let mut events = Vec::new();
        self.session.is_animating = true;
        self.set_phase(BattlePhase::Animating, &mut events);

        events.push(BattleEvent::MoveUsed {
            unit: UnitRef::Player(active),
            move_name,
        });
        let remaining_hp = self.session.enemy.take_damage(damage);
        tracing::debug!(attacker = active, damage, remaining_hp, "player strike");
        events.push(BattleEvent::DamageApplied {
            attacker: UnitRef::Player(active),
            target: UnitRef::Enemy,
            amount: damage,
            remaining_hp,
        });
        if remaining_hp == 0 {
            events.push(BattleEvent::UnitDefeated {
                unit: UnitRef::Enemy,
            });
        }

        self.session.nonce += 1;
        self.schedule(Continuation::PlayerStrikeSettled, self.session.strike_delay);
        Ok(events)
    }

    /// Makes `target` the active unit. Does not use up the turn.
    pub fn swap(&mut self, target: usize) -> BattleResult {
        self.ensure_player_input()?;

        let len = self.session.players.len();
        let Some(unit) = self.session.players.get(target) else {
            return Err(SwapRejection::OutOfRange { index: target, len }.into());
        };
        if target == self.session.active {
            return Ok(Vec::new());
        }
        if unit.is_defeated() {
            return Err(SwapRejection::Defeated { index: target }.into());
        }

        let message = format!("Switched to {}!", unit.name());
        let from = self.session.active;
        self.session.active = target;
        tracing::debug!(from, to = target, "voluntary swap");
        Ok(vec![
            BattleEvent::ActiveSwapped {
                from,
                to: target,
                reason: SwapReason::Voluntary,
            },
            BattleEvent::notice(message),
        ])
    }

    /// Fires the pending continuation now, ignoring its remaining delay.
    pub fn advance(&mut self) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if let Some(scheduled) = self.session.pending.take() {
            self.fire(scheduled.continuation, &mut events);
        }
        events
    }

    /// Lets `elapsed` pass, firing every continuation that comes due.
    ///
    /// Time left over after one continuation fires counts towards the next.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        let mut budget = elapsed;
        while let Some(scheduled) = self.session.pending.as_mut() {
            if scheduled.remaining > budget {
                scheduled.remaining -= budget;
                break;
            }
            budget -= scheduled.remaining;
            let continuation = scheduled.continuation;
            self.session.pending = None;
            self.fire(continuation, &mut events);
        }
        events
    }

    /// Fires continuations until the engine is waiting on the player or done.
    pub fn run_pending(&mut self) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        while let Some(scheduled) = self.session.pending.take() {
            self.fire(scheduled.continuation, &mut events);
        }
        events
    }

    // ===== internals =====

    fn ensure_player_input(&self) -> Result<(), BattleError> {
        match self.session.phase {
            BattlePhase::PlayerTurn if !self.session.is_animating => Ok(()),
            BattlePhase::NoTeam => Err(BattleError::MissingTeamData),
            BattlePhase::BattleEnd(_) => Err(BattleError::BattleFinished),
            phase => Err(BattleError::InvalidAction { phase }),
        }
    }

    fn set_phase(&mut self, to: BattlePhase, events: &mut Vec<BattleEvent>) {
        let from = self.session.phase;
        if from == to {
            return;
        }
        tracing::debug!(%from, %to, "phase changed");
        self.session.phase = to;
        events.push(BattleEvent::PhaseChanged { from, to });
    }

    fn schedule(&mut self, continuation: Continuation, delay: Duration) {
        self.session.pending = Some(Scheduled {
            continuation,
            remaining: delay,
        });
    }

    fn fire(&mut self, continuation: Continuation, events: &mut Vec<BattleEvent>) {
        if self.session.phase.is_terminal() {
            return;
        }
        tracing::trace!(continuation = continuation.as_str(), "firing continuation");
        match continuation {
            Continuation::PlayerStrikeSettled => self.player_strike_settled(events),
            Continuation::EnemyAttack => self.enemy_attack(events),
            Continuation::EnemyStrikeSettled => self.enemy_strike_settled(events),
        }
    }

    fn player_strike_settled(&mut self, events: &mut Vec<BattleEvent>) {
        self.session.is_animating = false;
        if self.check_termination(events) {
            return;
        }
        self.set_phase(BattlePhase::EnemyTurn, events);
        self.schedule(Continuation::EnemyAttack, self.session.enemy_turn_delay);
    }

    fn enemy_attack(&mut self, events: &mut Vec<BattleEvent>) {
        self.session.is_animating = true;
        self.set_phase(BattlePhase::Animating, events);

        let seed = compute_seed(self.session.seed, self.session.nonce, context::ENEMY_MOVE);
        let enemy = &self.session.enemy;
        let last = enemy.moves().len().saturating_sub(1);
        let choice = self
            .env
            .policy()
            .choose_move(enemy, self.env.rng(), seed)
            .min(last);
        let move_name = enemy
            .moves()
            .get(choice)
            .map(|mv| mv.name.clone())
            .unwrap_or_default();

        let active = self.session.active;
        let damage = resolve_enemy_strike(enemy.attack(), self.session.players[active].defense());
        events.push(BattleEvent::MoveUsed {
            unit: UnitRef::Enemy,
            move_name,
        });
        let remaining_hp = self.session.players[active].take_damage(damage);
        tracing::debug!(target = active, damage, remaining_hp, "enemy strike");
        events.push(BattleEvent::DamageApplied {
            attacker: UnitRef::Enemy,
            target: UnitRef::Player(active),
            amount: damage,
            remaining_hp,
        });
        if remaining_hp == 0 {
            events.push(BattleEvent::UnitDefeated {
                unit: UnitRef::Player(active),
            });
        }

        self.session.nonce += 1;
        self.schedule(Continuation::EnemyStrikeSettled, self.session.strike_delay);
    }

    fn enemy_strike_settled(&mut self, events: &mut Vec<BattleEvent>) {
        self.session.is_animating = false;

        let active = self.session.active;
        if self.session.players[active].is_defeated()
            && let Some(next) = self.session.next_living_after_active()
        {
            self.session.active = next;
            tracing::debug!(from = active, to = next, "forced swap");
            events.push(BattleEvent::ActiveSwapped {
                from: active,
                to: next,
                reason: SwapReason::Forced,
            });
            events.push(BattleEvent::notice(format!(
                "{} enters the battle!",
                self.session.players[next].name()
            )));
        }

        if self.check_termination(events) {
            return;
        }
        self.session.turns += 1;
        self.set_phase(BattlePhase::PlayerTurn, events);
    }

    /// Ends the battle if either side is wiped out. Defeat is checked first.
    fn check_termination(&mut self, events: &mut Vec<BattleEvent>) -> bool {
        let outcome = if self.session.all_players_defeated() {
            BattleOutcome::Defeat
        } else if self.session.enemy.is_defeated() {
            BattleOutcome::Victory
        } else {
            return false;
        };

        self.session.pending = None;
        self.session.is_animating = false;
        self.set_phase(BattlePhase::BattleEnd(outcome), events);

        if self.session.reward.is_none()
            && let Some(reward) = self.env.reward().resolve(outcome)
        {
            self.ledger.grant_gold(reward.gold);
            self.session.reward = Some(reward);
            events.push(BattleEvent::RewardGranted { reward });
        }

        tracing::info!(
            outcome = outcome.as_str(),
            turns = self.session.turns,
            "battle ended"
        );
        events.push(BattleEvent::BattleEnded { outcome });
        true
    }
}
