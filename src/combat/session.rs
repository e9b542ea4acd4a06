//! Combat session: alternates turns until one participant is defeated
//!
//! Vitality is checked after every single action, not per round, so a
//! session can never end in a draw.

use crate::combat::events::{CombatEvent, CombatEventType, CombatReport};
use crate::combat::selector::ActionSelector;
use crate::combat::state::{CombatOutcome, Side, TurnState};
use crate::core::error::Result;
use crate::entity::{ActionResolution, Entity};

pub struct CombatSession<'a> {
    controlled: &'a mut Entity,
    opponent: &'a mut Entity,
    state: TurnState,
    turn: u32,
    events: Vec<CombatEvent>,
}

impl<'a> CombatSession<'a> {
    pub fn new(controlled: &'a mut Entity, opponent: &'a mut Entity) -> Self {
        let mut session = Self {
            controlled,
            opponent,
            state: TurnState::default(),
            turn: 0,
            events: Vec::new(),
        };
        let started = CombatEventType::Started {
            controlled: session.controlled.name().to_string(),
            opponent: session.opponent.name().to_string(),
        };
        let mut silent = |_: &CombatEvent| {};
        session.log(started, &mut silent);

        // Someone may already be down when the encounter starts
        if !session.controlled.is_alive() {
            session.finish(CombatOutcome::ControlledLost, &mut silent);
        } else if !session.opponent.is_alive() {
            session.finish(CombatOutcome::ControlledWon, &mut silent);
        }
        session
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Actions resolved so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn controlled(&self) -> &Entity {
        &*self.controlled
    }

    pub fn opponent(&self) -> &Entity {
        &*self.opponent
    }

    /// Resolve exactly one action for the side whose turn it is
    pub fn step(
        &mut self,
        controlled_selector: &mut dyn ActionSelector,
        opponent_selector: &mut dyn ActionSelector,
    ) -> Result<TurnState> {
        self.step_observed(controlled_selector, opponent_selector, &mut |_: &CombatEvent| {})
    }

    /// Like `step`, reporting each event to `observer` as it is logged.
    ///
    /// The turn header is reported before the selector is asked, so an
    /// interactive prompt appears under it.
    pub fn step_observed<F>(
        &mut self,
        controlled_selector: &mut dyn ActionSelector,
        opponent_selector: &mut dyn ActionSelector,
        observer: &mut F,
    ) -> Result<TurnState>
    where
        F: FnMut(&CombatEvent),
    {
        let side = match self.state {
            TurnState::Finished(_) => return Ok(self.state),
            TurnState::Awaiting(side) => side,
        };
        let selector: &mut dyn ActionSelector = match side {
            Side::Controlled => controlled_selector,
            Side::Opponent => opponent_selector,
        };

        let (actor_name, target_name) = {
            let (actor, target) = self.participants_mut(side);
            (actor.name().to_string(), target.name().to_string())
        };
        self.log(
            CombatEventType::TurnStarted {
                side,
                actor: actor_name.clone(),
            },
            observer,
        );

        let (actor, target) = self.participants_mut(side);
        let choice = selector.choose(actor, target)?;
        let resolution = match choice {
            Some(index) => actor.perform_action(index, target),
            None => ActionResolution::NoSelection,
        };
        let target_down = !target.is_alive();

        self.turn += 1;
        self.log(
            CombatEventType::ActionResolved {
                side,
                actor: actor_name,
                target: target_name,
                resolution,
            },
            observer,
        );
        tracing::debug!(turn = self.turn, ?side, ?resolution, "action resolved");

        if target_down {
            self.finish(CombatOutcome::won_by(side), observer);
        } else {
            // A wasted selection still hands control to the other side
            self.state = TurnState::Awaiting(side.other());
        }
        Ok(self.state)
    }

    /// Step until a terminal state is reached
    pub fn run(
        self,
        controlled_selector: &mut dyn ActionSelector,
        opponent_selector: &mut dyn ActionSelector,
    ) -> Result<CombatReport> {
        self.run_observed(controlled_selector, opponent_selector, |_: &CombatEvent| {})
    }

    /// Step until a terminal state is reached, reporting every event,
    /// including those logged before the first step
    pub fn run_observed<F>(
        mut self,
        controlled_selector: &mut dyn ActionSelector,
        opponent_selector: &mut dyn ActionSelector,
        mut observer: F,
    ) -> Result<CombatReport>
    where
        F: FnMut(&CombatEvent),
    {
        for event in &self.events {
            observer(event);
        }
        loop {
            let state =
                self.step_observed(controlled_selector, opponent_selector, &mut observer)?;
            if let TurnState::Finished(outcome) = state {
                return Ok(CombatReport {
                    outcome,
                    turns: self.turn,
                    events: self.events,
                });
            }
        }
    }

    fn participants_mut(&mut self, side: Side) -> (&mut Entity, &mut Entity) {
        match side {
            Side::Controlled => (&mut *self.controlled, &mut *self.opponent),
            Side::Opponent => (&mut *self.opponent, &mut *self.controlled),
        }
    }

    fn finish<F: FnMut(&CombatEvent)>(&mut self, outcome: CombatOutcome, observer: &mut F) {
        self.state = TurnState::Finished(outcome);
        let event_type = CombatEventType::Ended {
            outcome,
            controlled: self.controlled.name().to_string(),
            opponent: self.opponent.name().to_string(),
        };
        self.log(event_type, observer);
    }

    fn log<F: FnMut(&CombatEvent)>(&mut self, event_type: CombatEventType, observer: &mut F) {
        let event = CombatEvent {
            turn: self.turn,
            event_type,
        };
        observer(&event);
        self.events.push(event);
    }
}

/// Run one encounter to completion.
///
/// This is the only entry point the map needs: it hands over both
/// combatants and gets back who won.
pub fn enter_combat(
    controlled: &mut Entity,
    opponent: &mut Entity,
    controlled_selector: &mut dyn ActionSelector,
    opponent_selector: &mut dyn ActionSelector,
) -> Result<CombatReport> {
    enter_combat_observed(
        controlled,
        opponent,
        controlled_selector,
        opponent_selector,
        |_: &CombatEvent| {},
    )
}

/// `enter_combat` with live event reporting, for transcripts
pub fn enter_combat_observed<F>(
    controlled: &mut Entity,
    opponent: &mut Entity,
    controlled_selector: &mut dyn ActionSelector,
    opponent_selector: &mut dyn ActionSelector,
    observer: F,
) -> Result<CombatReport>
where
    F: FnMut(&CombatEvent),
{
    tracing::info!(
        controlled = controlled.name(),
        opponent = opponent.name(),
        "combat started"
    );
    let report = CombatSession::new(controlled, opponent).run_observed(
        controlled_selector,
        opponent_selector,
        observer,
    )?;
    tracing::info!(outcome = ?report.outcome, turns = report.turns, "combat finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionId, ActionOutcome};
    use crate::combat::selector::ScriptedSelector;
    use crate::core::config::CombatConfig;
    use crate::entity::{Archetype, Stats};

    fn spawn() -> (Entity, Entity) {
        let config = CombatConfig::default();
        (
            Archetype::Hero.spawn(&config),
            Archetype::Goblin.spawn(&config),
        )
    }

    fn resolutions(events: &[CombatEvent]) -> Vec<(Side, ActionResolution)> {
        events
            .iter()
            .filter_map(|e| match &e.event_type {
                CombatEventType::ActionResolved {
                    side, resolution, ..
                } => Some((*side, *resolution)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_controlled_side_acts_first() {
        let (mut hero, mut goblin) = spawn();
        let mut session = CombatSession::new(&mut hero, &mut goblin);
        assert_eq!(session.state(), TurnState::Awaiting(Side::Controlled));

        let mut hero_sel = ScriptedSelector::new([0]);
        let mut goblin_sel = ScriptedSelector::default();
        let state = session.step(&mut hero_sel, &mut goblin_sel).unwrap();

        assert_eq!(state, TurnState::Awaiting(Side::Opponent));
        assert_eq!(session.opponent().health(), 72);
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn test_turns_alternate() {
        let (mut hero, mut goblin) = spawn();
        let mut session = CombatSession::new(&mut hero, &mut goblin);
        let mut hero_sel = ScriptedSelector::new([0, 0]);
        let mut goblin_sel = ScriptedSelector::new([0]);

        session.step(&mut hero_sel, &mut goblin_sel).unwrap();
        let state = session.step(&mut hero_sel, &mut goblin_sel).unwrap();

        assert_eq!(state, TurnState::Awaiting(Side::Controlled));
        // Goblin strike: 15 - 5 armor
        assert_eq!(session.controlled().health(), 90);
    }

    #[test]
    fn test_invalid_selection_consumes_turn() {
        let (mut hero, mut goblin) = spawn();
        let mut session = CombatSession::new(&mut hero, &mut goblin);
        let mut hero_sel = ScriptedSelector::new([9]);
        let mut goblin_sel = ScriptedSelector::default();

        let state = session.step(&mut hero_sel, &mut goblin_sel).unwrap();

        assert_eq!(state, TurnState::Awaiting(Side::Opponent));
        assert_eq!(session.controlled().health(), 100);
        assert_eq!(session.controlled().mana(), 40);
        assert_eq!(session.opponent().health(), 80);
        assert_eq!(
            resolutions(session.events()),
            vec![(
                Side::Controlled,
                ActionResolution::UnknownAction { index: 9 }
            )]
        );
    }

    #[test]
    fn test_no_selection_consumes_turn() {
        let (mut hero, mut goblin) = spawn();
        let mut session = CombatSession::new(&mut hero, &mut goblin);
        let mut hero_sel = ScriptedSelector::from_choices([None]);
        let mut goblin_sel = ScriptedSelector::default();

        let state = session.step(&mut hero_sel, &mut goblin_sel).unwrap();

        assert_eq!(state, TurnState::Awaiting(Side::Opponent));
        assert_eq!(
            resolutions(session.events()),
            vec![(Side::Controlled, ActionResolution::NoSelection)]
        );
    }

    #[test]
    fn test_controlled_wins_by_strikes() {
        let (mut hero, mut goblin) = spawn();
        // Goblin only blocks: every other hero strike is halved
        let report = CombatSession::new(&mut hero, &mut goblin)
            .run(&mut ScriptedSelector::repeat(0), &mut ScriptedSelector::repeat(1))
            .unwrap();

        assert_eq!(report.outcome, CombatOutcome::ControlledWon);
        assert!(!goblin.is_alive());
        assert_eq!(hero.health(), 100);
        // First strike lands for 8, then each strike after a block lands for 4
        // 80 = 8 + 4 * 18
        assert_eq!(report.turns, 19 * 2 - 1);
    }

    #[test]
    fn test_controlled_loses() {
        let config = CombatConfig::default();
        let mut hero = Entity::with_limits(
            "Frail",
            Stats {
                health: 10,
                energy: 0,
                mana: 0,
                armor: 0,
            },
            &config.limits,
        );
        hero.add_action(crate::actions::Action::DefensiveStance);
        let mut goblin = Archetype::Goblin.spawn(&config);

        let report = enter_combat(
            &mut hero,
            &mut goblin,
            &mut ScriptedSelector::repeat(5),
            &mut ScriptedSelector::repeat(0),
        )
        .unwrap();

        assert_eq!(report.outcome, CombatOutcome::ControlledLost);
        assert_eq!(report.turns, 2);
        assert_eq!(hero.health(), 0);
        assert!(goblin.is_alive());
    }

    #[test]
    fn test_stops_immediately_after_lethal_action() {
        let (mut hero, _) = spawn();
        let mut goblin_weak = Entity::new(
            "Runt",
            Stats {
                health: 1,
                energy: 0,
                mana: 0,
                armor: 0,
            },
        );
        let report = enter_combat(
            &mut hero,
            &mut goblin_weak,
            &mut ScriptedSelector::new([0]),
            &mut ScriptedSelector::default(),
        )
        .unwrap();

        assert_eq!(report.outcome, CombatOutcome::ControlledWon);
        assert_eq!(report.turns, 1);
    }

    #[test]
    fn test_dead_opponent_finishes_at_start() {
        let (mut hero, _) = spawn();
        let mut corpse = Entity::new(
            "Corpse",
            Stats {
                health: 0,
                energy: 0,
                mana: 0,
                armor: 0,
            },
        );
        let session = CombatSession::new(&mut hero, &mut corpse);
        assert_eq!(
            session.state(),
            TurnState::Finished(CombatOutcome::ControlledWon)
        );
    }

    #[test]
    fn test_step_after_finish_is_noop() {
        let (mut hero, mut goblin) = spawn();
        let mut session = CombatSession::new(&mut hero, &mut goblin);
        let mut hero_sel = ScriptedSelector::repeat(0);
        let mut goblin_sel = ScriptedSelector::repeat(1);
        while !session.state().is_finished() {
            session.step(&mut hero_sel, &mut goblin_sel).unwrap();
        }
        let turns = session.turn();
        let state = session.step(&mut hero_sel, &mut goblin_sel).unwrap();
        assert!(state.is_finished());
        assert_eq!(session.turn(), turns);
    }

    #[test]
    fn test_selector_error_aborts() {
        let (mut hero, mut goblin) = spawn();
        let result = enter_combat(
            &mut hero,
            &mut goblin,
            &mut ScriptedSelector::new([0]),
            &mut ScriptedSelector::new([0]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_log_brackets_session() {
        let (mut hero, mut goblin) = spawn();
        let report = enter_combat(
            &mut hero,
            &mut goblin,
            &mut ScriptedSelector::repeat(1),
            &mut ScriptedSelector::repeat(0),
        )
        .unwrap();

        assert!(matches!(
            report.events.first().map(|e| &e.event_type),
            Some(CombatEventType::Started { .. })
        ));
        assert!(matches!(
            report.events.last().map(|e| &e.event_type),
            Some(CombatEventType::Ended { .. })
        ));

        // Hero opens with four bolts before running dry
        let bolts = resolutions(&report.events)
            .into_iter()
            .filter(|(side, r)| {
                *side == Side::Controlled
                    && matches!(
                        r,
                        ActionResolution::Performed {
                            action: ActionId::Fireball,
                            outcome: ActionOutcome::BoltCast { .. }
                        }
                    )
            })
            .count();
        assert_eq!(bolts, 4);
    }

    #[test]
    fn test_observer_sees_every_event_in_order() {
        let (mut hero, mut goblin) = spawn();
        let mut seen = Vec::new();
        let report = enter_combat_observed(
            &mut hero,
            &mut goblin,
            &mut ScriptedSelector::repeat(0),
            &mut ScriptedSelector::repeat(0),
            |event: &CombatEvent| seen.push(event.clone()),
        )
        .unwrap();

        assert_eq!(seen, report.events);
    }
}
