//! Turn-loop state machine types
//!
//! A session alternates `Awaiting(Controlled)` and `Awaiting(Opponent)`
//! until one side's target reaches zero health.

use serde::{Deserialize, Serialize};

/// Which participant is acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The player-driven combatant; always acts first
    Controlled,
    /// The adversary, driven by a policy
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Controlled => Side::Opponent,
            Side::Opponent => Side::Controlled,
        }
    }
}

/// Final result of a session, relative to the controlled side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    ControlledWon,
    ControlledLost,
}

impl CombatOutcome {
    pub fn winner(&self) -> Side {
        match self {
            CombatOutcome::ControlledWon => Side::Controlled,
            CombatOutcome::ControlledLost => Side::Opponent,
        }
    }

    /// Outcome when `side` defeats the other participant
    pub fn won_by(side: Side) -> Self {
        match side {
            Side::Controlled => CombatOutcome::ControlledWon,
            Side::Opponent => CombatOutcome::ControlledLost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Awaiting(Side),
    Finished(CombatOutcome),
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::Awaiting(Side::Controlled)
    }
}

impl TurnState {
    pub fn is_finished(&self) -> bool {
        matches!(self, TurnState::Finished(_))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self {
            TurnState::Finished(outcome) => Some(*outcome),
            TurnState::Awaiting(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controlled_acts_first() {
        assert_eq!(TurnState::default(), TurnState::Awaiting(Side::Controlled));
    }

    #[test]
    fn test_sides_alternate() {
        assert_eq!(Side::Controlled.other(), Side::Opponent);
        assert_eq!(Side::Opponent.other(), Side::Controlled);
    }

    #[test]
    fn test_outcome_winner_round_trip() {
        for side in [Side::Controlled, Side::Opponent] {
            assert_eq!(CombatOutcome::won_by(side).winner(), side);
        }
    }

    #[test]
    fn test_only_finished_has_outcome() {
        assert_eq!(TurnState::Awaiting(Side::Opponent).outcome(), None);
        assert_eq!(
            TurnState::Finished(CombatOutcome::ControlledLost).outcome(),
            Some(CombatOutcome::ControlledLost)
        );
    }
}
