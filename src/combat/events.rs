//! Combat log entries
//!
//! The session records what happened instead of printing it; the
//! `narration` module turns these into transcript lines.

use crate::combat::state::{CombatOutcome, Side};
use crate::entity::ActionResolution;
use serde::{Deserialize, Serialize};

/// Log entry for one thing that happened in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Number of actions resolved before this event
    pub turn: u32,
    pub event_type: CombatEventType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEventType {
    Started {
        controlled: String,
        opponent: String,
    },
    TurnStarted {
        side: Side,
        actor: String,
    },
    ActionResolved {
        side: Side,
        actor: String,
        target: String,
        resolution: ActionResolution,
    },
    Ended {
        outcome: CombatOutcome,
        controlled: String,
        opponent: String,
    },
}

/// Everything a caller learns from one finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    /// Actions resolved, counting wasted selections
    pub turns: u32,
    pub events: Vec<CombatEvent>,
}

impl CombatReport {
    pub fn controlled_won(&self) -> bool {
        self.outcome == CombatOutcome::ControlledWon
    }
}
