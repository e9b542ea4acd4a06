//! Action definitions and catalog

use crate::core::error::SkirmishError;
use crate::entity::{DamageReport, Entity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique action identifier
///
/// Serialized by variant name, so config files spell these exactly as
/// `"Attack"`, `"Fireball"` and `"Block"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    Attack,
    Fireball,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Offense,
    Spell,
    Defense,
}

impl ActionCategory {
    /// Short tag shown next to menu entries
    pub fn label(&self) -> &'static str {
        match self {
            ActionCategory::Offense => "offense",
            ActionCategory::Spell => "spell",
            ActionCategory::Defense => "defense",
        }
    }
}

impl ActionId {
    pub const ALL: [ActionId; 3] = [ActionId::Attack, ActionId::Fireball, ActionId::Block];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::Attack => "Attack",
            ActionId::Fireball => "Fireball",
            ActionId::Block => "Block",
        }
    }

    pub fn category(&self) -> ActionCategory {
        match self {
            ActionId::Attack => ActionCategory::Offense,
            ActionId::Fireball => ActionCategory::Spell,
            ActionId::Block => ActionCategory::Defense,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = SkirmishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SkirmishError::UnknownAction(s.to_string()))
    }
}

/// One selectable combat behavior.
///
/// Variants carry only their rule constants, never per-use state, so a
/// single instance can be copied freely between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Target takes `damage` raw damage
    MeleeStrike { damage: i32 },
    /// Costs `mana_cost` mana; target takes `damage` raw damage
    ElementalBolt { damage: i32, mana_cost: i32 },
    /// Actor braces, halving the next damage it receives
    DefensiveStance,
}

/// What an action did when executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Struck {
        damage: DamageReport,
    },
    BoltCast {
        mana_spent: i32,
        damage: DamageReport,
    },
    /// Precondition failed: nothing was spent and nothing was hit
    InsufficientMana {
        available: i32,
        required: i32,
    },
    Braced,
}

impl Action {
    pub fn id(&self) -> ActionId {
        match self {
            Action::MeleeStrike { .. } => ActionId::Attack,
            Action::ElementalBolt { .. } => ActionId::Fireball,
            Action::DefensiveStance => ActionId::Block,
        }
    }

    /// Stable display name
    pub fn name(&self) -> &'static str {
        self.id().as_str()
    }

    /// Apply this action's rule from `actor` against `target`
    pub fn execute(&self, actor: &mut Entity, target: &mut Entity) -> ActionOutcome {
        match *self {
            Action::MeleeStrike { damage } => ActionOutcome::Struck {
                damage: target.take_damage(damage),
            },
            Action::ElementalBolt { damage, mana_cost } => {
                if !actor.has_mana(mana_cost) {
                    tracing::debug!(
                        actor = actor.name(),
                        mana = actor.mana(),
                        required = mana_cost,
                        "elemental bolt fizzled"
                    );
                    return ActionOutcome::InsufficientMana {
                        available: actor.mana(),
                        required: mana_cost,
                    };
                }
                actor.spend_mana(mana_cost);
                ActionOutcome::BoltCast {
                    mana_spent: mana_cost,
                    damage: target.take_damage(damage),
                }
            }
            Action::DefensiveStance => {
                actor.set_defending(true);
                ActionOutcome::Braced
            }
        }
    }
}
