//! Combatant state: resource pools, armor, and the one-shot guard flag

use crate::actions::{Action, ActionId, ActionOutcome};
use crate::core::config::LimitsConfig;
use serde::{Deserialize, Serialize};

/// Starting pool values for a new entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: i32,
    pub energy: i32,
    pub mana: i32,
    pub armor: i32,
}

/// Result of one incoming damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage before armor
    pub raw: i32,
    /// Health actually removed (after armor and guard)
    pub effective: i32,
    /// The defending flag was up and halved this hit
    pub blocked: bool,
    pub health_after: i32,
}

/// Result of asking an entity to perform one of its actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionResolution {
    Performed {
        action: ActionId,
        outcome: ActionOutcome,
    },
    /// Index outside the action list; nothing changed
    UnknownAction { index: usize },
    /// The decision source produced no usable index; nothing changed
    NoSelection,
}

impl ActionResolution {
    pub fn was_performed(&self) -> bool {
        matches!(self, ActionResolution::Performed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    health: i32,
    /// Reserved pool; no action spends it yet
    energy: i32,
    mana: i32,
    armor: i32,
    defending: bool,
    max_health: i32,
    max_mana: i32,
    actions: Vec<Action>,
}

impl Entity {
    /// Create with the default pool caps and no actions
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self::with_limits(name, stats, &LimitsConfig::default())
    }

    pub fn with_limits(name: impl Into<String>, stats: Stats, limits: &LimitsConfig) -> Self {
        Self {
            name: name.into(),
            health: stats.health.clamp(0, limits.max_health),
            energy: stats.energy.max(0),
            mana: stats.mana.clamp(0, limits.max_mana),
            armor: stats.armor.max(0),
            defending: false,
            max_health: limits.max_health,
            max_mana: limits.max_mana,
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Execute the action at zero-based `index` against `target`
    pub fn perform_action(&mut self, index: usize, target: &mut Entity) -> ActionResolution {
        let Some(&action) = self.actions.get(index) else {
            tracing::debug!(actor = %self.name, index, "no such action");
            return ActionResolution::UnknownAction { index };
        };

        let outcome = action.execute(self, target);
        ActionResolution::Performed {
            action: action.id(),
            outcome,
        }
    }

    /// Apply armor, then the guard halving, then subtract from health
    pub fn take_damage(&mut self, amount: i32) -> DamageReport {
        let mut effective = amount.saturating_sub(self.armor).max(0);
        let blocked = self.defending;
        if blocked {
            effective /= 2;
        }
        // Consumed by any damage event, even a zero-damage one
        self.defending = false;

        self.health = self.health.saturating_sub(effective).max(0);

        tracing::debug!(
            target_name = %self.name,
            raw = amount,
            effective,
            blocked,
            health = self.health,
            "damage taken"
        );

        DamageReport {
            raw: amount,
            effective,
            blocked,
            health_after: self.health,
        }
    }

    /// Returns the new health
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        tracing::debug!(name = %self.name, health = self.health, "healed");
        self.health
    }

    /// Returns the new mana
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        self.mana = self.mana.saturating_add(amount.max(0)).min(self.max_mana);
        tracing::debug!(name = %self.name, mana = self.mana, "mana restored");
        self.mana
    }

    pub fn spend_mana(&mut self, amount: i32) {
        self.mana = self.mana.saturating_sub(amount.max(0)).max(0);
        tracing::debug!(name = %self.name, mana = self.mana, "mana spent");
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.defending = defending;
    }

    pub fn has_mana(&self, amount: i32) -> bool {
        self.mana >= amount
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
