//! Combat configuration with documented constants
//!
//! Every rule number the engine uses lives here. Values load from TOML;
//! any table left out of the file falls back to the reference defaults.

use crate::actions::catalog::ActionId;
use crate::core::error::{Result, SkirmishError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Upper bounds on entity resource pools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Healing never raises health above this
    pub max_health: i32,
    /// Mana restoration never raises mana above this
    pub max_mana: i32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_mana: 40,
        }
    }
}

/// Rule constants for the built-in actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    /// Raw damage of a melee strike (before armor)
    pub melee_damage: i32,
    /// Raw damage of an elemental bolt (before armor)
    pub bolt_damage: i32,
    /// Mana required and spent by an elemental bolt
    pub bolt_mana_cost: i32,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            melee_damage: 15,
            bolt_damage: 25,
            bolt_mana_cost: 10,
        }
    }
}

/// Opponent decision policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// The random policy only picks among the first N registered actions.
    ///
    /// The reference goblin rolls between its first two actions. Set this
    /// higher than any loadout length to choose from the full list.
    pub opponent_choice_limit: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            opponent_choice_limit: 2,
        }
    }
}

/// Map pickup amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub heal_amount: i32,
    pub mana_amount: i32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            heal_amount: 20,
            mana_amount: 20,
        }
    }
}

/// Starting stats and loadout for one kind of combatant
///
/// When overridden from TOML the whole table must be given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    pub health: i32,
    /// Reserved pool, no action consumes it yet
    pub energy: i32,
    pub mana: i32,
    pub armor: i32,
    /// Action identifiers in selection order
    pub actions: Vec<ActionId>,
}

impl ArchetypeConfig {
    pub fn hero() -> Self {
        Self {
            name: "Hero".to_string(),
            health: 100,
            energy: 50,
            mana: 40,
            armor: 5,
            actions: vec![ActionId::Attack, ActionId::Fireball, ActionId::Block],
        }
    }

    pub fn goblin() -> Self {
        Self {
            name: "Goblin".to_string(),
            health: 80,
            energy: 40,
            mana: 0,
            armor: 7,
            actions: vec![ActionId::Attack, ActionId::Block],
        }
    }

    fn validate(&self, table: &str, limits: &LimitsConfig) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid(format!("[{}] name must not be empty", table)));
        }
        if self.health <= 0 || self.health > limits.max_health {
            return Err(invalid(format!(
                "[{}] health ({}) must be in 1..={}",
                table, self.health, limits.max_health
            )));
        }
        if self.mana < 0 || self.mana > limits.max_mana {
            return Err(invalid(format!(
                "[{}] mana ({}) must be in 0..={}",
                table, self.mana, limits.max_mana
            )));
        }
        if self.energy < 0 || self.armor < 0 {
            return Err(invalid(format!(
                "[{}] energy and armor must be non-negative",
                table
            )));
        }
        if self.actions.is_empty() {
            return Err(invalid(format!("[{}] needs at least one action", table)));
        }
        Ok(())
    }
}

/// Complete combat configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub actions: ActionsConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub pickups: PickupConfig,
    #[serde(default = "ArchetypeConfig::hero")]
    pub hero: ArchetypeConfig,
    #[serde(default = "ArchetypeConfig::goblin")]
    pub goblin: ArchetypeConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            actions: ActionsConfig::default(),
            policy: PolicyConfig::default(),
            pickups: PickupConfig::default(),
            hero: ArchetypeConfig::hero(),
            goblin: ArchetypeConfig::goblin(),
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded combat config");
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_health <= 0 || self.limits.max_mana < 0 {
            return Err(invalid(format!(
                "limits must be positive (max_health {}, max_mana {})",
                self.limits.max_health, self.limits.max_mana
            )));
        }

        let a = &self.actions;
        if a.melee_damage < 0 || a.bolt_damage < 0 || a.bolt_mana_cost < 0 {
            return Err(invalid("action damage and costs must be non-negative"));
        }

        if self.policy.opponent_choice_limit == 0 {
            return Err(invalid("opponent_choice_limit must be at least 1"));
        }

        if self.pickups.heal_amount < 0 || self.pickups.mana_amount < 0 {
            return Err(invalid("pickup amounts must be non-negative"));
        }

        self.hero.validate("hero", &self.limits)?;
        self.goblin.validate("goblin", &self.limits)?;
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SkirmishError {
    let message = message.into();
    tracing::warn!(%message, "rejected combat config");
    SkirmishError::InvalidConfig(message)
}
