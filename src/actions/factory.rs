//! Builds actions from identifiers

use crate::actions::catalog::{Action, ActionId};
use crate::core::config::ActionsConfig;

/// Maps action identifiers to configured action instances
#[derive(Debug, Clone, Default)]
pub struct ActionFactory {
    rules: ActionsConfig,
}

impl ActionFactory {
    pub fn new(rules: ActionsConfig) -> Self {
        Self { rules }
    }

    pub fn create(&self, id: ActionId) -> Action {
        match id {
            ActionId::Attack => Action::MeleeStrike {
                damage: self.rules.melee_damage,
            },
            ActionId::Fireball => Action::ElementalBolt {
                damage: self.rules.bolt_damage,
                mana_cost: self.rules.bolt_mana_cost,
            },
            ActionId::Block => Action::DefensiveStance,
        }
    }

    /// Look up by string identifier. Anything other than `"Attack"`,
    /// `"Fireball"` or `"Block"` yields `None`.
    pub fn create_by_name(&self, name: &str) -> Option<Action> {
        name.parse::<ActionId>().ok().map(|id| self.create(id))
    }

    /// Build a full loadout in the given order
    pub fn create_all(&self, ids: &[ActionId]) -> Vec<Action> {
        ids.iter().map(|&id| self.create(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let factory = ActionFactory::default();
        assert_eq!(
            factory.create(ActionId::Attack),
            Action::MeleeStrike { damage: 15 }
        );
        assert_eq!(
            factory.create(ActionId::Fireball),
            Action::ElementalBolt {
                damage: 25,
                mana_cost: 10
            }
        );
        assert_eq!(factory.create(ActionId::Block), Action::DefensiveStance);
    }

    #[test]
    fn test_create_by_name() {
        let factory = ActionFactory::default();
        assert_eq!(
            factory.create_by_name("Fireball").map(|a| a.id()),
            Some(ActionId::Fireball)
        );
        assert_eq!(factory.create_by_name("Heal"), None);
        assert_eq!(factory.create_by_name(""), None);
    }

    #[test]
    fn test_configured_rules_flow_through() {
        let factory = ActionFactory::new(ActionsConfig {
            melee_damage: 3,
            bolt_damage: 40,
            bolt_mana_cost: 20,
        });
        assert_eq!(
            factory.create(ActionId::Fireball),
            Action::ElementalBolt {
                damage: 40,
                mana_cost: 20
            }
        );
    }

    #[test]
    fn test_create_all_preserves_order_and_duplicates() {
        let factory = ActionFactory::default();
        let actions = factory.create_all(&[ActionId::Block, ActionId::Attack, ActionId::Block]);
        let ids: Vec<ActionId> = actions.iter().map(Action::id).collect();
        assert_eq!(ids, vec![ActionId::Block, ActionId::Attack, ActionId::Block]);
    }
}
