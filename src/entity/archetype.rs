//! Combatant archetypes and their construction-time loadouts

use crate::actions::ActionFactory;
use crate::core::config::{ArchetypeConfig, CombatConfig};
use crate::entity::state::{Entity, Stats};
use serde::{Deserialize, Serialize};

/// Kind of combatant, determining starting stats and action loadout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Player-controlled; strikes, casts bolts, blocks
    Hero,
    /// Map adversary; strikes and blocks
    Goblin,
}

impl Archetype {
    pub fn config<'a>(&self, config: &'a CombatConfig) -> &'a ArchetypeConfig {
        match self {
            Archetype::Hero => &config.hero,
            Archetype::Goblin => &config.goblin,
        }
    }

    /// Build a fresh entity with its configured name
    pub fn spawn(&self, config: &CombatConfig) -> Entity {
        let name = self.config(config).name.clone();
        self.spawn_named(name, config)
    }

    /// Build a fresh entity; the action list is fixed from here on
    pub fn spawn_named(&self, name: impl Into<String>, config: &CombatConfig) -> Entity {
        let template = self.config(config);
        let factory = ActionFactory::new(config.actions.clone());

        let mut entity = Entity::with_limits(
            name,
            Stats {
                health: template.health,
                energy: template.energy,
                mana: template.mana,
                armor: template.armor,
            },
            &config.limits,
        );
        for action in factory.create_all(&template.actions) {
            entity.add_action(action);
        }

        tracing::debug!(
            archetype = ?self,
            name = entity.name(),
            actions = entity.actions().len(),
            "spawned combatant"
        );
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ActionId};

    #[test]
    fn test_hero_defaults() {
        let hero = Archetype::Hero.spawn(&CombatConfig::default());
        assert_eq!(hero.name(), "Hero");
        assert_eq!(hero.health(), 100);
        assert_eq!(hero.energy(), 50);
        assert_eq!(hero.mana(), 40);
        assert_eq!(hero.armor(), 5);
        let ids: Vec<ActionId> = hero.actions().iter().map(Action::id).collect();
        assert_eq!(ids, vec![ActionId::Attack, ActionId::Fireball, ActionId::Block]);
    }

    #[test]
    fn test_goblin_defaults() {
        let goblin = Archetype::Goblin.spawn(&CombatConfig::default());
        assert_eq!(goblin.health(), 80);
        assert_eq!(goblin.mana(), 0);
        assert_eq!(goblin.armor(), 7);
        let ids: Vec<ActionId> = goblin.actions().iter().map(Action::id).collect();
        assert_eq!(ids, vec![ActionId::Attack, ActionId::Block]);
    }

    #[test]
    fn test_spawn_named_overrides_display_name() {
        let goblin = Archetype::Goblin.spawn_named("Snaga", &CombatConfig::default());
        assert_eq!(goblin.name(), "Snaga");
    }

    #[test]
    fn test_configured_damage_reaches_loadout() {
        let mut config = CombatConfig::default();
        config.actions.melee_damage = 30;
        let hero = Archetype::Hero.spawn(&config);
        assert_eq!(hero.actions()[0], Action::MeleeStrike { damage: 30 });
    }
}
