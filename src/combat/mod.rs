pub mod events;
pub mod selector;
pub mod session;
pub mod state;

pub use events::{CombatEvent, CombatEventType, CombatReport};
pub use selector::{ActionSelector, PromptSelector, RandomPolicy, ScriptedSelector};
pub use session::{enter_combat, enter_combat_observed, CombatSession};
pub use state::{CombatOutcome, Side, TurnState};
