pub mod catalog;
pub mod factory;

pub use catalog::{Action, ActionCategory, ActionId, ActionOutcome};
pub use factory::ActionFactory;
