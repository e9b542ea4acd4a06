pub mod archetype;
pub mod state;

pub use archetype::Archetype;
pub use state::{ActionResolution, DamageReport, Entity, Stats};
