//! Skirmish - turn-based dungeon combat
//!
//! The combat engine (entities, actions, and the turn loop) is headless;
//! `narration` renders its results and `world` is the map that triggers
//! encounters.

pub mod actions;
pub mod combat;
pub mod core;
pub mod entity;
pub mod narration;
pub mod world;
