//! The dungeon map the player walks around

pub mod map;

pub use map::{Direction, GameMap, MoveOutcome, Position, Tile, TileEvent, MAP_HEIGHT, MAP_WIDTH};
