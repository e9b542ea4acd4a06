//! Dungeon tile map: walking, pickups, and triggering encounters
//!
//! The map owns one adversary entity per adversary tile. Stepping onto
//! such a tile starts a combat session; the map only reads its outcome.

use crate::combat::{enter_combat_observed, ActionSelector, CombatEvent, CombatOutcome};
use crate::core::config::{CombatConfig, PickupConfig};
use crate::core::error::Result;
use crate::entity::{Archetype, Entity};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAP_WIDTH: usize = 15;
pub const MAP_HEIGHT: usize = 15;
const MIN_SIDE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Player,
    Adversary,
    HealPickup,
    ManaPickup,
    GoldPickup,
    Wall,
}

impl Tile {
    /// Single digit used when printing the grid
    pub fn code(&self) -> u8 {
        match self {
            Tile::Empty => 0,
            Tile::Player => 1,
            Tile::Adversary => 2,
            Tile::HealPickup => 3,
            Tile::ManaPickup => 4,
            Tile::GoldPickup => 5,
            Tile::Wall => 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    fn step(&self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// WASD controls
    pub fn from_command(command: char) -> Option<Direction> {
        match command {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Something picked up or fought on the tile the player entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileEvent {
    Healed { health: i32 },
    ManaRestored { mana: i32 },
    GoldFound { total: u32 },
    AdversaryDefeated { name: String, turns: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Moved {
        to: Position,
        event: Option<TileEvent>,
    },
    /// A wall or the map edge; the player stays put
    Blocked,
    UnknownCommand(char),
    /// The player lost an encounter; the map accepts no more moves
    Defeated { by: String, turns: u32 },
    /// A move was attempted after defeat
    Halted,
}

#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: usize,
    pub height: usize,
    tiles: Vec<Tile>,
    player: Position,
    adversaries: HashMap<Position, Entity>,
    pickups: PickupConfig,
    gold: u32,
    defeated: bool,
}

impl GameMap {
    /// Walled room with the player at `start` and nothing else.
    ///
    /// Sides shorter than 3 are widened to 3, the smallest room with a floor tile.
    pub fn empty(width: usize, height: usize, start: Position, pickups: PickupConfig) -> Self {
        let width = width.max(MIN_SIDE);
        let height = height.max(MIN_SIDE);
        let mut map = Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
            player: start,
            adversaries: HashMap::new(),
            pickups,
            gold: 0,
            defeated: false,
        };
        for x in 0..width {
            map.set(Position::new(x, 0), Tile::Wall);
            map.set(Position::new(x, height.saturating_sub(1)), Tile::Wall);
        }
        for y in 0..height {
            map.set(Position::new(0, y), Tile::Wall);
            map.set(Position::new(width.saturating_sub(1), y), Tile::Wall);
        }
        map.set(start, Tile::Player);
        map
    }

    /// The standard 15x15 dungeon with two goblins
    pub fn standard(config: &CombatConfig) -> Self {
        let mut map = Self::empty(
            MAP_WIDTH,
            MAP_HEIGHT,
            Position::new(5, 5),
            config.pickups.clone(),
        );

        map.place_adversary(Position::new(10, 10), Archetype::Goblin.spawn(config));
        map.place_adversary(Position::new(11, 13), Archetype::Goblin.spawn(config));

        for (x, y) in [(4, 6), (7, 4)] {
            map.set(Position::new(x, y), Tile::HealPickup);
        }
        for (x, y) in [(10, 7), (4, 8), (3, 10)] {
            map.set(Position::new(x, y), Tile::ManaPickup);
        }
        for (x, y) in [(5, 3), (2, 9), (4, 9)] {
            map.set(Position::new(x, y), Tile::GoldPickup);
        }
        map
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.tiles[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    pub fn set(&mut self, pos: Position, tile: Tile) {
        if pos.x < self.width && pos.y < self.height {
            self.tiles[pos.y * self.width + pos.x] = tile;
        }
    }

    pub fn place_adversary(&mut self, pos: Position, adversary: Entity) {
        self.set(pos, Tile::Adversary);
        self.adversaries.insert(pos, adversary);
    }

    pub fn adversary_at(&self, pos: Position) -> Option<&Entity> {
        self.adversaries.get(&pos)
    }

    pub fn adversaries_remaining(&self) -> usize {
        self.adversaries.len()
    }

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn is_over(&self) -> bool {
        self.defeated
    }

    /// Parse a WASD command and move
    pub fn command<F>(
        &mut self,
        command: char,
        player: &mut Entity,
        player_selector: &mut dyn ActionSelector,
        adversary_selector: &mut dyn ActionSelector,
        observer: F,
    ) -> Result<MoveOutcome>
    where
        F: FnMut(&CombatEvent),
    {
        match Direction::from_command(command) {
            Some(direction) => self.move_player(
                direction,
                player,
                player_selector,
                adversary_selector,
                observer,
            ),
            None => Ok(MoveOutcome::UnknownCommand(command)),
        }
    }

    /// Move one tile, resolving whatever occupies the destination
    pub fn move_player<F>(
        &mut self,
        direction: Direction,
        player: &mut Entity,
        player_selector: &mut dyn ActionSelector,
        adversary_selector: &mut dyn ActionSelector,
        observer: F,
    ) -> Result<MoveOutcome>
    where
        F: FnMut(&CombatEvent),
    {
        if self.defeated {
            return Ok(MoveOutcome::Halted);
        }

        let Some(next) = self.player.step(direction) else {
            return Ok(MoveOutcome::Blocked);
        };
        let Some(tile) = self.get(next) else {
            return Ok(MoveOutcome::Blocked);
        };

        let event = match tile {
            Tile::Wall => return Ok(MoveOutcome::Blocked),
            Tile::Empty | Tile::Player => None,
            Tile::HealPickup => Some(TileEvent::Healed {
                health: player.heal(self.pickups.heal_amount),
            }),
            Tile::ManaPickup => Some(TileEvent::ManaRestored {
                mana: player.restore_mana(self.pickups.mana_amount),
            }),
            Tile::GoldPickup => {
                self.gold += 1;
                Some(TileEvent::GoldFound { total: self.gold })
            }
            Tile::Adversary => match self.adversaries.get_mut(&next) {
                None => {
                    tracing::warn!(x = next.x, y = next.y, "adversary tile without adversary");
                    None
                }
                Some(adversary) => {
                    tracing::info!(
                        x = next.x,
                        y = next.y,
                        opponent = adversary.name(),
                        "encounter"
                    );
                    let report = enter_combat_observed(
                        player,
                        adversary,
                        player_selector,
                        adversary_selector,
                        observer,
                    )?;
                    let name = adversary.name().to_string();

                    match report.outcome {
                        CombatOutcome::ControlledLost => {
                            self.defeated = true;
                            return Ok(MoveOutcome::Defeated {
                                by: name,
                                turns: report.turns,
                            });
                        }
                        CombatOutcome::ControlledWon => {
                            self.adversaries.remove(&next);
                            Some(TileEvent::AdversaryDefeated {
                                name,
                                turns: report.turns,
                            })
                        }
                    }
                }
            },
        };

        self.set(self.player, Tile::Empty);
        self.player = next;
        self.set(next, Tile::Player);
        tracing::debug!(x = next.x, y = next.y, ?event, "player moved");

        Ok(MoveOutcome::Moved { to: next, event })
    }

    /// Digit grid, one row per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.width * self.height * 2 + self.height);
        for row in self.tiles.chunks(self.width) {
            let line: Vec<String> = row.iter().map(|t| t.code().to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ScriptedSelector;

    fn quiet(_: &CombatEvent) {}

    fn setup() -> (GameMap, Entity) {
        let config = CombatConfig::default();
        (GameMap::standard(&config), Archetype::Hero.spawn(&config))
    }

    fn walk(map: &mut GameMap, hero: &mut Entity, direction: Direction) -> MoveOutcome {
        map.move_player(
            direction,
            hero,
            &mut ScriptedSelector::default(),
            &mut ScriptedSelector::default(),
            quiet,
        )
        .unwrap()
    }

    #[test]
    fn test_standard_layout() {
        let (map, _) = setup();
        assert_eq!(map.get(Position::new(0, 0)), Some(Tile::Wall));
        assert_eq!(map.get(Position::new(14, 7)), Some(Tile::Wall));
        assert_eq!(map.get(Position::new(5, 5)), Some(Tile::Player));
        assert_eq!(map.get(Position::new(10, 10)), Some(Tile::Adversary));
        assert_eq!(map.get(Position::new(11, 13)), Some(Tile::Adversary));
        assert_eq!(map.get(Position::new(4, 6)), Some(Tile::HealPickup));
        assert_eq!(map.get(Position::new(10, 7)), Some(Tile::ManaPickup));
        assert_eq!(map.get(Position::new(5, 3)), Some(Tile::GoldPickup));
        assert_eq!(map.adversaries_remaining(), 2);
    }

    #[test]
    fn test_render_dimensions() {
        let (map, _) = setup();
        let rendered = map.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), MAP_HEIGHT);
        assert!(lines[0].split(' ').all(|c| c == "9"));
        assert_eq!(lines[5].split(' ').nth(5), Some("1"));
    }

    #[test]
    fn test_move_onto_empty() {
        let (mut map, mut hero) = setup();
        let outcome = walk(&mut map, &mut hero, Direction::Right);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                to: Position::new(6, 5),
                event: None
            }
        );
        assert_eq!(map.get(Position::new(5, 5)), Some(Tile::Empty));
        assert_eq!(map.get(Position::new(6, 5)), Some(Tile::Player));
    }

    #[test]
    fn test_degenerate_room_is_widened() {
        let map = GameMap::empty(0, 1, Position::new(1, 1), PickupConfig::default());
        assert_eq!((map.width, map.height), (3, 3));
        assert_eq!(map.render(), "9 9 9\n9 1 9\n9 9 9\n");
    }

    #[test]
    fn test_wall_blocks() {
        let mut map = GameMap::empty(3, 3, Position::new(1, 1), PickupConfig::default());
        let mut hero = Archetype::Hero.spawn(&CombatConfig::default());
        assert_eq!(walk(&mut map, &mut hero, Direction::Up), MoveOutcome::Blocked);
        assert_eq!(map.player_position(), Position::new(1, 1));
    }

    #[test]
    fn test_heal_pickup_is_capped_and_consumed() {
        let (mut map, mut hero) = setup();
        hero.take_damage(15); // 10 after armor
        walk(&mut map, &mut hero, Direction::Left);
        let outcome = walk(&mut map, &mut hero, Direction::Down);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                to: Position::new(4, 6),
                event: Some(TileEvent::Healed { health: 100 })
            }
        );

        walk(&mut map, &mut hero, Direction::Up);
        let again = walk(&mut map, &mut hero, Direction::Down);
        assert_eq!(
            again,
            MoveOutcome::Moved {
                to: Position::new(4, 6),
                event: None
            }
        );
    }

    #[test]
    fn test_gold_counts() {
        let (mut map, mut hero) = setup();
        walk(&mut map, &mut hero, Direction::Up);
        let outcome = walk(&mut map, &mut hero, Direction::Up);
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                to: Position::new(5, 3),
                event: Some(TileEvent::GoldFound { total: 1 })
            }
        );
        assert_eq!(map.gold(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let (mut map, mut hero) = setup();
        let outcome = map
            .command(
                'x',
                &mut hero,
                &mut ScriptedSelector::default(),
                &mut ScriptedSelector::default(),
                quiet,
            )
            .unwrap();
        assert_eq!(outcome, MoveOutcome::UnknownCommand('x'));
        assert_eq!(map.player_position(), Position::new(5, 5));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_command('w'), Some(Direction::Up));
        assert_eq!(Direction::from_command('a'), Some(Direction::Left));
        assert_eq!(Direction::from_command('s'), Some(Direction::Down));
        assert_eq!(Direction::from_command('d'), Some(Direction::Right));
        assert_eq!(Direction::from_command('W'), None);
    }
}
