//! # Generation Module
//!
//! Demo content for driving the core: a room-and-corridor map, monster and
//! item factories, and [`new_game`] which wires them into a ready
//! [`GameState`].
//!
//! Map generation is a collaborator of the simulation, not part of it; the
//! core only needs a [`GameMap`] with entities placed on it.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::{map_cell_count, Color, GameConfig, GameMap, GameState, Position, Tile, TileType};
use crate::{BurrowError, BurrowResult};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    pub map_width: u32,
    pub map_height: u32,
    /// Minimum room size, walls included
    pub min_room_size: u32,
    /// Maximum room size, walls included
    pub max_room_size: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    pub max_monsters_per_room: u32,
    pub max_items_per_room: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: crate::config::DEFAULT_MAP_WIDTH,
            map_height: crate::config::DEFAULT_MAP_HEIGHT,
            min_room_size: 6,
            max_room_size: 10,
            max_rooms: 30,
            max_monsters_per_room: 2,
            max_items_per_room: 2,
        }
    }

    /// Creates a configuration for testing with smaller, simpler levels.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 40,
            map_height: 24,
            min_room_size: 4,
            max_room_size: 7,
            max_rooms: 8,
            max_monsters_per_room: 1,
            max_items_per_room: 1,
        }
    }

    /// Generation settings matching an engine configuration.
    pub fn from_game_config(config: &GameConfig) -> Self {
        Self {
            seed: config.seed,
            map_width: config.map_width,
            map_height: config.map_height,
            ..Self::new(config.seed)
        }
    }

    pub fn validate(&self) -> BurrowResult<()> {
        if self.min_room_size < 3 || self.max_room_size < self.min_room_size {
            return Err(BurrowError::InvalidConfig(format!(
                "room sizes {}..={} are unusable",
                self.min_room_size, self.max_room_size
            )));
        }
        map_cell_count(self.map_width, self.map_height)?;
        let needed = self.max_room_size.saturating_add(2);
        if self.map_width < needed || self.map_height < needed {
            return Err(BurrowError::InvalidConfig(format!(
                "a {}x{} map cannot hold rooms of size {}",
                self.map_width, self.map_height, self.max_room_size
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room. The outer ring of cells is wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room (including walls)
    pub width: u32,
    /// Height of the room (including walls)
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Position, Room};
    ///
    /// let room = Room::new(Position::new(5, 5), 10, 8);
    /// assert_eq!(room.center(), Position::new(10, 9));
    /// assert!(room.contains(Position::new(7, 7)));
    /// assert!(!room.contains(Position::new(20, 20)));
    /// ```
    pub fn new(top_left: Position, width: u32, height: u32) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        let bottom_right = self.bottom_right();
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x <= bottom_right.x
            && pos.y <= bottom_right.y
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }

    /// Gets all floor positions within this room.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in (self.top_left.y + 1)..(self.top_left.y + self.height as i32 - 1) {
            for x in (self.top_left.x + 1)..(self.top_left.x + self.width as i32 - 1) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }
}

impl GameMap {
    /// Carves the inside of a room into floor.
    pub fn carve_room(&mut self, room: &Room) {
        let bottom_right = room.bottom_right();
        self.fill_rect(
            Position::new(room.top_left.x + 1, room.top_left.y + 1),
            Position::new(bottom_right.x - 1, bottom_right.y - 1),
            Tile::floor(),
        );
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}

/// Checks that a map has somewhere to stand.
pub fn validate_map(map: &GameMap) -> BurrowResult<()> {
    let has_floor = (0..map.height as i32).any(|y| {
        (0..map.width as i32).any(|x| {
            map.tile_at(Position::new(x, y))
                .map(|t| t.tile_type == TileType::Floor)
                .unwrap_or(false)
        })
    });
    if !has_floor {
        return Err(BurrowError::InvalidState("map has no floor tiles".to_string()));
    }
    Ok(())
}

/// Generates a populated dungeon and starts a game on it.
pub fn new_game(config: GameConfig) -> BurrowResult<GameState> {
    config.validate()?;
    let generation = GenerationConfig::from_game_config(&config);
    generation.validate()?;
    let mut rng = create_rng(&generation);

    let generator = RoomCorridorGenerator::new();
    let dungeon = generator.generate(&generation, &mut rng)?;
    generator.validate(&dungeon, &generation)?;
    info!(
        "{} produced {} rooms",
        generator.generator_type(),
        dungeon.rooms.len()
    );

    let player = spawn_player(dungeon.player_start, config.inventory_capacity);
    let mut state = GameState::new(dungeon.map, player, config)?;
    state.log.add_message(
        "Hello and welcome, adventurer, to yet another dungeon!",
        Color::WELCOME_TEXT,
    );
    Ok(state)
}
