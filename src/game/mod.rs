//! # Game Module
//!
//! The simulation core: tile grid, entity components, action resolution and
//! the turn scheduler.
//!
//! This module contains the fundamental building blocks of Burrow:
//! - Map and tile representation
//! - Entities with optional fighter, AI, inventory and consumable components
//! - Action resolution with recoverable `Impossible` failures
//! - Turn scheduling between the player and hostile actors

pub mod actions;
pub mod ai;
pub mod color;
pub mod consumable;
pub mod entities;
pub mod fighter;
pub mod inventory;
pub mod messages;
pub mod state;
pub mod turns;
pub mod world;

pub use actions::*;
pub use ai::*;
pub use color::*;
pub use consumable::*;
pub use entities::*;
pub use fighter::*;
pub use inventory::*;
pub use messages::*;
pub use state::*;
pub use turns::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cell on the map. `x` grows east and `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Number of king moves between two cells.
    ///
    /// Adjacency for melee and pathing is a Chebyshev distance of 1.
    ///
    /// ```
    /// use burrow::Position;
    ///
    /// let orc = Position::new(4, 4);
    /// assert_eq!(orc.chebyshev_distance(Position::new(5, 3)), 1);
    /// assert_eq!(orc.chebyshev_distance(Position::new(1, 6)), 3);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x).abs().max((self.y - other.y).abs()) as u32
    }

    /// Straight-line distance, used for spell ranges and field of view.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The cell one step away in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }

    /// The eight neighbouring cells, in [`Direction::ALL`] order.
    pub fn adjacent_positions(self) -> Vec<Position> {
        Direction::ALL.iter().map(|&d| self.step(d)).collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// One of the eight king-move directions an actor can step or strike in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Every direction, row by row from the north-west corner.
    pub const ALL: [Direction; 8] = [
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
        Direction::West,
        Direction::East,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
    ];

    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Northeast => Position::new(1, -1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(-1, 1),
        }
    }

    /// The direction of a single step from `from` to `to`.
    ///
    /// Returns `None` unless the cells are adjacent.
    ///
    /// ```
    /// use burrow::{Direction, Position};
    ///
    /// let troll = Position::new(7, 5);
    /// assert_eq!(Direction::between(troll, Position::new(6, 6)), Some(Direction::Southwest));
    /// assert_eq!(Direction::between(troll, Position::new(5, 5)), None);
    /// assert_eq!(Direction::between(troll, troll), None);
    /// ```
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let delta = to - from;
        Direction::ALL.into_iter().find(|d| d.to_delta() == delta)
    }

    /// Roguelike movement keys: `hjkl` for the cardinals, `yubn` for the
    /// diagonals.
    pub fn from_key(key: &str) -> Option<Direction> {
        let direction = match key {
            "h" => Direction::West,
            "j" => Direction::South,
            "k" => Direction::North,
            "l" => Direction::East,
            "y" => Direction::Northwest,
            "u" => Direction::Northeast,
            "b" => Direction::Southwest,
            "n" => Direction::Southeast,
            _ => return None,
        };
        Some(direction)
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
