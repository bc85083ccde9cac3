//! # Game State Module
//!
//! Central game state and its configuration.
//!
//! [`GameState`] is the explicit context every action, AI decision and
//! consumable receives: it owns the current map (and through it every placed
//! entity), the message log, the seeded RNG and the FOV engine. Nothing in
//! the core reaches for ambient globals.

use crate::game::{map_cell_count, Entity, EntityId, GameMap, MessageLog, Position};
use crate::utils::{CostGrid, FovEngine, Pathfinder, RaycastFov};
use crate::{config, BurrowError, BurrowResult};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Whether the run is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// The player is alive
    Playing,
    /// The player has died; only quitting remains
    PlayerDied,
}

/// Tunable engine settings.
///
/// Every field has a default, so a JSON override file only needs the keys it
/// changes.
///
/// # Examples
///
/// ```
/// use burrow::GameConfig;
///
/// let config = GameConfig::from_json_str(r#"{ "seed": 7, "fov_radius": 5 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.fov_radius, 5);
/// assert_eq!(config.inventory_capacity, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for every random decision made during play
    pub seed: u64,
    pub map_width: u32,
    pub map_height: u32,
    pub fov_radius: i32,
    pub inventory_capacity: usize,
    pub message_capacity: usize,
    /// Extra path cost of a cell holding a blocking entity
    pub crowding_penalty: u32,
    pub cardinal_step_cost: u32,
    pub diagonal_step_cost: u32,
}

impl GameConfig {
    /// Creates the default configuration with a specific seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parses a JSON override document and validates the result.
    pub fn from_json_str(json: &str) -> BurrowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON override file and validates the result.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> BurrowResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        debug!("loaded config from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    /// Checks that the values can drive a game.
    pub fn validate(&self) -> BurrowResult<()> {
        map_cell_count(self.map_width, self.map_height)?;
        if self.fov_radius < 0 {
            return Err(BurrowError::InvalidConfig(
                "fov_radius must not be negative".to_string(),
            ));
        }
        if self.inventory_capacity == 0 || self.message_capacity == 0 {
            return Err(BurrowError::InvalidConfig(
                "capacities must be non-zero".to_string(),
            ));
        }
        if self.cardinal_step_cost == 0 || self.diagonal_step_cost <= self.cardinal_step_cost {
            return Err(BurrowError::InvalidConfig(format!(
                "diagonal step cost ({}) must exceed a non-zero cardinal step cost ({})",
                self.diagonal_step_cost, self.cardinal_step_cost
            )));
        }
        if self.diagonal_step_cost > config::MAX_STEP_COST
            || self.crowding_penalty > config::MAX_CROWDING_PENALTY
        {
            return Err(BurrowError::InvalidConfig(format!(
                "step costs are limited to {} and the crowding penalty to {}",
                config::MAX_STEP_COST,
                config::MAX_CROWDING_PENALTY
            )));
        }
        Ok(())
    }

    /// The pathfinder these step costs describe.
    pub fn pathfinder(&self) -> Pathfinder {
        Pathfinder::new(self.cardinal_step_cost, self.diagonal_step_cost)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            map_width: config::DEFAULT_MAP_WIDTH,
            map_height: config::DEFAULT_MAP_HEIGHT,
            fov_radius: config::DEFAULT_FOV_RADIUS,
            inventory_capacity: config::DEFAULT_INVENTORY_CAPACITY,
            message_capacity: config::DEFAULT_MESSAGE_CAPACITY,
            crowding_penalty: config::CROWDING_PENALTY,
            cardinal_step_cost: config::CARDINAL_STEP_COST,
            diagonal_step_cost: config::DIAGONAL_STEP_COST,
        }
    }
}

/// Central game state: the context passed to every simulation step.
#[derive(Debug)]
pub struct GameState {
    /// The current map, which owns every placed entity
    pub map: GameMap,
    /// The player entity ID
    pub player_id: EntityId,
    pub log: MessageLog,
    pub rng: StdRng,
    pub fov: Box<dyn FovEngine>,
    pub config: GameConfig,
    /// Number of completed rounds
    pub turn_number: u64,
    pub status: GameStatus,
}

impl GameState {
    /// Places the player on a map and computes the initial field of view.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Actor, Color, Entity, Fighter, GameConfig, GameMap, GameState, Position, Tile};
    ///
    /// let mut map = GameMap::new(10, 10);
    /// map.fill_rect(Position::new(1, 1), Position::new(8, 8), Tile::floor());
    /// let player = Entity::actor("Player", '@', Color::WHITE, Position::new(4, 4),
    ///     Actor::new(Fighter::new(30, 2, 5)));
    ///
    /// let state = GameState::new(map, player, GameConfig::default()).unwrap();
    /// assert_eq!(state.turn_number, 0);
    /// assert!(state.map.is_visible(Position::new(4, 4)));
    /// ```
    pub fn new(mut map: GameMap, player: Entity, config: GameConfig) -> BurrowResult<Self> {
        config.validate()?;
        if !player.is_alive() {
            return Err(BurrowError::InvalidState(
                "the player must be a living actor".to_string(),
            ));
        }
        let player_id = map.place_entity(player)?;

        let mut state = Self {
            map,
            player_id,
            log: MessageLog::with_capacity(config.message_capacity),
            rng: StdRng::seed_from_u64(config.seed),
            fov: Box::new(RaycastFov::new()),
            config,
            turn_number: 0,
            status: GameStatus::Playing,
        };
        state.update_fov()?;
        info!(
            "game started on a {}x{} map with {} entities",
            state.map.width,
            state.map.height,
            state.map.entity_count()
        );
        Ok(state)
    }

    /// Replaces the FOV engine and recomputes visibility with it.
    pub fn set_fov_engine(&mut self, fov: Box<dyn FovEngine>) -> BurrowResult<()> {
        self.fov = fov;
        self.update_fov()
    }

    /// Gets the player entity.
    pub fn player(&self) -> BurrowResult<&Entity> {
        self.map
            .entity(self.player_id)
            .ok_or(BurrowError::EntityNotFound(self.player_id))
    }

    /// Gets the player entity mutably.
    pub fn player_mut(&mut self) -> BurrowResult<&mut Entity> {
        let id = self.player_id;
        self.map.entity_mut(id).ok_or(BurrowError::EntityNotFound(id))
    }

    pub fn is_player_alive(&self) -> bool {
        self.player().map(Entity::is_alive).unwrap_or(false)
    }

    /// Recomputes the visible and explored sets from the player's position.
    pub fn update_fov(&mut self) -> BurrowResult<()> {
        let origin = self.player()?.position;
        let visible = self
            .fov
            .compute(&self.map, origin, self.config.fov_radius);
        self.map.update_visibility(visible);
        Ok(())
    }

    /// Plans a path over the current map, treating blocking entities as
    /// crowding rather than walls.
    pub fn path_between(&self, from: Position, to: Position) -> Vec<Position> {
        let grid = CostGrid::from_map(&self.map, self.config.crowding_penalty);
        self.config.pathfinder().find_path(&grid, from, to)
    }
}
