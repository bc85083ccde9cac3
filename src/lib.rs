//! # Burrow
//!
//! A turn-based dungeon-crawl simulation core.
//!
//! ## Architecture Overview
//!
//! Burrow keeps the simulation separate from everything that talks to a human.
//! The core architecture revolves around several key concepts:
//!
//! - **Game State**: owns the map, the message log, the RNG and the FOV engine
//! - **Entity Model**: actors and items as records with optional components
//! - **Action System**: a sum type of intents resolved against the game state
//! - **Turn Scheduler**: player action first, then every hostile actor in order
//! - **Collaborators**: input decoding, presentation and map generation sit
//!   behind small traits so the core can be driven headless
//!
//! A round looks like this: the input layer produces one [`Action`] for the
//! player, [`GameState::handle_player_action`] resolves it, lets every hostile
//! actor decide and act, recomputes the field of view and asks the presenter
//! for a redraw.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod session;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use session::*;
pub use utils::*;

/// Core error type for the Burrow engine.
///
/// These are invariant violations. Expected failures of a player or monster
/// intent are [`ActionError::Impossible`] instead.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// An entity id did not resolve to an entity on the map
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// A required component was absent
    #[error("Entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },

    /// An item was expected in an actor's inventory
    #[error("Item {item} is not carried by {actor}")]
    ItemNotCarried { actor: EntityId, item: EntityId },

    /// A position outside the map was used for placement
    #[error("Position ({}, {}) is out of bounds", .0.x, .0.y)]
    OutOfBounds(Position),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default map width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 80;

    /// Default map height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 43;

    /// Default field-of-view radius
    pub const DEFAULT_FOV_RADIUS: i32 = 8;

    /// Default number of items an actor can carry
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 26;

    /// Default number of messages kept by the log
    pub const DEFAULT_MESSAGE_CAPACITY: usize = 100;

    /// Extra path cost for a cell occupied by a blocking entity
    pub const CROWDING_PENALTY: u32 = 10;

    /// Cost of a cardinal step
    pub const CARDINAL_STEP_COST: u32 = 2;

    /// Cost of a diagonal step
    pub const DIAGONAL_STEP_COST: u32 = 3;

    /// Largest map, in cells, the engine will allocate
    pub const MAX_MAP_CELLS: usize = 1 << 20;

    /// Upper bound for configured step costs
    pub const MAX_STEP_COST: u32 = 1_000;

    /// Upper bound for the configured crowding penalty
    pub const MAX_CROWDING_PENALTY: u32 = 1_000_000;
}
