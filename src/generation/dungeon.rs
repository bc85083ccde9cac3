//! # Dungeon Generation
//!
//! Rooms placed at random with overlap rejection, each joined to the
//! previous one by an L-shaped corridor, then stocked with monsters and
//! items.

use crate::game::{GameMap, Position, Tile};
use crate::generation::{populate_room, validate_map, GenerationConfig, Generator, Room};
use crate::{BurrowError, BurrowResult};
use log::debug;
use rand::{rngs::StdRng, Rng};

/// A generated map together with its layout.
#[derive(Debug, Clone)]
pub struct Dungeon {
    pub map: GameMap,
    /// Rooms in placement order. Consecutive rooms are connected.
    pub rooms: Vec<Room>,
    /// Center of the first room
    pub player_start: Position,
}

/// Room-and-corridor generator.
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether rooms get monsters and items
    pub populate: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{create_rng, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = create_rng(&config);
    /// let dungeon = RoomCorridorGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert!(dungeon.map.is_walkable(dungeon.player_start));
    /// ```
    pub fn new() -> Self {
        Self { populate: true }
    }

    /// A generator that only lays out rooms and corridors.
    pub fn layout_only() -> Self {
        Self { populate: false }
    }

    /// Places rooms, rejecting candidates that overlap an earlier one.
    fn place_rooms(
        &self,
        map: &mut GameMap,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..config.max_rooms {
            let room = self.generate_room_candidate(config, rng);
            if rooms.iter().any(|existing| room.overlaps(existing)) {
                continue;
            }

            map.carve_room(&room);
            if let Some(previous) = rooms.last() {
                let horizontal_first = rng.gen_bool(0.5);
                self.carve_l_corridor(map, previous.center(), room.center(), horizontal_first);
            }
            rooms.push(room);
        }

        if rooms.is_empty() {
            return Err(BurrowError::InvalidState(
                "failed to place any rooms".to_string(),
            ));
        }
        debug!("placed {} of {} rooms", rooms.len(), config.max_rooms);
        Ok(rooms)
    }

    /// Picks a random size and a position that keeps the room on the map.
    fn generate_room_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> Room {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(0..=(config.map_width - width)) as i32;
        let y = rng.gen_range(0..=(config.map_height - height)) as i32;
        Room::new(Position::new(x, y), width, height)
    }

    /// Carves an L-shaped corridor between two points.
    fn carve_l_corridor(
        &self,
        map: &mut GameMap,
        start: Position,
        end: Position,
        horizontal_first: bool,
    ) {
        let corner = if horizontal_first {
            Position::new(end.x, start.y)
        } else {
            Position::new(start.x, end.y)
        };
        self.carve_straight(map, start, corner);
        self.carve_straight(map, corner, end);
    }

    fn carve_straight(&self, map: &mut GameMap, from: Position, to: Position) {
        map.fill_rect(
            Position::new(from.x.min(to.x), from.y.min(to.y)),
            Position::new(from.x.max(to.x), from.y.max(to.y)),
            Tile::floor(),
        );
    }
}

impl Generator<Dungeon> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<Dungeon> {
        config.validate()?;
        let mut map = GameMap::try_new(config.map_width, config.map_height)?;
        let rooms = self.place_rooms(&mut map, config, rng)?;
        let player_start = rooms[0].center();

        if self.populate {
            for room in &rooms {
                populate_room(&mut map, room, player_start, config, rng)?;
            }
        }

        Ok(Dungeon {
            map,
            rooms,
            player_start,
        })
    }

    fn validate(&self, dungeon: &Dungeon, _config: &GenerationConfig) -> BurrowResult<()> {
        validate_map(&dungeon.map)?;
        if !dungeon.map.is_walkable(dungeon.player_start) {
            return Err(BurrowError::InvalidState(format!(
                "player start {:?} is not walkable",
                dungeon.player_start
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
