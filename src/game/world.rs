//! # World Module
//!
//! The tile grid and the map that owns every placed entity.
//!
//! Tiles are immutable once a map has been generated. The `visible` and
//! `explored` grids are only written by [`GameMap::update_visibility`], which
//! the FOV step calls after each successful round.

use crate::game::{Color, Entity, EntityId, Position};
use crate::{config, BurrowError, BurrowResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A glyph with foreground and background colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphic {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Graphic {
    pub const fn new(glyph: char, fg: Color, bg: Color) -> Self {
        Self { glyph, fg, bg }
    }
}

/// Graphic drawn for cells that have never been seen.
pub const SHROUD: Graphic = Graphic::new(' ', Color::WHITE, Color::BLACK);

/// The kinds of tile the map knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
}

/// A single cell of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// True if this tile can be walked over
    pub walkable: bool,
    /// True if this tile doesn't block FOV
    pub transparent: bool,
    /// Graphic for when this tile is not in FOV
    pub dark: Graphic,
    /// Graphic for when this tile is in FOV
    pub light: Graphic,
}

impl Tile {
    /// Creates a tile of the given type with its standard graphics.
    pub fn new(tile_type: TileType) -> Self {
        match tile_type {
            TileType::Floor => Self {
                tile_type,
                walkable: true,
                transparent: true,
                dark: Graphic::new('.', Color::new(100, 100, 100), Color::BLACK),
                light: Graphic::new('.', Color::new(200, 180, 50), Color::BLACK),
            },
            TileType::Wall => Self {
                tile_type,
                walkable: false,
                transparent: false,
                dark: Graphic::new('#', Color::new(100, 100, 100), Color::BLACK),
                light: Graphic::new('#', Color::new(200, 200, 200), Color::BLACK),
            },
        }
    }

    pub fn floor() -> Self {
        Self::new(TileType::Floor)
    }

    pub fn wall() -> Self {
        Self::new(TileType::Wall)
    }
}

/// Number of cells in a `width` x `height` grid.
///
/// Fails when either side is zero or the grid exceeds
/// [`config::MAX_MAP_CELLS`](crate::config::MAX_MAP_CELLS).
pub fn map_cell_count(width: u32, height: u32) -> BurrowResult<usize> {
    if width == 0 || height == 0 {
        return Err(BurrowError::InvalidConfig(
            "map dimensions must be non-zero".to_string(),
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&cells| cells <= config::MAX_MAP_CELLS)
        .ok_or_else(|| {
            BurrowError::InvalidConfig(format!(
                "a {}x{} map exceeds the limit of {} cells",
                width,
                height,
                config::MAX_MAP_CELLS
            ))
        })
}

/// A single dungeon map: the tile grid, visibility state and placed entities.
///
/// Entities are kept in insertion order, which is the order hostile actors
/// take their turns in.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    entities: HashMap<EntityId, Entity>,
    order: Vec<EntityId>,
}

impl GameMap {
    /// Creates a map of the given size filled with walls. Dimensions read from
    /// configuration go through [`GameMap::try_new`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{GameMap, Position};
    ///
    /// let map = GameMap::new(10, 8);
    /// assert!(map.in_bounds(Position::new(9, 7)));
    /// assert!(!map.in_bounds(Position::new(10, 0)));
    /// assert!(!map.is_walkable(Position::new(3, 3)));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_cells(width, height, (width as usize).saturating_mul(height as usize))
    }

    /// Creates a map from untrusted dimensions, rejecting empty or oversized
    /// grids instead of allocating them.
    pub fn try_new(width: u32, height: u32) -> BurrowResult<Self> {
        let size = map_cell_count(width, height)?;
        Ok(Self::with_cells(width, height, size))
    }

    fn with_cells(width: u32, height: u32, size: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); size],
            visible: vec![false; size],
            explored: vec![false; size],
            entities: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Returns true if the position is inside the bounds of this map.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at a position.
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|i| &self.tiles[i])
    }

    /// Replaces the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> BurrowResult<()> {
        let i = self.index(pos).ok_or(BurrowError::OutOfBounds(pos))?;
        self.tiles[i] = tile;
        Ok(())
    }

    /// Sets every tile in the inclusive rectangle to `tile`, clipped to the map.
    pub fn fill_rect(&mut self, top_left: Position, bottom_right: Position, tile: Tile) {
        for y in top_left.y..=bottom_right.y {
            for x in top_left.x..=bottom_right.x {
                if let Some(i) = self.index(Position::new(x, y)) {
                    self.tiles[i] = tile;
                }
            }
        }
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_at(pos).map(|t| t.walkable).unwrap_or(false)
    }

    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile_at(pos).map(|t| t.transparent).unwrap_or(false)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.visible[i]).unwrap_or(false)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.explored[i]).unwrap_or(false)
    }

    /// Replaces the visible set and marks every visible cell as explored.
    pub fn update_visibility<I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = Position>,
    {
        self.visible.iter_mut().for_each(|v| *v = false);
        for pos in visible {
            if let Some(i) = self.index(pos) {
                self.visible[i] = true;
                self.explored[i] = true;
            }
        }
    }

    /// Registers an entity on this map.
    pub fn place_entity(&mut self, entity: Entity) -> BurrowResult<EntityId> {
        if !self.in_bounds(entity.position) {
            return Err(BurrowError::OutOfBounds(entity.position));
        }
        let id = entity.id;
        if self.entities.insert(id, entity).is_none() {
            self.order.push(id);
        }
        Ok(id)
    }

    /// Removes an entity from this map, handing ownership to the caller.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(entity)
    }

    /// Moves an entity to a new in-bounds position.
    pub fn set_entity_position(&mut self, id: EntityId, pos: Position) -> BurrowResult<()> {
        if !self.in_bounds(pos) {
            return Err(BurrowError::OutOfBounds(pos));
        }
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(BurrowError::EntityNotFound(id))?;
        entity.position = pos;
        Ok(())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Iterates over every placed entity in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.order.iter().filter_map(move |id| self.entities.get(id))
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// Iterates over the entities standing on a cell.
    pub fn entities_at(&self, pos: Position) -> impl Iterator<Item = &Entity> {
        self.entities().filter(move |e| e.position == pos)
    }

    /// Gets the first entity on a cell that blocks movement.
    pub fn blocking_entity_at(&self, pos: Position) -> Option<&Entity> {
        self.entities_at(pos).find(|e| e.blocks_movement)
    }

    /// Gets the living actor on a cell, if any. Corpses are ignored.
    pub fn actor_at(&self, pos: Position) -> Option<&Entity> {
        self.entities_at(pos).find(|e| e.is_alive())
    }

    /// Iterates over the items lying on a cell, in insertion order.
    pub fn items_at(&self, pos: Position) -> impl Iterator<Item = &Entity> {
        self.entities_at(pos).filter(|e| e.is_item())
    }

    /// Iterates over every living actor.
    pub fn living_actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities().filter(|e| e.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Fighter, Item, RenderOrder};

    fn open_map() -> GameMap {
        let mut map = GameMap::new(10, 10);
        map.fill_rect(Position::new(1, 1), Position::new(8, 8), Tile::floor());
        map
    }

    fn goblin(pos: Position) -> Entity {
        Entity::actor(
            "Goblin",
            'g',
            Color::new(0, 200, 0),
            pos,
            Actor::new(Fighter::new(5, 0, 2)),
        )
    }

    #[test]
    fn test_new_map_is_all_wall() {
        let map = GameMap::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                let tile = map.tile_at(Position::new(x, y)).unwrap();
                assert_eq!(tile.tile_type, TileType::Wall);
                assert!(!tile.walkable);
                assert!(!tile.transparent);
            }
        }
    }

    #[test]
    fn test_oversized_map_is_rejected() {
        assert!(matches!(
            GameMap::try_new(70_000, 70_000),
            Err(BurrowError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameMap::try_new(u32::MAX, u32::MAX),
            Err(BurrowError::InvalidConfig(_))
        ));
        assert!(GameMap::try_new(0, 10).is_err());
        let map = GameMap::try_new(80, 43).unwrap();
        assert!(map.in_bounds(Position::new(79, 42)));
        assert_eq!(map_cell_count(1024, 1024).unwrap(), config::MAX_MAP_CELLS);
        assert!(map_cell_count(1025, 1024).is_err());
    }

    #[test]
    fn test_bounds() {
        let map = GameMap::new(10, 5);
        assert!(map.in_bounds(Position::new(0, 0)));
        assert!(map.in_bounds(Position::new(9, 4)));
        assert!(!map.in_bounds(Position::new(-1, 0)));
        assert!(!map.in_bounds(Position::new(0, 5)));
        assert!(map.tile_at(Position::new(10, 0)).is_none());
        assert!(!map.is_walkable(Position::new(100, 100)));
    }

    #[test]
    fn test_fill_rect_and_set_tile() {
        let mut map = open_map();
        assert!(map.is_walkable(Position::new(1, 1)));
        assert!(map.is_walkable(Position::new(8, 8)));
        assert!(!map.is_walkable(Position::new(0, 0)));

        map.set_tile(Position::new(4, 4), Tile::wall()).unwrap();
        assert!(!map.is_walkable(Position::new(4, 4)));
        assert!(map.set_tile(Position::new(10, 10), Tile::floor()).is_err());
    }

    #[test]
    fn test_visibility_marks_explored() {
        let mut map = open_map();
        map.update_visibility(vec![Position::new(2, 2), Position::new(3, 2)]);
        assert!(map.is_visible(Position::new(2, 2)));
        assert!(map.is_explored(Position::new(3, 2)));

        map.update_visibility(vec![Position::new(5, 5)]);
        assert!(!map.is_visible(Position::new(2, 2)));
        assert!(map.is_explored(Position::new(2, 2)));
        assert!(map.is_visible(Position::new(5, 5)));
    }

    #[test]
    fn test_place_and_remove_entity() {
        let mut map = open_map();
        let id = map.place_entity(goblin(Position::new(3, 3))).unwrap();
        assert_eq!(map.entity_count(), 1);
        assert_eq!(map.blocking_entity_at(Position::new(3, 3)).map(|e| e.id), Some(id));
        assert_eq!(map.actor_at(Position::new(3, 3)).map(|e| e.id), Some(id));

        let removed = map.remove_entity(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(map.entity_count(), 0);
        assert!(map.remove_entity(id).is_none());
    }

    #[test]
    fn test_place_out_of_bounds_fails() {
        let mut map = open_map();
        let result = map.place_entity(goblin(Position::new(20, 3)));
        assert!(matches!(result, Err(BurrowError::OutOfBounds(_))));
        assert_eq!(map.entity_count(), 0);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut map = open_map();
        let a = map.place_entity(goblin(Position::new(2, 2))).unwrap();
        let b = map.place_entity(goblin(Position::new(3, 3))).unwrap();
        let c = map.place_entity(goblin(Position::new(4, 4))).unwrap();
        map.remove_entity(b);
        let ids: Vec<_> = map.entities().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_items_do_not_block() {
        let mut map = open_map();
        let pos = Position::new(2, 2);
        let potion = Entity::item("Potion", '!', Color::WHITE, pos, Item::new(None));
        map.place_entity(potion).unwrap();
        assert!(map.blocking_entity_at(pos).is_none());
        assert!(map.actor_at(pos).is_none());
        assert_eq!(map.items_at(pos).count(), 1);
        assert_eq!(
            map.entities_at(pos).next().map(|e| e.render_order),
            Some(RenderOrder::Item)
        );
    }
}
