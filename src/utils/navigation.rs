//! # Navigation
//!
//! Cost-weighted 8-directional pathfinding for hostile actors.
//!
//! A [`CostGrid`] is rebuilt from the map every time an actor plans, so it
//! always reflects the current occupancy. Walls are impassable; cells held
//! by blocking entities stay passable but expensive, which makes monsters
//! spread out and flank instead of queueing behind each other.

use crate::config;
use crate::game::{GameMap, Position};
use crate::utils::octile_distance;
use log::trace;
use pathfinding::prelude::astar;

/// Traversal cost of every cell. A cost of 0 means impassable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostGrid {
    width: usize,
    height: usize,
    costs: Vec<u32>,
}

impl CostGrid {
    /// Creates a grid where every cell has the same cost.
    pub fn uniform(width: u32, height: u32, cost: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            costs: vec![cost; width.saturating_mul(height)],
        }
    }

    /// Builds the grid for the current state of a map.
    ///
    /// Walkable tiles cost 1 and walls 0. Every blocking entity standing on a
    /// passable cell adds `crowding_penalty` to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{CostGrid, GameMap, Position, Tile};
    ///
    /// let mut map = GameMap::new(5, 5);
    /// map.fill_rect(Position::new(1, 1), Position::new(3, 3), Tile::floor());
    ///
    /// let grid = CostGrid::from_map(&map, 10);
    /// assert_eq!(grid.cost(Position::new(2, 2)), 1);
    /// assert_eq!(grid.cost(Position::new(0, 0)), 0);
    /// ```
    pub fn from_map(map: &GameMap, crowding_penalty: u32) -> Self {
        let mut grid = Self::uniform(map.width, map.height, 0);
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                let pos = Position::new(x, y);
                if map.is_walkable(pos) {
                    grid.set_cost(pos, 1);
                }
            }
        }

        for entity in map.entities().filter(|e| e.blocks_movement) {
            if let Some(i) = grid.index(entity.position) {
                if grid.costs[i] != 0 {
                    grid.costs[i] = grid.costs[i].saturating_add(crowding_penalty);
                }
            }
        }
        grid
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let (x, y) = (usize::try_from(pos.x).ok()?, usize::try_from(pos.y).ok()?);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Cost of entering a cell. Out-of-bounds cells cost 0.
    pub fn cost(&self, pos: Position) -> u32 {
        self.index(pos).map(|i| self.costs[i]).unwrap_or(0)
    }

    /// Sets the cost of a cell. Out-of-bounds writes are ignored.
    pub fn set_cost(&mut self, pos: Position, cost: u32) {
        if let Some(i) = self.index(pos) {
            self.costs[i] = cost;
        }
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.cost(pos) > 0
    }
}

/// A* search over a [`CostGrid`] with separate cardinal and diagonal step
/// costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pathfinder {
    pub cardinal_cost: u32,
    pub diagonal_cost: u32,
}

impl Pathfinder {
    pub fn new(cardinal_cost: u32, diagonal_cost: u32) -> Self {
        Self {
            cardinal_cost,
            diagonal_cost,
        }
    }

    /// Finds the cheapest path from `start` to `goal`.
    ///
    /// The result lists the cells to step through in order, excluding
    /// `start` and ending at `goal`. It is empty when the goal is the start,
    /// is impassable, or cannot be reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{CostGrid, Pathfinder, Position};
    ///
    /// let grid = CostGrid::uniform(10, 10, 1);
    /// let path = Pathfinder::default().find_path(&grid, Position::new(1, 1), Position::new(4, 2));
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.last(), Some(&Position::new(4, 2)));
    /// ```
    pub fn find_path(&self, grid: &CostGrid, start: Position, goal: Position) -> Vec<Position> {
        if start == goal || !grid.is_passable(goal) {
            return Vec::new();
        }

        let result = astar(
            &start,
            |&pos| self.successors(grid, pos),
            |&pos| u64::from(octile_distance(pos, goal, self.cardinal_cost, self.diagonal_cost)),
            |&pos| pos == goal,
        );

        match result {
            Some((mut path, cost)) => {
                trace!(
                    "path ({}, {}) -> ({}, {}): {} steps, cost {}",
                    start.x,
                    start.y,
                    goal.x,
                    goal.y,
                    path.len() - 1,
                    cost
                );
                path.remove(0);
                path
            }
            None => {
                trace!("no path ({}, {}) -> ({}, {})", start.x, start.y, goal.x, goal.y);
                Vec::new()
            }
        }
    }

    fn successors(&self, grid: &CostGrid, pos: Position) -> Vec<(Position, u64)> {
        pos.adjacent_positions()
            .into_iter()
            .filter_map(|next| {
                let cost = grid.cost(next);
                if cost == 0 {
                    return None;
                }
                let step = if next.x != pos.x && next.y != pos.y {
                    self.diagonal_cost
                } else {
                    self.cardinal_cost
                };
                Some((next, u64::from(cost) * u64::from(step)))
            })
            .collect()
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(config::CARDINAL_STEP_COST, config::DIAGONAL_STEP_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Color, Entity, Fighter, Item, Tile};
    use proptest::prelude::*;

    fn open_map(width: u32, height: u32) -> GameMap {
        let mut map = GameMap::new(width, height);
        map.fill_rect(
            Position::new(1, 1),
            Position::new(width as i32 - 2, height as i32 - 2),
            Tile::floor(),
        );
        map
    }

    fn blocker(pos: Position) -> Entity {
        Entity::actor("Blocker", 'b', Color::WHITE, pos, Actor::new(Fighter::new(1, 0, 0)))
    }

    #[test]
    fn test_cost_grid_from_map() {
        let mut map = open_map(6, 6);
        map.place_entity(blocker(Position::new(2, 2))).unwrap();
        map.place_entity(Entity::item(
            "Pebble",
            '*',
            Color::WHITE,
            Position::new(3, 3),
            Item::new(None),
        ))
        .unwrap();

        let grid = CostGrid::from_map(&map, 10);
        assert_eq!(grid.cost(Position::new(1, 1)), 1);
        assert_eq!(grid.cost(Position::new(2, 2)), 11);
        assert_eq!(grid.cost(Position::new(3, 3)), 1);
        assert_eq!(grid.cost(Position::new(0, 3)), 0);
        assert_eq!(grid.cost(Position::new(-1, 3)), 0);
    }

    #[test]
    fn test_huge_costs_do_not_overflow() {
        let mut map = GameMap::new(7, 3);
        map.fill_rect(Position::new(1, 1), Position::new(5, 1), Tile::floor());
        map.place_entity(blocker(Position::new(3, 1))).unwrap();
        map.place_entity(blocker(Position::new(4, 1))).unwrap();

        let grid = CostGrid::from_map(&map, u32::MAX);
        assert_eq!(grid.cost(Position::new(3, 1)), u32::MAX);

        let path = Pathfinder::default().find_path(&grid, Position::new(1, 1), Position::new(5, 1));
        assert_eq!(path.len(), 4);

        let open = CostGrid::uniform(6, 6, 1);
        let pathfinder = Pathfinder::new(u32::MAX / 4, u32::MAX / 3);
        let path = pathfinder.find_path(&open, Position::new(0, 0), Position::new(5, 3));
        assert_eq!(path.last(), Some(&Position::new(5, 3)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_blocker_on_wall_stays_impassable() {
        let mut map = open_map(6, 6);
        map.place_entity(blocker(Position::new(0, 0))).unwrap();
        let grid = CostGrid::from_map(&map, 10);
        assert_eq!(grid.cost(Position::new(0, 0)), 0);
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let grid = CostGrid::uniform(5, 5, 1);
        let p = Position::new(2, 2);
        assert!(Pathfinder::default().find_path(&grid, p, p).is_empty());
    }

    #[test]
    fn test_path_to_walled_off_cell_is_empty() {
        let mut map = open_map(10, 10);
        for pos in Position::new(7, 7).adjacent_positions() {
            map.set_tile(pos, Tile::wall()).unwrap();
        }
        let grid = CostGrid::from_map(&map, 10);
        let path = Pathfinder::default().find_path(&grid, Position::new(1, 1), Position::new(7, 7));
        assert!(path.is_empty());
    }

    #[test]
    fn test_path_to_wall_is_empty() {
        let map = open_map(10, 10);
        let grid = CostGrid::from_map(&map, 10);
        let path = Pathfinder::default().find_path(&grid, Position::new(1, 1), Position::new(0, 5));
        assert!(path.is_empty());
    }

    #[test]
    fn test_path_routes_around_walls() {
        let mut map = open_map(10, 7);
        // Wall across the middle with a gap at the bottom.
        for y in 1..5 {
            map.set_tile(Position::new(5, y), Tile::wall()).unwrap();
        }
        let grid = CostGrid::from_map(&map, 10);
        let start = Position::new(2, 2);
        let goal = Position::new(8, 2);
        let path = Pathfinder::default().find_path(&grid, start, goal);

        assert_eq!(path.last(), Some(&goal));
        assert!(path.contains(&Position::new(5, 5)));
        let mut previous = start;
        for step in &path {
            assert!(map.is_walkable(*step));
            assert_eq!(previous.chebyshev_distance(*step), 1);
            previous = *step;
        }
    }

    #[test]
    fn test_crowded_cell_is_avoided_when_cheap_detour_exists() {
        let mut map = open_map(9, 5);
        map.place_entity(blocker(Position::new(4, 2))).unwrap();
        let grid = CostGrid::from_map(&map, 10);
        let path = Pathfinder::default().find_path(&grid, Position::new(2, 2), Position::new(6, 2));
        assert!(!path.is_empty());
        assert!(!path.contains(&Position::new(4, 2)));
    }

    #[test]
    fn test_crowded_corridor_is_still_passable() {
        let mut map = GameMap::new(7, 3);
        map.fill_rect(Position::new(1, 1), Position::new(5, 1), Tile::floor());
        map.place_entity(blocker(Position::new(3, 1))).unwrap();
        let grid = CostGrid::from_map(&map, 10);
        let path = Pathfinder::default().find_path(&grid, Position::new(1, 1), Position::new(5, 1));
        assert_eq!(
            path,
            vec![
                Position::new(2, 1),
                Position::new(3, 1),
                Position::new(4, 1),
                Position::new(5, 1)
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_open_grid_path_is_minimal(
            sx in 0i32..20, sy in 0i32..20, gx in 0i32..20, gy in 0i32..20
        ) {
            let grid = CostGrid::uniform(20, 20, 1);
            let start = Position::new(sx, sy);
            let goal = Position::new(gx, gy);
            let path = Pathfinder::default().find_path(&grid, start, goal);
            prop_assert_eq!(path.len() as u32, start.chebyshev_distance(goal));
            if start != goal {
                prop_assert_eq!(path.last().copied(), Some(goal));
                prop_assert!(!path.contains(&start));
            }
        }
    }
}
