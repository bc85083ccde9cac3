//! # Field of View
//!
//! The core only consumes the visible set; how it is computed is behind the
//! [`FovEngine`] trait so a shadowcasting or permissive implementation can be
//! swapped in without touching the scheduler.

use crate::game::{GameMap, Position};
use crate::utils::bresenham_line;
use log::trace;
use std::collections::HashSet;

/// Computes the cells visible from a viewpoint.
pub trait FovEngine: std::fmt::Debug {
    /// Returns every cell visible from `origin` within `radius`.
    ///
    /// Opaque cells that are seen (walls) are part of the result; cells
    /// behind them are not.
    fn compute(&self, map: &GameMap, origin: Position, radius: i32) -> HashSet<Position>;
}

/// Casts a Bresenham ray to every cell inside a circular radius.
///
/// A cell is visible when every cell strictly between the origin and it is
/// transparent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaycastFov;

impl RaycastFov {
    pub fn new() -> Self {
        Self
    }

    fn has_line_of_sight(map: &GameMap, origin: Position, target: Position) -> bool {
        let line = bresenham_line(origin, target);
        if line.len() <= 2 {
            return true;
        }
        line[1..line.len() - 1]
            .iter()
            .all(|pos| map.is_transparent(*pos))
    }
}

impl FovEngine for RaycastFov {
    fn compute(&self, map: &GameMap, origin: Position, radius: i32) -> HashSet<Position> {
        let mut visible = HashSet::new();
        if !map.in_bounds(origin) {
            return visible;
        }
        visible.insert(origin);

        let radius = radius.max(0);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let target = Position::new(origin.x + dx, origin.y + dy);
                if !map.in_bounds(target) || origin.euclidean_distance(target) > radius as f64 {
                    continue;
                }
                if Self::has_line_of_sight(map, origin, target) {
                    visible.insert(target);
                }
            }
        }

        trace!(
            "fov from ({}, {}) radius {}: {} cells",
            origin.x,
            origin.y,
            radius,
            visible.len()
        );
        visible
    }
}
