//! # Grid Mathematics
//!
//! Line drawing and distance helpers on the integer tile grid.

use crate::game::Position;

/// Returns every cell on the Bresenham line from `from` to `to`, both ends
/// included.
///
/// # Examples
///
/// ```
/// use burrow::{bresenham_line, Position};
///
/// let line = bresenham_line(Position::new(0, 0), Position::new(3, 1));
/// assert_eq!(line.first(), Some(&Position::new(0, 0)));
/// assert_eq!(line.last(), Some(&Position::new(3, 1)));
/// assert_eq!(line.len(), 4);
/// ```
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut err = dx + dy;
    let mut current = from;
    let mut line = Vec::with_capacity((dx.max(-dy) + 1) as usize);

    loop {
        line.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }
    line
}

/// Cheapest cost of an unobstructed 8-directional walk between two cells
/// where every cell costs 1.
///
/// A diagonal is never priced above two cardinal steps, since a walker can
/// always replace one with the other.
pub fn octile_distance(from: Position, to: Position, cardinal: u32, diagonal: u32) -> u32 {
    let dx = (from.x - to.x).unsigned_abs();
    let dy = (from.y - to.y).unsigned_abs();
    let diagonal = diagonal.min(cardinal.saturating_mul(2));
    let (short, long) = if dx < dy { (dx, dy) } else { (dy, dx) };
    diagonal
        .saturating_mul(short)
        .saturating_add(cardinal.saturating_mul(long - short))
}
