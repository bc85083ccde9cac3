//! # Display Management
//!
//! Plain-text frame rendering for terminals and logs.

use crate::game::{GameState, Position, SHROUD};
use crate::rendering::{message_lines, status_line, Presenter};
use crate::BurrowResult;

/// Renders the game as lines of text.
///
/// Visible tiles use their lit glyph, remembered tiles their dark glyph and
/// unexplored tiles the shroud. Only entities on visible cells are drawn,
/// highest render order on top.
#[derive(Debug, Clone)]
pub struct AsciiDisplay {
    /// Map viewport offset x in tiles
    pub viewport_x: i32,
    /// Map viewport offset y in tiles
    pub viewport_y: i32,
    /// Map viewport width in tiles
    pub view_width: i32,
    /// Map viewport height in tiles
    pub view_height: i32,
    /// Number of log lines under the status line
    pub message_count: usize,
    redraw_pending: bool,
    last_player_pos: Option<Position>,
}

impl AsciiDisplay {
    /// Creates a display with a viewport of the given size.
    pub fn new(view_width: u32, view_height: u32) -> Self {
        Self {
            viewport_x: 0,
            viewport_y: 0,
            view_width: view_width as i32,
            view_height: view_height as i32,
            message_count: 5,
            redraw_pending: true,
            last_player_pos: None,
        }
    }

    /// A display whose viewport covers the whole map.
    pub fn for_state(state: &GameState) -> Self {
        Self::new(state.map.width, state.map.height)
    }

    pub fn is_redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Centers the viewport on the given position.
    pub fn center_viewport_on_position(&mut self, position: Position) {
        self.viewport_x = position.x - (self.view_width / 2);
        self.viewport_y = position.y - (self.view_height / 2);
    }

    /// Renders the complete frame and clears the pending redraw.
    pub fn render_game(&mut self, state: &GameState) -> BurrowResult<String> {
        let player_pos = state.player()?.position;
        if Some(player_pos) != self.last_player_pos {
            self.follow(state, player_pos);
            self.last_player_pos = Some(player_pos);
        }

        let mut lines = self.render_map(state);
        lines.push(status_line(state)?);
        lines.extend(message_lines(&state.log, self.message_count));
        self.redraw_pending = false;
        Ok(lines.join("\n"))
    }

    /// Keeps the player in view, without scrolling when the map fits.
    fn follow(&mut self, state: &GameState, player_pos: Position) {
        let map_width = state.map.width as i32;
        let map_height = state.map.height as i32;
        if map_width <= self.view_width && map_height <= self.view_height {
            self.viewport_x = 0;
            self.viewport_y = 0;
        } else {
            self.center_viewport_on_position(player_pos);
        }
    }

    /// Renders the map viewport, one string per row.
    pub fn render_map(&self, state: &GameState) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = (0..self.view_height)
            .map(|screen_y| {
                (0..self.view_width)
                    .map(|screen_x| {
                        let pos = Position::new(self.viewport_x + screen_x, self.viewport_y + screen_y);
                        match state.map.tile_at(pos) {
                            Some(tile) if state.map.is_visible(pos) => tile.light.glyph,
                            Some(tile) if state.map.is_explored(pos) => tile.dark.glyph,
                            _ => SHROUD.glyph,
                        }
                    })
                    .collect()
            })
            .collect();

        let mut visible: Vec<_> = state
            .map
            .entities()
            .filter(|e| state.map.is_visible(e.position))
            .collect();
        visible.sort_by_key(|e| e.render_order);
        for entity in visible {
            let x = entity.position.x - self.viewport_x;
            let y = entity.position.y - self.viewport_y;
            if x >= 0 && y >= 0 && x < self.view_width && y < self.view_height {
                rows[y as usize][x as usize] = entity.glyph;
            }
        }

        rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }
}

impl Presenter for AsciiDisplay {
    fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Color, Entity, Fighter, GameConfig, GameMap, Item, Tile};

    fn state() -> GameState {
        let mut map = GameMap::new(7, 5);
        map.fill_rect(Position::new(1, 1), Position::new(5, 3), Tile::floor());
        let player = Entity::actor(
            "Player",
            '@',
            Color::WHITE,
            Position::new(2, 2),
            Actor::new(Fighter::new(30, 2, 5)),
        );
        GameState::new(map, player, GameConfig::default()).unwrap()
    }

    #[test]
    fn test_render_small_map() {
        let mut state = state();
        state
            .map
            .place_entity(Entity::item(
                "Potion",
                '!',
                Color::WHITE,
                Position::new(4, 2),
                Item::new(None),
            ))
            .unwrap();
        let mut display = AsciiDisplay::for_state(&state);
        let frame = display.render_game(&state).unwrap();
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines[0], "#######");
        assert_eq!(lines[2], "#.@.!.#");
        assert!(lines[5].starts_with("HP: 30/30"));
        assert!(!display.is_redraw_pending());
    }

    #[test]
    fn test_actor_drawn_over_corpse_and_item() {
        let mut state = state();
        let pos = Position::new(3, 2);
        let mut corpse = Entity::actor("Rat", 'r', Color::WHITE, pos, Actor::new(Fighter::new(1, 0, 0)));
        corpse.die();
        state.map.place_entity(corpse).unwrap();
        state
            .map
            .place_entity(Entity::item("Potion", '!', Color::WHITE, pos, Item::new(None)))
            .unwrap();
        let display = AsciiDisplay::for_state(&state);
        assert_eq!(display.render_map(&state)[2], "#.@!..#");

        state.map.set_entity_position(state.player_id, pos).unwrap();
        assert_eq!(display.render_map(&state)[2], "#..@..#");
    }

    #[test]
    fn test_unexplored_is_shrouded() {
        let mut state = state();
        state.map.update_visibility(vec![Position::new(1, 1)]);
        let display = AsciiDisplay::for_state(&state);
        let rows = display.render_map(&state);
        assert_eq!(rows[1].chars().nth(1), Some('.'));
        state.map = GameMap::new(7, 5);
        let rows = display.render_map(&state);
        assert!(rows.iter().all(|row| row.trim().is_empty()));
    }

    #[test]
    fn test_request_redraw_sets_flag() {
        let state = state();
        let mut display = AsciiDisplay::for_state(&state);
        display.render_game(&state).unwrap();
        display.request_redraw();
        assert!(display.is_redraw_pending());
    }
}
