//! # Session
//!
//! Drives the turn loop from a stream of text commands. This is what the
//! binary runs, and it is equally usable headless from tests.

use crate::game::{GameState, GameStatus, TurnOutcome};
use crate::input::{InputHandler, InputSource, PlayerInput};
use crate::rendering::{inventory_lines, AsciiDisplay, Presenter};
use crate::BurrowResult;
use log::{debug, info};
use std::io::Write;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Commands read from the input source
    pub commands: usize,
    /// Rounds that advanced the game
    pub turns: u64,
    pub status: GameStatus,
    /// True if the player asked to leave, false if input ran out
    pub escaped: bool,
}

/// A game in progress together with its input and presentation state.
#[derive(Debug)]
pub struct Session {
    pub state: GameState,
    pub handler: InputHandler,
    pub display: AsciiDisplay,
    show_inventory: bool,
}

impl Session {
    /// Wraps a game state with a display sized to its map.
    pub fn new(state: GameState) -> Self {
        let display = AsciiDisplay::for_state(&state);
        Self {
            state,
            handler: InputHandler::new(),
            display,
            show_inventory: false,
        }
    }

    /// Feeds one text command through the input handler and, if it produced
    /// an action, through the turn scheduler.
    ///
    /// Returns `None` when no round was attempted.
    pub fn step(&mut self, command: &str) -> BurrowResult<Option<TurnOutcome>> {
        let Some(input) = PlayerInput::parse(command) else {
            debug!("ignoring unknown command {:?}", command);
            return Ok(None);
        };

        if input == PlayerInput::ShowInventory {
            self.show_inventory = true;
            self.display.request_redraw();
            return Ok(None);
        }

        match self.handler.input_to_action(input, &mut self.state)? {
            Some(action) => {
                let outcome = self.state.handle_player_action(&action, &mut self.display)?;
                if outcome == TurnOutcome::NotAdvanced {
                    // The log gained a line.
                    self.display.request_redraw();
                }
                Ok(Some(outcome))
            }
            None => {
                self.display.request_redraw();
                Ok(None)
            }
        }
    }

    /// Renders the current frame, with the inventory appended if it was asked for.
    pub fn frame(&mut self) -> BurrowResult<String> {
        let mut frame = self.display.render_game(&self.state)?;
        if self.show_inventory {
            self.show_inventory = false;
            frame.push_str("\nInventory:");
            for line in inventory_lines(self.state.player()?) {
                frame.push('\n');
                frame.push_str(&line);
            }
        }
        Ok(frame)
    }

    /// Runs until the player escapes or the input runs dry, then writes the
    /// final frame. With `show_frames`, every pending redraw is written too.
    pub fn run<S, W>(&mut self, input: &mut S, out: &mut W, show_frames: bool) -> BurrowResult<SessionSummary>
    where
        S: InputSource + ?Sized,
        W: Write,
    {
        let mut commands = 0;
        let mut escaped = false;

        if show_frames {
            writeln!(out, "{}\n", self.frame()?)?;
        }

        while let Some(command) = input.next_command() {
            commands += 1;
            if self.step(&command)? == Some(TurnOutcome::Terminate) {
                escaped = true;
                break;
            }
            if show_frames && self.display.is_redraw_pending() {
                writeln!(out, "{}\n", self.frame()?)?;
            }
        }

        writeln!(out, "{}", self.frame()?)?;
        info!(
            "session ended after {} commands and {} turns",
            commands, self.state.turn_number
        );

        Ok(SessionSummary {
            commands,
            turns: self.state.turn_number,
            status: self.state.status,
            escaped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Actor, Color, Entity, Fighter, GameConfig, GameMap, Position, Tile};
    use crate::generation::health_potion;
    use crate::input::ScriptedInput;

    fn session() -> Session {
        let mut map = GameMap::new(8, 6);
        map.fill_rect(Position::new(1, 1), Position::new(6, 4), Tile::floor());
        let player = Entity::actor(
            "Player",
            '@',
            Color::WHITE,
            Position::new(2, 2),
            Actor::new(Fighter::new(30, 2, 5)).with_inventory(26),
        );
        Session::new(GameState::new(map, player, GameConfig::default()).unwrap())
    }

    #[test]
    fn test_step_moves_player() {
        let mut session = session();
        assert_eq!(session.step("l").unwrap(), Some(TurnOutcome::Advanced));
        assert_eq!(session.state.player().unwrap().position, Position::new(3, 2));
        assert_eq!(session.step("zzz").unwrap(), None);
    }

    #[test]
    fn test_run_stops_on_escape() {
        let mut session = session();
        let mut input = ScriptedInput::from_script("l; l; q; l");
        let mut out = Vec::new();

        let summary = session.run(&mut input, &mut out, false).unwrap();
        assert!(summary.escaped);
        assert_eq!(summary.commands, 3);
        assert_eq!(summary.turns, 2);
        assert_eq!(input.remaining(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("#...@..#"));
    }

    #[test]
    fn test_run_shows_frames_and_inventory() {
        let mut session = session();
        session
            .state
            .map
            .place_entity(health_potion(Position::new(3, 2)))
            .unwrap();
        let mut input = ScriptedInput::from_script("l; g; inv");
        let mut out = Vec::new();

        let summary = session.run(&mut input, &mut out, true).unwrap();
        assert!(!summary.escaped);
        assert_eq!(summary.status, GameStatus::Playing);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("You picked up the Health Potion!"));
        assert!(text.contains("(0) Health Potion"));
    }
}
