//! # Input Module
//!
//! Turns player input into fully-bound actions.
//!
//! The handler is a small mode machine. In targeting mode the next target
//! command completes the pending item use; once the player is dead only
//! quitting does anything.

pub mod commands;

pub use commands::*;

use crate::game::{Action, Color, EntityId, GameState, GameStatus};
use crate::BurrowResult;
use log::debug;

/// What the next input means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal play
    Main,
    /// Waiting for a target cell for an item
    Targeting { item: EntityId },
    /// The player has died
    GameOver,
}

/// Input handler for processing player commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pub mode: InputMode,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{InputHandler, InputMode};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.mode, InputMode::Main);
    /// ```
    pub fn new() -> Self {
        Self {
            mode: InputMode::Main,
        }
    }

    /// Converts player input to an action bound to the player.
    ///
    /// Returns `None` when the input only changed the mode or was rejected;
    /// rejections are reported through the message log.
    pub fn input_to_action(
        &mut self,
        input: PlayerInput,
        state: &mut GameState,
    ) -> BurrowResult<Option<Action>> {
        if state.status == GameStatus::PlayerDied {
            self.mode = InputMode::GameOver;
        }
        let player = state.player_id;
        let mode = self.mode;

        let action = match mode {
            InputMode::GameOver => match input {
                PlayerInput::Quit => Some(Action::escape(player)),
                _ => None,
            },
            InputMode::Targeting { item } => match input {
                PlayerInput::Target(target) => {
                    self.mode = InputMode::Main;
                    Some(Action::use_item(player, item, Some(target)))
                }
                PlayerInput::Cancel | PlayerInput::Quit => {
                    self.mode = InputMode::Main;
                    None
                }
                _ => None,
            },
            InputMode::Main => match input {
                PlayerInput::Move(direction) => {
                    let delta = direction.to_delta();
                    Some(Action::bump(player, delta.x, delta.y))
                }
                PlayerInput::Wait => Some(Action::wait(player)),
                PlayerInput::Quit => Some(Action::escape(player)),
                PlayerInput::PickUp => Some(Action::pick_up(player)),
                PlayerInput::UseItem(slot) => self.select_item_to_use(slot, state)?,
                PlayerInput::DropItem(slot) => self
                    .inventory_slot(slot, state)?
                    .map(|item| Action::drop_item(player, item)),
                PlayerInput::Target(_) | PlayerInput::Cancel | PlayerInput::ShowInventory => None,
            },
        };

        debug!("input in {:?} -> {:?}", self.mode, action.as_ref().map(|a| &a.kind));
        Ok(action)
    }

    /// Looks up an inventory slot, logging an invalid selection.
    fn inventory_slot(&self, slot: usize, state: &mut GameState) -> BurrowResult<Option<EntityId>> {
        let item = state
            .player()?
            .require_inventory()?
            .get_index(slot)
            .map(|item| item.id);
        if item.is_none() {
            state.log.add_message("Invalid entry.", Color::INVALID);
        }
        Ok(item)
    }

    fn select_item_to_use(
        &mut self,
        slot: usize,
        state: &mut GameState,
    ) -> BurrowResult<Option<Action>> {
        let Some(item) = self.inventory_slot(slot, state)? else {
            return Ok(None);
        };
        let needs_target = state
            .carried_item(state.player_id, item)?
            .consumable()
            .map(|c| c.needs_target())
            .unwrap_or(false);

        if needs_target {
            state
                .log
                .add_message("Select a target location.", Color::NEEDS_TARGET);
            self.mode = InputMode::Targeting { item };
            return Ok(None);
        }
        Ok(Some(Action::use_item(state.player_id, item, None)))
    }
}
