//! # Turn Scheduler
//!
//! One round is the player's action followed by every hostile actor's, in
//! map insertion order. A player action that turns out to be impossible ends
//! the round on the spot: nothing else acts and the turn counter stays put.

use crate::game::{Action, ActionError, ActionOutcome, Color, EntityId, GameState};
use crate::rendering::Presenter;
use crate::BurrowResult;
use log::{debug, info};

/// What a round amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player acted, the enemies answered, FOV was refreshed
    Advanced,
    /// The player's action was impossible; nothing changed but the log
    NotAdvanced,
    /// Stop the outer loop
    Terminate,
}

impl GameState {
    /// Runs a full round starting with the player's action.
    ///
    /// Invariant violations from any actor are returned as errors and end
    /// the round where they happened.
    pub fn handle_player_action(
        &mut self,
        action: &Action,
        presenter: &mut dyn Presenter,
    ) -> BurrowResult<TurnOutcome> {
        match action.perform(self) {
            Ok(ActionOutcome::Performed) => {}
            Ok(ActionOutcome::Terminate) => {
                info!("player asked to leave on turn {}", self.turn_number);
                return Ok(TurnOutcome::Terminate);
            }
            Err(ActionError::Impossible(reason)) => {
                debug!("player action impossible: {}", reason);
                self.log.add_message(&reason, Color::IMPOSSIBLE);
                return Ok(TurnOutcome::NotAdvanced);
            }
            Err(ActionError::Fatal(err)) => return Err(err),
        }

        if self.handle_enemy_turns()? == ActionOutcome::Terminate {
            return Ok(TurnOutcome::Terminate);
        }

        self.update_fov()?;
        self.turn_number += 1;
        debug!("turn {} complete", self.turn_number);
        presenter.request_redraw();
        Ok(TurnOutcome::Advanced)
    }

    /// Lets every non-player actor with an AI decide and act once.
    ///
    /// One actor's impossible action never stops the ones after it.
    pub fn handle_enemy_turns(&mut self) -> BurrowResult<ActionOutcome> {
        let player_id = self.player_id;
        let hostiles: Vec<EntityId> = self
            .map
            .entities()
            .filter(|e| e.id != player_id && e.has_ai())
            .map(|e| e.id)
            .collect();

        for id in hostiles {
            // Killed earlier this round.
            let Some(action) = self.decide_ai_action(id)? else {
                continue;
            };
            match action.perform(self) {
                Ok(ActionOutcome::Performed) => {}
                Ok(ActionOutcome::Terminate) => return Ok(ActionOutcome::Terminate),
                Err(ActionError::Impossible(reason)) => {
                    debug!("{} could not act: {}", id, reason);
                }
                Err(ActionError::Fatal(err)) => return Err(err),
            }
        }
        Ok(ActionOutcome::Performed)
    }
}
