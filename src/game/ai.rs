//! # AI Behaviours
//!
//! Decision making for non-player actors. A behaviour only chooses an
//! [`Action`]; resolving it is the scheduler's job, the same as for the
//! player.

use crate::game::{Action, Color, Direction, EntityId, GameState, Position};
use crate::{BurrowError, BurrowResult};
use log::debug;
use rand::Rng;

/// The AI component of an actor.
#[derive(Debug, Clone, PartialEq)]
pub enum AiBehavior {
    /// Chases and attacks the player, remembering the last planned path
    Hostile { path: Vec<Position> },
    /// Stumbles in random directions, then reverts to `previous`
    Confused {
        previous: Box<AiBehavior>,
        turns_remaining: u32,
    },
    /// Never does anything
    Idle,
}

impl AiBehavior {
    /// A hostile behaviour with no planned path yet.
    pub fn hostile() -> Self {
        AiBehavior::Hostile { path: Vec::new() }
    }

    /// Wraps a behaviour in a temporary confusion.
    pub fn confused(previous: AiBehavior, turns: u32) -> Self {
        AiBehavior::Confused {
            previous: Box::new(previous),
            turns_remaining: turns,
        }
    }

    /// Chooses this turn's action for `actor`.
    ///
    /// The behaviour must not be attached to the actor while deciding; see
    /// [`GameState::decide_ai_action`].
    pub fn decide(&mut self, actor: EntityId, state: &mut GameState) -> BurrowResult<Action> {
        match self {
            AiBehavior::Idle => Ok(Action::wait(actor)),
            AiBehavior::Hostile { path } => hostile_decision(path, actor, state),
            AiBehavior::Confused {
                previous,
                turns_remaining,
            } => {
                if *turns_remaining > 0 {
                    *turns_remaining -= 1;
                    let direction = Direction::ALL[state.rng.gen_range(0..Direction::ALL.len())];
                    let delta = direction.to_delta();
                    return Ok(Action::bump(actor, delta.x, delta.y));
                }

                let restored = std::mem::replace(previous.as_mut(), AiBehavior::Idle);
                let name = state
                    .map
                    .entity(actor)
                    .ok_or(BurrowError::EntityNotFound(actor))?
                    .name
                    .clone();
                state
                    .log
                    .add_message(&format!("The {} is no longer confused.", name), Color::WHITE);
                *self = restored;
                Ok(Action::wait(actor))
            }
        }
    }
}

fn hostile_decision(
    path: &mut Vec<Position>,
    actor: EntityId,
    state: &GameState,
) -> BurrowResult<Action> {
    let position = state
        .map
        .entity(actor)
        .ok_or(BurrowError::EntityNotFound(actor))?
        .position;
    let player = state.player()?;
    if !player.is_alive() {
        path.clear();
        return Ok(Action::wait(actor));
    }
    let target = player.position;

    // The player's view doubles as the monster's: if we are seen, we see.
    if state.map.is_visible(position) {
        if let Some(direction) = Direction::between(position, target) {
            let delta = direction.to_delta();
            return Ok(Action::melee(actor, delta.x, delta.y));
        }
        *path = state.path_between(position, target);
    }

    if path.is_empty() {
        return Ok(Action::wait(actor));
    }
    let next = path.remove(0);
    let Some(direction) = Direction::between(position, next) else {
        // A blocked step left the cached path behind us.
        path.clear();
        return Ok(Action::wait(actor));
    };
    let delta = direction.to_delta();
    Ok(Action::movement(actor, delta.x, delta.y))
}

impl GameState {
    /// Asks an actor's AI for its next action.
    ///
    /// Returns `None` for actors without AI. The behaviour is detached while
    /// it decides so it can read and mutate the rest of the state, then put
    /// back with whatever it learned.
    pub fn decide_ai_action(&mut self, actor: EntityId) -> BurrowResult<Option<Action>> {
        let entity = self
            .map
            .entity_mut(actor)
            .ok_or(BurrowError::EntityNotFound(actor))?;
        let Some(mut ai) = entity.as_actor_mut().and_then(|a| a.ai.take()) else {
            return Ok(None);
        };

        let decision = ai.decide(actor, self);

        if let Some(slot) = self.map.entity_mut(actor).and_then(|e| e.as_actor_mut()) {
            slot.ai = Some(ai);
        }
        let action = decision?;
        debug!("{} decided {:?}", actor, action.kind);
        Ok(Some(action))
    }
}
