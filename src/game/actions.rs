//! # Action System
//!
//! Every intent, whether it comes from the player or from a monster's AI, is
//! an [`Action`] bound to the acting entity. Resolving it mutates the game
//! state or fails with [`ActionError::Impossible`], which leaves nothing
//! half-applied and never advances the turn.

use crate::game::{Color, EntityId, GameState, ItemUse, Position};
use crate::BurrowError;
use log::debug;

/// What an action is trying to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    /// Do nothing this turn
    Wait,
    /// Leave the game
    Escape,
    /// Step by a delta onto an empty walkable cell
    Movement { delta: Position },
    /// Attack the living actor at a delta
    Melee { delta: Position },
    /// Attack if an actor is at the delta, otherwise move there
    Bump { delta: Position },
    /// Pick up an item at the actor's feet
    PickUp,
    /// Drop a carried item
    DropItem { item: EntityId },
    /// Use a carried item, optionally on a target cell
    UseItem {
        item: EntityId,
        target: Option<Position>,
    },
}

/// An intent bound to the entity performing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub actor: EntityId,
    pub kind: ActionKind,
}

/// Result of an action that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran and its effects are committed
    Performed,
    /// The player asked to leave; unwind the outer loop
    Terminate,
}

/// Failure of an action.
#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    /// The intent is invalid but foreseeable. Reported to the player and
    /// otherwise ignored.
    #[error("{0}")]
    Impossible(String),

    /// An invariant was violated. Never swallowed.
    #[error(transparent)]
    Fatal(#[from] BurrowError),
}

impl ActionError {
    pub fn impossible(reason: impl Into<String>) -> Self {
        ActionError::Impossible(reason.into())
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self, ActionError::Impossible(_))
    }
}

/// Result type for action resolution.
pub type ActionResult<T> = Result<T, ActionError>;

impl Action {
    pub fn new(actor: EntityId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn wait(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Wait)
    }

    pub fn escape(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::Escape)
    }

    pub fn movement(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Movement { delta: Position::new(dx, dy) })
    }

    pub fn melee(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Melee { delta: Position::new(dx, dy) })
    }

    /// The directional entry point used by the input layer and the AI.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{new_entity_id, Action, ActionKind, Position};
    ///
    /// let actor = new_entity_id();
    /// let action = Action::bump(actor, 1, 0);
    /// assert_eq!(action.kind, ActionKind::Bump { delta: Position::new(1, 0) });
    /// ```
    pub fn bump(actor: EntityId, dx: i32, dy: i32) -> Self {
        Self::new(actor, ActionKind::Bump { delta: Position::new(dx, dy) })
    }

    pub fn pick_up(actor: EntityId) -> Self {
        Self::new(actor, ActionKind::PickUp)
    }

    pub fn drop_item(actor: EntityId, item: EntityId) -> Self {
        Self::new(actor, ActionKind::DropItem { item })
    }

    pub fn use_item(actor: EntityId, item: EntityId, target: Option<Position>) -> Self {
        Self::new(actor, ActionKind::UseItem { item, target })
    }

    /// Resolves this action against the game state.
    pub fn perform(&self, state: &mut GameState) -> ActionResult<ActionOutcome> {
        debug!("resolving {:?} for {}", self.kind, self.actor);
        match &self.kind {
            ActionKind::Wait => {}
            ActionKind::Escape => return Ok(ActionOutcome::Terminate),
            ActionKind::Movement { delta } => self.perform_movement(state, *delta)?,
            ActionKind::Melee { delta } => self.perform_melee(state, *delta)?,
            ActionKind::Bump { delta } => {
                let destination = self.destination(state, *delta)?;
                if state.map.actor_at(destination).is_some() {
                    self.perform_melee(state, *delta)?;
                } else {
                    self.perform_movement(state, *delta)?;
                }
            }
            ActionKind::PickUp => self.perform_pick_up(state)?,
            ActionKind::DropItem { item } => state.drop_item(self.actor, *item)?,
            ActionKind::UseItem { item, target } => self.perform_use_item(state, *item, *target)?,
        }
        Ok(ActionOutcome::Performed)
    }

    fn destination(&self, state: &GameState, delta: Position) -> ActionResult<Position> {
        let entity = state
            .map
            .entity(self.actor)
            .ok_or(BurrowError::EntityNotFound(self.actor))?;
        Ok(entity.position + delta)
    }

    fn perform_movement(&self, state: &mut GameState, delta: Position) -> ActionResult<()> {
        let destination = self.destination(state, delta)?;

        if !state.map.in_bounds(destination)
            || !state.map.is_walkable(destination)
            || state.map.blocking_entity_at(destination).is_some()
        {
            return Err(ActionError::impossible("That way is blocked."));
        }

        state.map.set_entity_position(self.actor, destination)?;
        Ok(())
    }

    fn perform_melee(&self, state: &mut GameState, delta: Position) -> ActionResult<()> {
        let destination = self.destination(state, delta)?;
        let target = state
            .map
            .actor_at(destination)
            .ok_or_else(|| ActionError::impossible("Nothing to attack."))?;
        let target_id = target.id;
        let target_name = target.name.clone();
        let defender = target.require_fighter()?.clone();

        let attacker = state
            .map
            .entity(self.actor)
            .ok_or(BurrowError::EntityNotFound(self.actor))?;
        let power = attacker.require_fighter()?.power;
        let description = format!("{} attacks {}", capitalize(&attacker.name), target_name);

        let color = if self.actor == state.player_id {
            Color::PLAYER_ATTACK
        } else {
            Color::ENEMY_ATTACK
        };

        let damage = defender.damage_from(power);
        if damage > 0 {
            state.log.add_message(
                &format!("{} for {} hit points.", description, damage),
                color,
            );
            state.damage_actor(target_id, damage)?;
        } else {
            state
                .log
                .add_message(&format!("{} but does no damage.", description), color);
        }
        Ok(())
    }

    fn perform_pick_up(&self, state: &mut GameState) -> ActionResult<()> {
        let actor = state
            .map
            .entity(self.actor)
            .ok_or(BurrowError::EntityNotFound(self.actor))?;
        let position = actor.position;
        let full = actor.require_inventory()?.is_full();

        // First item in placement order wins when several share a cell.
        let item_id = state
            .map
            .items_at(position)
            .next()
            .map(|item| item.id)
            .ok_or_else(|| ActionError::impossible("There is nothing here to pick up."))?;
        if full {
            return Err(ActionError::impossible("Your inventory is full."));
        }

        let item = state
            .map
            .remove_entity(item_id)
            .ok_or(BurrowError::EntityNotFound(item_id))?;
        let name = item.name.clone();
        state
            .map
            .entity_mut(self.actor)
            .ok_or(BurrowError::EntityNotFound(self.actor))?
            .require_inventory_mut()?
            .add(item);

        state
            .log
            .add_message(&format!("You picked up the {}!", name), Color::WHITE);
        Ok(())
    }

    fn perform_use_item(
        &self,
        state: &mut GameState,
        item_id: EntityId,
        target: Option<Position>,
    ) -> ActionResult<()> {
        let item = state.carried_item(self.actor, item_id)?;
        let consumable = item
            .consumable()
            .cloned()
            .ok_or(BurrowError::MissingComponent {
                entity: item_id,
                component: "consumable",
            })?;
        let item_name = item.name.clone();
        let target = match target {
            Some(target) => target,
            None => self.destination(state, Position::new(0, 0))?,
        };

        let usage = ItemUse {
            consumer: self.actor,
            item: item_id,
            item_name,
            target,
        };
        consumable.activate(&usage, state)?;
        state.consume_item(self.actor, item_id)?;
        Ok(())
    }
}

/// Uppercases the first character of a name.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
