//! # Consumables
//!
//! Single-use item effects. An effect either applies in full or fails with
//! [`ActionError::Impossible`] before touching anything, so the item is only
//! used up when the effect actually happened.

use crate::game::{ActionError, ActionResult, AiBehavior, Color, EntityId, GameState, Position};
use crate::BurrowError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Everything an effect needs to know about a single use.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUse {
    /// The actor using the item
    pub consumer: EntityId,
    /// The item being used
    pub item: EntityId,
    pub item_name: String,
    /// Target cell; the consumer's own cell when none was chosen
    pub target: Position,
}

/// The effect of using an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Consumable {
    /// Restores health to the consumer
    Healing { amount: i32 },
    /// Strikes the closest visible enemy
    Lightning { damage: i32, maximum_range: i32 },
    /// Makes the targeted actor stumble around for a while
    Confusion { number_of_turns: u32 },
    /// Damages every actor around the targeted cell
    Fireball { damage: i32, radius: i32 },
}

impl Consumable {
    /// True when the player must pick a target cell before using the item.
    pub fn needs_target(&self) -> bool {
        matches!(self, Consumable::Confusion { .. } | Consumable::Fireball { .. })
    }

    /// Applies the effect.
    pub fn activate(&self, usage: &ItemUse, state: &mut GameState) -> ActionResult<()> {
        debug!("{} activates {:?}", usage.item_name, self);
        match *self {
            Consumable::Healing { amount } => heal(usage, state, amount),
            Consumable::Lightning {
                damage,
                maximum_range,
            } => lightning(usage, state, damage, maximum_range),
            Consumable::Confusion { number_of_turns } => confuse(usage, state, number_of_turns),
            Consumable::Fireball { damage, radius } => fireball(usage, state, damage, radius),
        }
    }
}

fn heal(usage: &ItemUse, state: &mut GameState, amount: i32) -> ActionResult<()> {
    let recovered = state.heal_actor(usage.consumer, amount)?;
    if recovered <= 0 {
        return Err(ActionError::impossible("Your health is already full."));
    }
    state.log.add_message(
        &format!(
            "You consume the {}, and recover {} HP!",
            usage.item_name, recovered
        ),
        Color::HEALTH_RECOVERED,
    );
    Ok(())
}

fn lightning(
    usage: &ItemUse,
    state: &mut GameState,
    damage: i32,
    maximum_range: i32,
) -> ActionResult<()> {
    let origin = state
        .map
        .entity(usage.consumer)
        .ok_or(BurrowError::EntityNotFound(usage.consumer))?
        .position;

    // Ties go to the actor placed first.
    let mut closest = None;
    let mut closest_distance = maximum_range as f64 + 1.0;
    for actor in state.map.living_actors() {
        if actor.id == usage.consumer || !state.map.is_visible(actor.position) {
            continue;
        }
        let distance = origin.euclidean_distance(actor.position);
        if distance < closest_distance {
            closest = Some((actor.id, actor.name.clone()));
            closest_distance = distance;
        }
    }

    let (target, name) =
        closest.ok_or_else(|| ActionError::impossible("No enemy is close enough to strike."))?;
    state.log.add_message(
        &format!(
            "A lightning bolt strikes the {} with a loud thunder, for {} damage!",
            name, damage
        ),
        Color::WHITE,
    );
    state.damage_actor(target, damage)?;
    Ok(())
}

fn confuse(usage: &ItemUse, state: &mut GameState, number_of_turns: u32) -> ActionResult<()> {
    if !state.map.is_visible(usage.target) {
        return Err(ActionError::impossible(
            "You cannot target an area that you cannot see.",
        ));
    }
    let target = state
        .map
        .actor_at(usage.target)
        .ok_or_else(|| ActionError::impossible("You must select an enemy to target."))?;
    if target.id == usage.consumer {
        return Err(ActionError::impossible("You cannot confuse yourself!"));
    }
    let target_id = target.id;
    let name = target.name.clone();

    state.log.add_message(
        &format!(
            "The eyes of the {} look vacant, as it starts to stumble around!",
            name
        ),
        Color::STATUS_EFFECT_APPLIED,
    );

    let actor = state
        .map
        .entity_mut(target_id)
        .and_then(|e| e.as_actor_mut())
        .ok_or(BurrowError::EntityNotFound(target_id))?;
    let previous = actor.ai.take().unwrap_or(AiBehavior::Idle);
    actor.ai = Some(AiBehavior::confused(previous, number_of_turns));
    Ok(())
}

fn fireball(usage: &ItemUse, state: &mut GameState, damage: i32, radius: i32) -> ActionResult<()> {
    if !state.map.is_visible(usage.target) {
        return Err(ActionError::impossible(
            "You cannot target an area that you cannot see.",
        ));
    }

    let targets: Vec<(EntityId, String)> = state
        .map
        .living_actors()
        .filter(|actor| actor.position.euclidean_distance(usage.target) <= radius as f64)
        .map(|actor| (actor.id, actor.name.clone()))
        .collect();
    if targets.is_empty() {
        return Err(ActionError::impossible("There are no targets in the radius."));
    }

    for (id, name) in targets {
        state.log.add_message(
            &format!(
                "The {} is engulfed in a fiery explosion, taking {} damage!",
                name, damage
            ),
            Color::WHITE,
        );
        state.damage_actor(id, damage)?;
    }
    Ok(())
}
