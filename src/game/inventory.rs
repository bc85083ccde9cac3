//! # Inventory Component
//!
//! Items carried by an actor. Capacity is checked by the pick-up action, not
//! here, because the inventory cannot see where an item is coming from.

use crate::game::{Color, Entity, EntityId, GameState};
use crate::{BurrowError, BurrowResult};
use log::debug;

/// An ordered collection of carried items.
#[derive(Debug, Clone)]
pub struct Inventory {
    pub capacity: usize,
    items: Vec<Entity>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Gets the item in the given inventory slot.
    pub fn get_index(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Takes ownership of an item.
    pub fn add(&mut self, item: Entity) {
        self.items.push(item);
    }

    /// Removes an item, handing ownership to the caller.
    pub fn take(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl GameState {
    /// Moves an item from an actor's inventory onto the map at the actor's feet.
    ///
    /// The item must be in that actor's inventory; anything else is an
    /// invariant violation.
    pub fn drop_item(&mut self, actor_id: EntityId, item_id: EntityId) -> BurrowResult<()> {
        let actor = self
            .map
            .entity_mut(actor_id)
            .ok_or(BurrowError::EntityNotFound(actor_id))?;
        let position = actor.position;
        let mut item = actor
            .require_inventory_mut()?
            .take(item_id)
            .ok_or(BurrowError::ItemNotCarried {
                actor: actor_id,
                item: item_id,
            })?;

        item.position = position;
        let name = item.name.clone();
        self.map.place_entity(item)?;
        debug!("{} dropped at ({}, {})", name, position.x, position.y);
        self.log
            .add_message(&format!("You dropped the {}.", name), Color::WHITE);
        Ok(())
    }

    /// Removes a used-up item from an actor's inventory.
    pub fn consume_item(&mut self, actor_id: EntityId, item_id: EntityId) -> BurrowResult<Entity> {
        self.map
            .entity_mut(actor_id)
            .ok_or(BurrowError::EntityNotFound(actor_id))?
            .require_inventory_mut()?
            .take(item_id)
            .ok_or(BurrowError::ItemNotCarried {
                actor: actor_id,
                item: item_id,
            })
    }

    /// Gets an item carried by an actor.
    pub fn carried_item(&self, actor_id: EntityId, item_id: EntityId) -> BurrowResult<&Entity> {
        self.map
            .entity(actor_id)
            .ok_or(BurrowError::EntityNotFound(actor_id))?
            .require_inventory()?
            .get(item_id)
            .ok_or(BurrowError::ItemNotCarried {
                actor: actor_id,
                item: item_id,
            })
    }
}
