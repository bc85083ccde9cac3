//! # Entity Module
//!
//! Actors and items as plain records with optional capability components.
//!
//! An entity never points back at the map it stands on: the [`GameMap`]
//! owns placed entities and an [`Inventory`] owns carried items, so an item
//! always has exactly one owner.
//!
//! [`GameMap`]: crate::GameMap

use crate::game::{new_entity_id, AiBehavior, Color, Consumable, EntityId, Fighter, Inventory, Position};
use crate::{BurrowError, BurrowResult};

/// Draw order tiers. Higher tiers are drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// An entity placed on a map or carried in an inventory.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub color: Color,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

/// The two specializations of an entity.
#[derive(Debug, Clone)]
pub enum EntityKind {
    Actor(Actor),
    Item(Item),
}

/// Components carried by an actor.
///
/// An actor with an AI behaviour is a hostile NPC. The player has none.
/// Liveness is tracked explicitly so the death transition can fire exactly
/// once for the player and for monsters alike.
#[derive(Debug, Clone)]
pub struct Actor {
    pub fighter: Option<Fighter>,
    pub ai: Option<AiBehavior>,
    pub inventory: Option<Inventory>,
    pub(crate) alive: bool,
}

impl Actor {
    /// Creates a living actor with combat stats and nothing else.
    pub fn new(fighter: Fighter) -> Self {
        Self {
            fighter: Some(fighter),
            ai: None,
            inventory: None,
            alive: true,
        }
    }

    pub fn with_ai(mut self, ai: AiBehavior) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_inventory(mut self, capacity: usize) -> Self {
        self.inventory = Some(Inventory::new(capacity));
        self
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Components carried by an item.
#[derive(Debug, Clone)]
pub struct Item {
    pub consumable: Option<Consumable>,
}

impl Item {
    pub fn new(consumable: Option<Consumable>) -> Self {
        Self { consumable }
    }
}

impl Entity {
    /// Creates a blocking actor entity with a fresh id.
    pub fn actor(name: &str, glyph: char, color: Color, position: Position, actor: Actor) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(actor),
        }
    }

    /// Creates a non-blocking item entity with a fresh id.
    pub fn item(name: &str, glyph: char, color: Color, position: Position, item: Item) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            color,
            name: name.to_string(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item(item),
        }
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self.kind, EntityKind::Item(_))
    }

    /// True for actors that have not died. Items are never alive.
    pub fn is_alive(&self) -> bool {
        self.as_actor().map(Actor::is_alive).unwrap_or(false)
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            EntityKind::Item(item) => Some(item),
            EntityKind::Actor(_) => None,
        }
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.as_actor().and_then(|a| a.fighter.as_ref())
    }

    pub fn fighter_mut(&mut self) -> Option<&mut Fighter> {
        self.as_actor_mut().and_then(|a| a.fighter.as_mut())
    }

    pub fn ai(&self) -> Option<&AiBehavior> {
        self.as_actor().and_then(|a| a.ai.as_ref())
    }

    pub fn has_ai(&self) -> bool {
        self.ai().is_some()
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.as_actor().and_then(|a| a.inventory.as_ref())
    }

    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.as_actor_mut().and_then(|a| a.inventory.as_mut())
    }

    pub fn consumable(&self) -> Option<&Consumable> {
        self.as_item().and_then(|i| i.consumable.as_ref())
    }

    /// Gets the fighter component or reports it missing.
    pub fn require_fighter(&self) -> BurrowResult<&Fighter> {
        self.fighter().ok_or(BurrowError::MissingComponent {
            entity: self.id,
            component: "fighter",
        })
    }

    /// Gets the fighter component mutably or reports it missing.
    pub fn require_fighter_mut(&mut self) -> BurrowResult<&mut Fighter> {
        let id = self.id;
        self.fighter_mut().ok_or(BurrowError::MissingComponent {
            entity: id,
            component: "fighter",
        })
    }

    /// Gets the inventory component or reports it missing.
    pub fn require_inventory(&self) -> BurrowResult<&Inventory> {
        self.inventory().ok_or(BurrowError::MissingComponent {
            entity: self.id,
            component: "inventory",
        })
    }

    /// Gets the inventory component mutably or reports it missing.
    pub fn require_inventory_mut(&mut self) -> BurrowResult<&mut Inventory> {
        let id = self.id;
        self.inventory_mut().ok_or(BurrowError::MissingComponent {
            entity: id,
            component: "inventory",
        })
    }
}
