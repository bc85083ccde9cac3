//! # Item Generation
//!
//! Factories for the consumables found lying around the dungeon.

use crate::game::{Color, Consumable, Entity, Item, Position};
use rand::{rngs::StdRng, Rng};

pub fn health_potion(position: Position) -> Entity {
    Entity::item(
        "Health Potion",
        '!',
        Color::new(127, 0, 255),
        position,
        Item::new(Some(Consumable::Healing { amount: 4 })),
    )
}

pub fn lightning_scroll(position: Position) -> Entity {
    Entity::item(
        "Lightning Scroll",
        '~',
        Color::new(255, 255, 0),
        position,
        Item::new(Some(Consumable::Lightning {
            damage: 20,
            maximum_range: 5,
        })),
    )
}

pub fn confusion_scroll(position: Position) -> Entity {
    Entity::item(
        "Confusion Scroll",
        '~',
        Color::new(207, 63, 255),
        position,
        Item::new(Some(Consumable::Confusion { number_of_turns: 10 })),
    )
}

pub fn fireball_scroll(position: Position) -> Entity {
    Entity::item(
        "Fireball Scroll",
        '~',
        Color::new(255, 0, 0),
        position,
        Item::new(Some(Consumable::Fireball {
            damage: 12,
            radius: 3,
        })),
    )
}

/// Rolls a random item: mostly potions, the rest split between scrolls.
pub fn random_item(position: Position, rng: &mut StdRng) -> Entity {
    let roll: f64 = rng.gen();
    if roll < 0.7 {
        health_potion(position)
    } else if roll < 0.8 {
        fireball_scroll(position)
    } else if roll < 0.9 {
        confusion_scroll(position)
    } else {
        lightning_scroll(position)
    }
}
