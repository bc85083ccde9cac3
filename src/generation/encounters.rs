//! # Encounter Generation
//!
//! The player, the monster roster, and scattering of monsters and items
//! through a room.

use crate::game::{Actor, AiBehavior, Color, Entity, Fighter, GameMap, Position};
use crate::generation::{random_item, GenerationConfig, Room};
use crate::BurrowResult;
use rand::{rngs::StdRng, Rng};

/// The player character: no AI, a backpack, and the starting stats.
pub fn spawn_player(position: Position, inventory_capacity: usize) -> Entity {
    Entity::actor(
        "Player",
        '@',
        Color::WHITE,
        position,
        Actor::new(Fighter::new(30, 2, 5)).with_inventory(inventory_capacity),
    )
}

pub fn orc(position: Position) -> Entity {
    Entity::actor(
        "Orc",
        'o',
        Color::new(63, 127, 63),
        position,
        Actor::new(Fighter::new(10, 0, 3)).with_ai(AiBehavior::hostile()),
    )
}

pub fn troll(position: Position) -> Entity {
    Entity::actor(
        "Troll",
        'T',
        Color::new(0, 127, 0),
        position,
        Actor::new(Fighter::new(16, 1, 4)).with_ai(AiBehavior::hostile()),
    )
}

/// Scatters up to the configured number of monsters and items over a room's
/// floor. A cell already holding something, or reserved for the player, is
/// skipped rather than rerolled.
pub fn populate_room(
    map: &mut GameMap,
    room: &Room,
    reserved: Position,
    config: &GenerationConfig,
    rng: &mut StdRng,
) -> BurrowResult<()> {
    let floor = room.floor_positions();
    if floor.is_empty() {
        return Ok(());
    }

    let monsters = rng.gen_range(0..=config.max_monsters_per_room);
    let items = rng.gen_range(0..=config.max_items_per_room);

    for _ in 0..monsters {
        let pos = floor[rng.gen_range(0..floor.len())];
        if pos == reserved || map.entities_at(pos).next().is_some() {
            continue;
        }
        let monster = if rng.gen_bool(0.8) { orc(pos) } else { troll(pos) };
        map.place_entity(monster)?;
    }

    for _ in 0..items {
        let pos = floor[rng.gen_range(0..floor.len())];
        if pos == reserved || map.entities_at(pos).next().is_some() {
            continue;
        }
        map.place_entity(random_item(pos, rng))?;
    }

    Ok(())
}
