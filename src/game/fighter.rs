//! # Fighter Component
//!
//! Combat stats and the one-way Alive → Dead transition.

use crate::game::{Color, Entity, EntityId, GameState, GameStatus, RenderOrder};
use crate::{BurrowError, BurrowResult};
use log::info;

/// Glyph drawn for every corpse.
pub const CORPSE_GLYPH: char = '%';

/// Combat stats of an actor.
///
/// `health` always stays within `0..=max_health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    pub max_health: i32,
    health: i32,
    pub defence: i32,
    pub power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub fn new(max_health: i32, defence: i32, power: i32) -> Self {
        let max_health = max_health.max(0);
        Self {
            max_health,
            health: max_health,
            defence,
            power,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    /// Sets health clamped to `0..=max_health` and returns the stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::Fighter;
    ///
    /// let mut fighter = Fighter::new(10, 0, 1);
    /// assert_eq!(fighter.set_health(15), 10);
    /// assert_eq!(fighter.set_health(-3), 0);
    /// ```
    pub fn set_health(&mut self, value: i32) -> i32 {
        self.health = value.clamp(0, self.max_health);
        self.health
    }

    /// Restores up to `amount` health and returns how much was restored.
    ///
    /// Returns 0 when already at full health.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.health == self.max_health {
            return 0;
        }
        let before = self.health;
        self.set_health(before.saturating_add(amount.max(0)));
        self.health - before
    }

    /// Damage this fighter takes from a blow of the given power. Never negative.
    pub fn damage_from(&self, power: i32) -> i32 {
        power.saturating_sub(self.defence).max(0)
    }
}

impl Entity {
    /// Turns a living actor into an inert corpse.
    ///
    /// Returns false without touching anything when the entity is not a
    /// living actor, so the transition can only ever run once.
    pub fn die(&mut self) -> bool {
        let Some(actor) = self.as_actor_mut() else {
            return false;
        };
        if !actor.alive {
            return false;
        }
        actor.alive = false;
        actor.ai = None;

        self.glyph = CORPSE_GLYPH;
        self.color = Color::CORPSE;
        self.blocks_movement = false;
        self.name = format!("remains of {}", self.name);
        self.render_order = RenderOrder::Corpse;
        true
    }
}

impl GameState {
    /// Sets an actor's health, running the death transition when it reaches 0.
    pub fn set_actor_health(&mut self, id: EntityId, value: i32) -> BurrowResult<()> {
        let is_player = id == self.player_id;
        let entity = self
            .map
            .entity_mut(id)
            .ok_or(BurrowError::EntityNotFound(id))?;
        let health = entity.require_fighter_mut()?.set_health(value);
        if health > 0 {
            return Ok(());
        }

        let name = entity.name.clone();
        if !entity.die() {
            return Ok(());
        }

        info!("{} died", name);
        if is_player {
            self.status = GameStatus::PlayerDied;
            self.log.add_message("You died!", Color::PLAYER_DIE);
        } else {
            self.log
                .add_message(&format!("{} is dead!", name), Color::ENEMY_DIE);
        }
        Ok(())
    }

    /// Lowers an actor's health by `amount`.
    pub fn damage_actor(&mut self, id: EntityId, amount: i32) -> BurrowResult<()> {
        let health = self
            .map
            .entity(id)
            .ok_or(BurrowError::EntityNotFound(id))?
            .require_fighter()?
            .health();
        self.set_actor_health(id, health.saturating_sub(amount))
    }

    /// Heals an actor and returns the amount actually restored.
    pub fn heal_actor(&mut self, id: EntityId, amount: i32) -> BurrowResult<i32> {
        let entity = self
            .map
            .entity_mut(id)
            .ok_or(BurrowError::EntityNotFound(id))?;
        Ok(entity.require_fighter_mut()?.heal(amount))
    }
}
