//! # Colours
//!
//! RGB colours used by tiles, entities and the message log.

use serde::{Deserialize, Serialize};

/// An RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a colour from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const PLAYER_ATTACK: Color = Color::new(0xE0, 0xE0, 0xE0);
    pub const ENEMY_ATTACK: Color = Color::new(0xFF, 0xC0, 0xC0);
    pub const NEEDS_TARGET: Color = Color::new(0x3F, 0xFF, 0xFF);
    pub const STATUS_EFFECT_APPLIED: Color = Color::new(0x3F, 0xFF, 0x3F);

    pub const PLAYER_DIE: Color = Color::new(0xFF, 0x30, 0x30);
    pub const ENEMY_DIE: Color = Color::new(0xFF, 0xA0, 0x30);

    pub const INVALID: Color = Color::new(0xFF, 0xFF, 0x00);
    pub const IMPOSSIBLE: Color = Color::new(0x80, 0x80, 0x80);

    pub const WELCOME_TEXT: Color = Color::new(0x20, 0xA0, 0xFF);
    pub const HEALTH_RECOVERED: Color = Color::new(0x00, 0xFF, 0x00);

    /// Colour given to every corpse.
    pub const CORPSE: Color = Color::new(191, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}
