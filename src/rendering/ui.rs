//! # User Interface Elements
//!
//! Text widgets for the status line, message area and inventory listing.

use crate::game::{Entity, GameState, MessageLog};
use crate::BurrowResult;

/// Renders a fixed-width health bar such as `HP: 20/30 [######   ]`.
///
/// # Examples
///
/// ```
/// use burrow::health_bar;
///
/// assert_eq!(health_bar(5, 10, 4), "HP: 5/10 [##  ]");
/// assert_eq!(health_bar(0, 10, 4), "HP: 0/10 [    ]");
/// ```
pub fn health_bar(current: i32, maximum: i32, width: usize) -> String {
    let filled = if maximum > 0 {
        (current.clamp(0, maximum) as usize * width) / maximum as usize
    } else {
        0
    };
    format!(
        "HP: {}/{} [{}{}]",
        current,
        maximum,
        "#".repeat(filled),
        " ".repeat(width - filled)
    )
}

/// The status line shown under the map.
pub fn status_line(state: &GameState) -> BurrowResult<String> {
    let player = state.player()?;
    let fighter = player.require_fighter()?;
    Ok(format!(
        "{}  Turn: {}",
        health_bar(fighter.health(), fighter.max_health, 20),
        state.turn_number
    ))
}

/// The most recent `count` messages, oldest first.
pub fn message_lines(log: &MessageLog, count: usize) -> Vec<String> {
    let mut lines: Vec<String> = log.messages().rev().take(count).map(|m| m.full_text()).collect();
    lines.reverse();
    lines
}

/// One line per carried item, keyed `0`, `1`, ... in slot order.
pub fn inventory_lines(actor: &Entity) -> Vec<String> {
    match actor.inventory() {
        Some(inventory) if !inventory.is_empty() => inventory
            .items()
            .enumerate()
            .map(|(slot, item)| format!("({}) {}", slot, item.name))
            .collect(),
        _ => vec!["(empty)".to_string()],
    }
}
