//! # Command Definitions
//!
//! Text commands and the sources that produce them.
//!
//! Commands are short tokens so a whole session can be scripted:
//! `"l; l; g; i 0; t 12 7; q"`.

use crate::game::{Direction, Position};
use std::collections::VecDeque;
use std::io::BufRead;

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move or attack in a direction
    Move(Direction),
    /// Wait/rest for one turn
    Wait,
    /// Quit the game, or leave targeting mode
    Quit,
    /// Pick up item at current position
    PickUp,
    /// Use the item in an inventory slot
    UseItem(usize),
    /// Drop the item in an inventory slot
    DropItem(usize),
    /// Choose a target cell
    Target(Position),
    /// Cancel current action
    Cancel,
    /// Show inventory
    ShowInventory,
}

impl PlayerInput {
    /// Parses a single command. Returns `None` for anything unrecognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Direction, PlayerInput, Position};
    ///
    /// assert_eq!(PlayerInput::parse("k"), Some(PlayerInput::Move(Direction::North)));
    /// assert_eq!(PlayerInput::parse("i 2"), Some(PlayerInput::UseItem(2)));
    /// assert_eq!(PlayerInput::parse("t 4 9"), Some(PlayerInput::Target(Position::new(4, 9))));
    /// assert_eq!(PlayerInput::parse("xyzzy"), None);
    /// ```
    pub fn parse(command: &str) -> Option<PlayerInput> {
        let mut parts = command.split_whitespace();
        let head = parts.next()?;
        let args: Vec<&str> = parts.collect();

        if let (Some(direction), []) = (Direction::from_key(head), args.as_slice()) {
            return Some(PlayerInput::Move(direction));
        }

        let input = match (head, args.as_slice()) {
            (".", []) | ("wait", []) => PlayerInput::Wait,
            ("g", []) | (",", []) => PlayerInput::PickUp,
            ("inv", []) => PlayerInput::ShowInventory,
            ("c", []) => PlayerInput::Cancel,
            ("q", []) | ("esc", []) => PlayerInput::Quit,
            ("i", [slot]) => PlayerInput::UseItem(slot.parse().ok()?),
            ("d", [slot]) => PlayerInput::DropItem(slot.parse().ok()?),
            ("t", [x, y]) => PlayerInput::Target(Position::new(x.parse().ok()?, y.parse().ok()?)),
            _ => return None,
        };
        Some(input)
    }
}

/// Splits a script into commands on `;` and newlines, dropping blanks.
pub fn split_script(script: &str) -> Vec<String> {
    script
        .split(|c: char| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Where raw commands come from.
pub trait InputSource {
    /// The next raw command, or `None` when input is exhausted.
    fn next_command(&mut self) -> Option<String>;
}

/// A fixed list of commands.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the input from a `;`/newline separated script.
    pub fn from_script(script: &str) -> Self {
        Self::new(split_script(script))
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> Option<String> {
        self.commands.pop_front()
    }
}

/// Commands read line by line from a reader such as stdin.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_command(&mut self) -> Option<String> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Some(line.to_string());
                    }
                }
            }
        }
    }
}
