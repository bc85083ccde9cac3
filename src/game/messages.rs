//! # Message Log
//!
//! Human-readable event text produced by the core.

use crate::config;
use crate::game::Color;
use std::collections::VecDeque;

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub color: Color,
    pub repeat_count: u32,
}

impl Message {
    pub fn new(text: &str, color: Color) -> Self {
        Self {
            text: text.to_string(),
            color,
            repeat_count: 1,
        }
    }

    /// The text including the repeat count when it has stacked.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Color, Message};
    ///
    /// let mut message = Message::new("The orc hits you.", Color::WHITE);
    /// assert_eq!(message.full_text(), "The orc hits you.");
    /// message.repeat_count = 3;
    /// assert_eq!(message.full_text(), "The orc hits you. (x3)");
    /// ```
    pub fn full_text(&self) -> String {
        if self.repeat_count > 1 {
            format!("{} (x{})", self.text, self.repeat_count)
        } else {
            self.text.clone()
        }
    }
}

/// Receiver of event text.
pub trait MessageSink {
    /// Appends a message. With `stack` set, text identical to the previous
    /// entry increments that entry's repeat count instead.
    fn append(&mut self, text: &str, color: Color, stack: bool);
}

/// A bounded, stacking message log.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::with_capacity(config::DEFAULT_MESSAGE_CAPACITY)
    }

    /// Creates a log that keeps at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends a stacking message.
    pub fn add_message(&mut self, text: &str, color: Color) {
        self.append(text, color, true);
    }

    pub fn messages(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.back()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for MessageLog {
    fn append(&mut self, text: &str, color: Color, stack: bool) {
        if stack {
            if let Some(last) = self.messages.back_mut() {
                if last.text == text {
                    last.repeat_count += 1;
                    return;
                }
            }
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message::new(text, color));
    }
}
