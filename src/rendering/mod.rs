//! # Rendering Module
//!
//! Presentation collaborator. The core only ever tells it that a redraw is
//! due; how a frame looks is entirely up to the implementation.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

/// Receiver of redraw requests from the turn scheduler.
pub trait Presenter {
    /// Called once at the end of every round that advanced the game.
    fn request_redraw(&mut self);
}

/// A presenter that only counts redraw requests.
///
/// Useful for headless runs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawCounter {
    pub redraws: u32,
}

impl Presenter for RedrawCounter {
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
