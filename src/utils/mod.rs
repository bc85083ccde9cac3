//! # Utilities Module
//!
//! Grid geometry, cost-weighted pathfinding and field of view.

pub mod fov;
pub mod math;
pub mod navigation;

pub use fov::*;
pub use math::*;
pub use navigation::*;
