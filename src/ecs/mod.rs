//! Entity Component System module
//!
//! Components entities expose to the combat engine, and the systems that run
//! over them.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{co_located, entities_at, is_down, location_of, tick_modifiers};
