//! Skirmish - character attributes and turn-based combat resolution
//!
//! Actors carry a catalog-driven attribute set, gain experience and levels,
//! make ability checks, and trade blows through a resolver that defers
//! counter-attacks to a later turn.

pub mod attributes;
pub mod combat;
pub mod data;
pub mod dice;
pub mod ecs;
pub mod entities;
pub mod error;
pub mod game;
pub mod items;
pub mod progression;

// Re-export commonly used types
pub use attributes::{AttributeModifier, AttributeSet};
pub use combat::{CombatOutcome, CombatResolver};
pub use dice::{Dice, ScriptedDice};
pub use ecs::components::*;
pub use error::{AttributeError, Result};
