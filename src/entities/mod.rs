//! Entity creation

pub mod opponents;
pub mod player;

pub use opponents::spawn_opponent;
pub use player::spawn_player;
