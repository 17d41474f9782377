//! Combat tuning
//!
//! Knobs the host game may override from `combat.ron`. Every field has a
//! default so partial files are fine.

use serde::{Deserialize, Serialize};

use crate::combat::check::DEFAULT_DIFFICULTY;
use crate::ecs::LocationId;

/// Tunable combat settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Turns between surviving a hit and striking back
    pub counter_attack_delay: u64,
    /// Minimum health a defeated player wakes up with at home
    pub respawn_health_floor: i32,
    /// Where defeated players go when they have no home of their own
    pub fallback_home: Option<LocationId>,
    /// Difficulty for ability checks made without an explicit target
    pub default_difficulty: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            counter_attack_delay: 1,
            respawn_health_floor: 20,
            fallback_home: None,
            default_difficulty: DEFAULT_DIFFICULTY,
        }
    }
}
