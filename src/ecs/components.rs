//! ECS Components
//!
//! Capabilities an entity can expose to the combat engine. Combat checks for
//! a component's presence and falls back to documented defaults when it is
//! missing, so sparsely equipped entities still take part.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::DamageHandler;
use crate::items::LootTable;

// ============================================================================
// Placement
// ============================================================================

/// Identifier of a room/area owned by the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub u32);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an entity currently is. Entities without one are detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location(pub LocationId);

/// Where a durable actor returns to after defeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home(pub LocationId);

// ============================================================================
// Identity & Naming
// ============================================================================

/// Name component for entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks a durable, player-controlled actor. Defeat sends it home instead of
/// removing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// A disposable opponent
#[derive(Debug, Clone)]
pub struct Opponent {
    /// Template key, also used for victory bookkeeping
    pub key: String,
    /// Items that may drop on defeat
    pub loot_table: LootTable,
}

impl Opponent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            loot_table: LootTable::default(),
        }
    }

    pub fn with_loot(mut self, loot_table: LootTable) -> Self {
        self.loot_table = loot_table;
        self
    }
}

// ============================================================================
// Combat capabilities
// ============================================================================

/// Strikes back after surviving an attack
#[derive(Debug, Clone, Copy, Default)]
pub struct Retaliates;

/// Explicit defense rating. Raises the hit threshold and reduces damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense(pub i32);

/// Flat base damage for attackers without attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackPower(pub i32);

impl Default for AttackPower {
    fn default() -> Self {
        Self(5)
    }
}

/// Health pool for entities that carry no attribute set
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current.max(0));
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Custom damage handling for an entity. Only consulted when the entity also
/// carries an `AttributeSet`.
pub struct DamageHandling(pub Box<dyn DamageHandler>);

impl DamageHandling {
    pub fn new(handler: impl DamageHandler + 'static) -> Self {
        Self(Box::new(handler))
    }
}

impl fmt::Debug for DamageHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DamageHandling").field(&self.0.label()).finish()
    }
}

// ============================================================================
// Bookkeeping
// ============================================================================

/// Per-entity tally of defeated opponents, keyed by opponent key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatVictories(pub HashMap<String, u32>);

impl CombatVictories {
    /// Record a victory and return the new count for that key
    pub fn record(&mut self, key: &str) -> u32 {
        let count = self.0.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

/// An item lying in the world, spawned from a loot roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub key: String,
    /// Key of the opponent that dropped it
    pub dropped_by: String,
}
