//! Loot generation system
//!
//! Drop tables roll every entry independently, and drops are placed into the
//! world through a [`LootSpawner`].

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::ecs::{Location, LocationId, LootDrop, Name};

/// One possible drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Item key handed to the spawner
    pub key: String,
    /// Probability in [0, 1) that this entry drops
    pub chance: f64,
}

/// Independent drop chances keyed by item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LootTable(pub Vec<LootEntry>);

impl LootTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; the chance is clamped into [0, 1]
    pub fn with(mut self, key: impl Into<String>, chance: f64) -> Self {
        self.0.push(LootEntry {
            key: key.into(),
            chance: chance.clamp(0.0, 1.0),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.0
    }

    /// Roll every entry once, returning the keys that dropped in table order
    pub fn roll(&self, dice: &mut impl Dice) -> Vec<String> {
        self.0
            .iter()
            .filter(|entry| dice.chance() < entry.chance)
            .map(|entry| entry.key.clone())
            .collect()
    }
}

/// Places dropped items into the world
pub trait LootSpawner {
    /// Instantiate `key` at `at`, returning the new entity if one was created
    fn spawn_loot(
        &mut self,
        world: &mut World,
        key: &str,
        dropped_by: &str,
        at: Option<LocationId>,
    ) -> Option<Entity>;
}

/// Spawns each drop as a named `LootDrop` entity
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldLootSpawner;

impl LootSpawner for WorldLootSpawner {
    fn spawn_loot(
        &mut self,
        world: &mut World,
        key: &str,
        dropped_by: &str,
        at: Option<LocationId>,
    ) -> Option<Entity> {
        let drop = LootDrop {
            key: key.to_string(),
            dropped_by: dropped_by.to_string(),
        };
        let entity = world.spawn((Name::new(key), drop));
        if let Some(location) = at {
            let _ = world.insert_one(entity, Location(location));
        }
        Some(entity)
    }
}
