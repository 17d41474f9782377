//! Item system

pub mod loot;
pub mod weapon;

pub use loot::{LootEntry, LootSpawner, LootTable, WorldLootSpawner};
pub use weapon::{Weapon, WeaponStyle};
