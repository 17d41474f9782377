//! Opponent templates for data-driven opponent creation
//!
//! Loaded from `opponents.ron` and used by [`crate::entities::spawn_opponent`].

use serde::{Deserialize, Serialize};

use crate::items::LootTable;

fn default_level() -> i32 {
    1
}

/// A template for creating opponents from external data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentTemplate {
    /// Unique key, also used for victory bookkeeping
    pub key: String,
    /// Display name
    pub name: String,
    /// Explicit defense rating
    pub defense: i32,
    /// Flat damage when the opponent has no strength to roll with
    pub attack_power: i32,
    /// Starting and maximum health
    pub health: i32,
    /// Level the attribute scaling starts from
    #[serde(default = "default_level")]
    pub level: i32,
    /// Whether the opponent strikes back after surviving a hit
    #[serde(default)]
    pub retaliates: bool,
    #[serde(default)]
    pub loot: LootTable,
    #[serde(default)]
    pub description: Option<String>,
}

/// Collection of opponent templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentTemplates {
    pub templates: Vec<OpponentTemplate>,
}

impl OpponentTemplates {
    /// Find a template by key
    pub fn find(&self, key: &str) -> Option<&OpponentTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.key.as_str())
    }
}

/// Create default opponent templates (hardcoded fallback)
pub fn default_opponent_templates() -> OpponentTemplates {
    OpponentTemplates {
        templates: vec![
            OpponentTemplate {
                key: "bug_creature".to_string(),
                name: "Bug Creature".to_string(),
                defense: 2,
                attack_power: 5,
                health: 50,
                level: 1,
                retaliates: true,
                loot: LootTable::new()
                    .with("code_fragment", 0.7)
                    .with("bug_report", 0.3),
                description: Some("A skittering glitch given legs.".to_string()),
            },
            OpponentTemplate {
                key: "firewall_guardian".to_string(),
                name: "Firewall Guardian".to_string(),
                defense: 10,
                attack_power: 15,
                health: 200,
                level: 5,
                retaliates: true,
                loot: LootTable::new()
                    .with("access_key", 0.5)
                    .with("power_crystal", 0.4)
                    .with("guardian_core", 0.1),
                description: Some("Burns everything that has no business passing.".to_string()),
            },
        ],
    }
}
