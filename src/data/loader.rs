//! RON data loader
//!
//! Loads combat settings and opponent templates from external RON files,
//! with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::CombatConfig;
use super::opponents::{default_opponent_templates, OpponentTemplates};
use crate::error::DataError;

/// Default directory data files are read from
pub const DATA_DIR: &str = "assets/data";

/// Manages all external game data
#[derive(Debug, Clone, PartialEq)]
pub struct DataManager {
    /// Combat tuning
    pub combat: CombatConfig,
    /// Opponent templates
    pub opponents: OpponentTemplates,
}

impl DataManager {
    /// Load from `assets/data/`, using defaults for anything missing or broken
    pub fn new() -> Self {
        Self::load_from(DATA_DIR)
    }

    /// Load from `base_path`. Never fails; each file falls back on its own.
    pub fn load_from(base_path: impl AsRef<Path>) -> Self {
        let base_path = base_path.as_ref();
        Self {
            combat: load_or_default(base_path.join("combat.ron"), CombatConfig::default),
            opponents: load_or_default(
                base_path.join("opponents.ron"),
                default_opponent_templates,
            ),
        }
    }

    pub fn combat_config(&self) -> &CombatConfig {
        &self.combat
    }

    pub fn opponent_templates(&self) -> &OpponentTemplates {
        &self.opponents
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            opponents: default_opponent_templates(),
        }
    }
}

/// Read and parse one RON file
pub fn read_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataError> {
    let content = fs::read_to_string(path)?;
    Ok(ron::from_str(&content)?)
}

fn load_or_default<T: DeserializeOwned>(path: PathBuf, fallback: impl FnOnce() -> T) -> T {
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return fallback();
    }
    match read_ron(&path) {
        Ok(value) => {
            log::info!("Loaded {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            fallback()
        }
    }
}

/// Write the default data files into `base_path` for easy editing
pub fn export_default_data(base_path: impl AsRef<Path>) -> anyhow::Result<()> {
    let base_path = base_path.as_ref();
    fs::create_dir_all(base_path)?;

    let defaults = DataManager::default();
    write_ron(&base_path.join("combat.ron"), &defaults.combat)?;
    write_ron(&base_path.join("opponents.ron"), &defaults.opponents)?;
    Ok(())
}

fn write_ron<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?;
    fs::write(path, text)?;
    Ok(())
}
