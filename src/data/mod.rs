//! Data loading and external game content
//!
//! Combat tuning and opponent templates live in RON files under
//! `assets/data/`, so encounters can be tweaked without a rebuild.

pub mod config;
pub mod loader;
pub mod opponents;

pub use config::CombatConfig;
pub use loader::{export_default_data, read_ron, DataManager, DATA_DIR};
pub use opponents::{default_opponent_templates, OpponentTemplate, OpponentTemplates};
