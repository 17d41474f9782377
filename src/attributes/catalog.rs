//! Attribute catalog
//!
//! The fixed, process-wide registry of attribute definitions. Every bound
//! check in the crate goes through here.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::CatalogError;

/// Well-known attribute names
pub mod names {
    pub const STRENGTH: &str = "strength";
    pub const DEXTERITY: &str = "dexterity";
    pub const WISDOM: &str = "wisdom";
    pub const HEALTH: &str = "health";
    pub const MAX_HEALTH: &str = "max_health";
    pub const MANA: &str = "mana";
    pub const MAX_MANA: &str = "max_mana";
    pub const LEVEL: &str = "level";
    pub const EXPERIENCE: &str = "experience";
}

/// Attributes the rest of the engine relies on
const REQUIRED: [&str; 9] = [
    names::STRENGTH,
    names::DEXTERITY,
    names::WISDOM,
    names::HEALTH,
    names::MAX_HEALTH,
    names::MANA,
    names::MAX_MANA,
    names::LEVEL,
    names::EXPERIENCE,
];

/// Broad grouping used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AttributeCategory {
    Physical,
    Mental,
    Vital,
    Progression,
}

impl AttributeCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeCategory::Physical => "Physical",
            AttributeCategory::Mental => "Mental",
            AttributeCategory::Vital => "Vital",
            AttributeCategory::Progression => "Progression",
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Definition of a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDefinition {
    pub name: &'static str,
    pub category: AttributeCategory,
    pub default_value: i32,
    pub min_value: i32,
    /// Upper bound, `None` for unbounded
    pub max_value: Option<i32>,
    pub description: &'static str,
}

impl AttributeDefinition {
    pub const fn new(
        name: &'static str,
        category: AttributeCategory,
        default_value: i32,
        min_value: i32,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            category,
            default_value,
            min_value,
            max_value: None,
            description,
        }
    }

    pub fn with_max(mut self, max: i32) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Clamp a value into this attribute's bounds
    pub fn clamp(&self, value: i32) -> i32 {
        let value = value.max(self.min_value);
        match self.max_value {
            Some(max) => value.min(max),
            None => value,
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let max_ok = self
            .max_value
            .map_or(true, |max| max >= self.min_value && max >= self.default_value);
        if self.default_value < self.min_value || !max_ok {
            return Err(CatalogError::InvalidBounds {
                name: self.name.to_string(),
                min: self.min_value,
                default: self.default_value,
                max: self.max_value,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Built-in definitions
// =============================================================================

pub const STRENGTH: AttributeDefinition = AttributeDefinition::new(
    names::STRENGTH,
    AttributeCategory::Physical,
    10,
    1,
    "Physical power, affects damage and carrying capacity.",
);

pub const DEXTERITY: AttributeDefinition = AttributeDefinition::new(
    names::DEXTERITY,
    AttributeCategory::Physical,
    10,
    1,
    "Agility and reflexes, affects accuracy and dodge chance.",
);

pub const WISDOM: AttributeDefinition = AttributeDefinition::new(
    names::WISDOM,
    AttributeCategory::Mental,
    10,
    1,
    "Intuition and perception, affects mana and awareness.",
);

pub const HEALTH: AttributeDefinition = AttributeDefinition::new(
    names::HEALTH,
    AttributeCategory::Vital,
    100,
    0,
    "Physical wellbeing, reaching 0 means defeat.",
);

pub const MAX_HEALTH: AttributeDefinition = AttributeDefinition::new(
    names::MAX_HEALTH,
    AttributeCategory::Vital,
    100,
    1,
    "Maximum health capacity.",
);

pub const MANA: AttributeDefinition = AttributeDefinition::new(
    names::MANA,
    AttributeCategory::Vital,
    50,
    0,
    "Magical energy, used for spells and abilities.",
);

pub const MAX_MANA: AttributeDefinition = AttributeDefinition::new(
    names::MAX_MANA,
    AttributeCategory::Vital,
    50,
    0,
    "Maximum mana capacity.",
);

pub const LEVEL: AttributeDefinition = AttributeDefinition::new(
    names::LEVEL,
    AttributeCategory::Progression,
    1,
    1,
    "Character level, representing overall progression.",
);

pub const EXPERIENCE: AttributeDefinition = AttributeDefinition::new(
    names::EXPERIENCE,
    AttributeCategory::Progression,
    0,
    0,
    "Points gained from activities, accumulate to increase level.",
);

// =============================================================================
// Catalog
// =============================================================================

/// Ordered, indexed set of attribute definitions
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    definitions: Vec<AttributeDefinition>,
    index: HashMap<&'static str, usize>,
}

impl AttributeCatalog {
    /// Build a catalog, checking for duplicates, missing core attributes and
    /// inconsistent bounds.
    pub fn from_definitions(definitions: Vec<AttributeDefinition>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (slot, def) in definitions.iter().enumerate() {
            def.validate()?;
            if index.insert(def.name, slot).is_some() {
                return Err(CatalogError::Duplicate(def.name.to_string()));
            }
        }

        if let Some(missing) = REQUIRED.iter().find(|name| !index.contains_key(*name)) {
            return Err(CatalogError::MissingRequired(*missing));
        }

        Ok(Self { definitions, index })
    }

    /// The built-in catalog definitions
    pub fn standard_definitions() -> Vec<AttributeDefinition> {
        vec![
            STRENGTH, DEXTERITY, WISDOM, HEALTH, MAX_HEALTH, MANA, MAX_MANA, LEVEL, EXPERIENCE,
        ]
    }

    /// Look up a definition by name
    pub fn definition(&self, name: &str) -> Option<&AttributeDefinition> {
        self.index.get(name).map(|&slot| &self.definitions[slot])
    }

    /// Position of an attribute in definition order
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn description(&self, name: &str) -> Option<&'static str> {
        self.definition(name).map(|def| def.description)
    }

    /// All definitions in definition order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

static CATALOG: OnceLock<AttributeCatalog> = OnceLock::new();

/// The process-wide attribute catalog.
///
/// Built on first access and never mutated afterwards. Panics if the built-in
/// definitions fail validation, which can only happen through a code change.
pub fn catalog() -> &'static AttributeCatalog {
    CATALOG.get_or_init(|| {
        AttributeCatalog::from_definitions(AttributeCatalog::standard_definitions())
            .unwrap_or_else(|e| panic!("built-in attribute catalog is corrupt: {e}"))
    })
}
