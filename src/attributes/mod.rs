//! Character attributes
//!
//! Catalog of attribute definitions, modifiers, and the per-entity set.

pub mod catalog;
pub mod modifier;
pub mod set;

pub use catalog::{catalog, names, AttributeCatalog, AttributeCategory, AttributeDefinition};
pub use modifier::AttributeModifier;
pub use set::AttributeSet;
