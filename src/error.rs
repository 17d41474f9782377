//! Error types
//!
//! Nothing in normal play is fatal: unknown attribute names surface as
//! `AttributeError`, bad data files fall back to defaults, and only a broken
//! attribute catalog is treated as a programming error.

use thiserror::Error;

/// Errors from attribute mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}

/// Problems found while validating an attribute catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("attribute {0} is defined more than once")]
    Duplicate(String),

    #[error("required attribute {0} is missing from the catalog")]
    MissingRequired(&'static str),

    #[error("attribute {name} has inconsistent bounds (min {min}, default {default}, max {max:?})")]
    InvalidBounds {
        name: String,
        min: i32,
        default: i32,
        max: Option<i32>,
    },
}

/// Errors from loading external data files
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

pub type Result<T> = std::result::Result<T, AttributeError>;
