//! Attribute modifiers
//!
//! Buffs and debuffs applied on top of an attribute's base value. A modifier
//! either lasts a fixed number of turns or is permanent until removed by
//! source.

use std::fmt;

use serde::Serialize;

/// A numeric adjustment to one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeModifier {
    /// Amount added to the attribute (can be negative)
    pub value: i32,
    /// What caused this modifier ("blessing", "poison dart", ...)
    pub source: String,
    /// Total duration in turns, `None` for permanent
    pub duration: Option<u32>,
    /// Turns left before expiry, tracked only for timed modifiers
    remaining: Option<i64>,
}

impl AttributeModifier {
    pub fn new(value: i32, source: impl Into<String>, duration: Option<u32>) -> Self {
        Self {
            value,
            source: source.into(),
            duration,
            remaining: duration.map(i64::from),
        }
    }

    /// A modifier that never expires on its own
    pub fn permanent(value: i32, source: impl Into<String>) -> Self {
        Self::new(value, source, None)
    }

    /// A modifier lasting `turns` turns
    pub fn timed(value: i32, source: impl Into<String>, turns: u32) -> Self {
        Self::new(value, source, Some(turns))
    }

    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }

    /// Turns left, `None` for permanent modifiers
    pub fn remaining(&self) -> Option<i64> {
        self.remaining
    }

    /// Advance one turn. Returns false once the modifier has expired.
    pub fn tick(&mut self) -> bool {
        match self.remaining.as_mut() {
            None => true,
            Some(remaining) => {
                *remaining -= 1;
                *remaining > 0
            }
        }
    }
}

impl fmt::Display for AttributeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} ({}", self.value, self.source)?;
        match (self.duration, self.remaining) {
            (Some(total), Some(left)) if left > 0 => {
                write!(f, ", {}/{} turns remaining)", left, total)
            }
            (Some(_), _) => write!(f, ", expired)"),
            (None, _) => write!(f, ", permanent)"),
        }
    }
}
