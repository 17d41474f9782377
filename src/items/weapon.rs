//! Weapon descriptors
//!
//! The combat engine only needs a weapon's damage bonus and whether it is
//! fired from range.

use serde::{Deserialize, Serialize};

/// How a weapon is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponStyle {
    #[default]
    Melee,
    Ranged,
}

/// A weapon as seen by combat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Flat damage added to every hit
    pub damage: i32,
    #[serde(default)]
    pub style: WeaponStyle,
}

impl Weapon {
    pub fn melee(name: impl Into<String>, damage: i32) -> Self {
        Self {
            name: name.into(),
            damage,
            style: WeaponStyle::Melee,
        }
    }

    pub fn ranged(name: impl Into<String>, damage: i32) -> Self {
        Self {
            name: name.into(),
            damage,
            style: WeaponStyle::Ranged,
        }
    }

    pub fn is_ranged(&self) -> bool {
        self.style == WeaponStyle::Ranged
    }
}

pub mod templates {
    use super::Weapon;

    pub fn rusty_dagger() -> Weapon {
        Weapon::melee("rusty dagger", 2)
    }

    pub fn iron_sword() -> Weapon {
        Weapon::melee("iron sword", 5)
    }

    pub fn hunting_bow() -> Weapon {
        Weapon::ranged("hunting bow", 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults_to_melee_in_data() {
        let weapon: Weapon = ron::from_str(r#"(name: "club", damage: 3)"#).unwrap();
        assert_eq!(weapon.style, WeaponStyle::Melee);
        assert!(!weapon.is_ranged());
        assert!(templates::hunting_bow().is_ranged());
    }
}
