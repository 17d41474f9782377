//! Combat system

pub mod check;
pub mod damage;
pub mod resolver;

pub use check::{attribute_bonus, roll_ability_check, AbilityCheck, DEFAULT_DIFFICULTY};
pub use damage::{ArmoredHide, AttackRoll, DamageHandler};
pub use resolver::{CombatOutcome, CombatResolver, DefeatReport, DeferredAction, FiredCounter};
