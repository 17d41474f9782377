//! Damage calculation
//!
//! Pure combat math: attack bonus, defense class, damage rolls and damage
//! reduction, plus the [`DamageHandler`] hook entities use to take hits their
//! own way.

use serde::Serialize;

use crate::attributes::{names, AttributeSet};
use crate::combat::check::attribute_bonus;
use crate::dice::Dice;
use crate::items::Weapon;

/// Defense class before the defender's rating is added
pub const BASE_DEFENSE_CLASS: i32 = 10;

/// Base damage for attackers that expose no attributes and no attack power
pub const DEFAULT_ATTACK_POWER: i32 = 5;

/// Custom damage intake.
///
/// The value returned by [`DamageHandler::take_damage`] is what the entity
/// actually lost and is what combat reports.
pub trait DamageHandler: Send + Sync {
    /// Short name for logs
    fn label(&self) -> &'static str;

    /// Apply `damage` to `attrs`, returning the damage actually taken
    fn take_damage(&self, attrs: &mut AttributeSet, damage: i32) -> i32;

    /// Whether the entity counts as defeated
    fn is_defeated(&self, attrs: &AttributeSet) -> bool {
        attrs.get(names::HEALTH).map_or(false, |health| health <= 0)
    }
}

/// Thick hide that shaves a flat amount off every hit, never below 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmoredHide {
    pub armor: i32,
}

impl DamageHandler for ArmoredHide {
    fn label(&self) -> &'static str {
        "armored hide"
    }

    fn take_damage(&self, attrs: &mut AttributeSet, damage: i32) -> i32 {
        let actual = (damage - self.armor).max(1);
        apply_to_health(attrs, actual)
    }
}

/// Subtract damage from an attribute set's health, floored at zero.
/// Returns the damage dealt.
pub fn apply_to_health(attrs: &mut AttributeSet, damage: i32) -> i32 {
    let current = attrs.get(names::HEALTH).unwrap_or(0);
    let _ = attrs.set(names::HEALTH, (current - damage).max(0));
    damage
}

/// Attribute an attack is rolled with
pub fn attack_attribute(weapon: Option<&Weapon>) -> &'static str {
    match weapon {
        Some(w) if w.is_ranged() => names::DEXTERITY,
        _ => names::STRENGTH,
    }
}

/// Defense rating: an explicit rating wins, otherwise the dexterity bonus,
/// otherwise 0. Never negative.
pub fn defense_rating(explicit: Option<i32>, dexterity: Option<i32>) -> i32 {
    explicit
        .or_else(|| dexterity.map(attribute_bonus))
        .unwrap_or(0)
        .max(0)
}

/// Number an attack total has to reach to hit
pub fn defense_class(defense: i32) -> i32 {
    BASE_DEFENSE_CLASS.saturating_add(defense)
}

/// The to-hit half of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackRoll {
    pub roll: i32,
    pub bonus: i32,
    pub hit_total: i32,
    pub defense_class: i32,
    pub hit: bool,
}

/// Roll to hit. `attack_value` is the attacker's check attribute, if any.
pub fn roll_to_hit(attack_value: Option<i32>, defense: i32, dice: &mut impl Dice) -> AttackRoll {
    let bonus = attack_value.map(attribute_bonus).unwrap_or(0);
    let roll = dice.d20();
    let hit_total = roll + bonus;
    let defense_class = defense_class(defense);
    AttackRoll {
        roll,
        bonus,
        hit_total,
        defense_class,
        hit: hit_total >= defense_class,
    }
}

/// Base damage of a hit: d4 plus the strength bonus, at least 1.
/// Attackers without strength deal their flat attack power instead.
pub fn roll_base_damage(strength: Option<i32>, attack_power: i32, dice: &mut impl Dice) -> i32 {
    match strength {
        Some(strength) => (dice.d4() + attribute_bonus(strength)).max(1),
        None => attack_power,
    }
}

/// Damage after weapon bonus and the defender's reduction, at least 1
pub fn final_damage(base_damage: i32, weapon: Option<&Weapon>, reduction: i32) -> i32 {
    let raw = base_damage.saturating_add(weapon.map_or(0, |w| w.damage));
    raw.saturating_sub(reduction).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn test_attack_attribute_by_weapon() {
        assert_eq!(attack_attribute(None), "strength");
        assert_eq!(attack_attribute(Some(&Weapon::melee("axe", 6))), "strength");
        assert_eq!(attack_attribute(Some(&Weapon::ranged("bow", 4))), "dexterity");
    }

    #[test]
    fn test_defense_rating_fallbacks() {
        assert_eq!(defense_rating(Some(4), Some(20)), 4);
        assert_eq!(defense_rating(None, Some(14)), 2);
        assert_eq!(defense_rating(None, Some(6)), 0); // -2 clamps to 0
        assert_eq!(defense_rating(Some(-3), None), 0);
        assert_eq!(defense_rating(None, None), 0);
    }

    #[test]
    fn test_roll_to_hit_boundary() {
        let mut dice = ScriptedDice::new().with_rolls([10, 9]);
        let hit = roll_to_hit(Some(10), 0, &mut dice);
        assert!(hit.hit);
        assert_eq!(hit.defense_class, 10);
        let miss = roll_to_hit(Some(10), 0, &mut dice);
        assert!(!miss.hit);
        assert_eq!(miss.hit_total, 9);
    }

    #[test]
    fn test_roll_to_hit_without_attributes() {
        let mut dice = ScriptedDice::new().with_rolls([12]);
        let roll = roll_to_hit(None, 3, &mut dice);
        assert_eq!(roll.bonus, 0);
        assert_eq!(roll.defense_class, 13);
        assert!(!roll.hit);
    }

    #[test]
    fn test_base_damage() {
        let mut dice = ScriptedDice::new().with_rolls([2, 1]);
        assert_eq!(roll_base_damage(Some(14), DEFAULT_ATTACK_POWER, &mut dice), 4);
        // 1 - 5 floors at 1
        assert_eq!(roll_base_damage(Some(1), DEFAULT_ATTACK_POWER, &mut dice), 1);
        assert_eq!(roll_base_damage(None, 7, &mut dice), 7);
    }

    #[test]
    fn test_final_damage() {
        let sword = Weapon::melee("sword", 5);
        assert_eq!(final_damage(4, Some(&sword), 0), 9);
        assert_eq!(final_damage(4, None, 2), 2);
        assert_eq!(final_damage(1, None, 10), 1);
    }

    #[test]
    fn test_extreme_data_values_saturate() {
        assert_eq!(defense_class(i32::MAX), i32::MAX);
        let relic = Weapon::melee("relic", i32::MAX);
        assert_eq!(final_damage(4, Some(&relic), 0), i32::MAX);
        assert_eq!(final_damage(4, None, i32::MIN), i32::MAX);
    }

    #[test]
    fn test_armored_hide() {
        let mut attrs = AttributeSet::new();
        attrs.set("health", 10).unwrap();
        let hide = ArmoredHide { armor: 2 };
        assert_eq!(hide.take_damage(&mut attrs, 6), 4);
        assert_eq!(attrs.get("health"), Some(6));
        assert_eq!(hide.take_damage(&mut attrs, 1), 1);
        assert!(!hide.is_defeated(&attrs));
        hide.take_damage(&mut attrs, 50);
        assert_eq!(attrs.get("health"), Some(0));
        assert!(hide.is_defeated(&attrs));
    }
}
