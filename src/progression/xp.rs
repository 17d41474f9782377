//! Experience and leveling
//!
//! XP thresholds, awarding experience with chained level-ups, and scaling
//! opponents to a target level.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::attributes::{names, AttributeSet};

/// XP needed per level: reaching level N+1 from N costs N * 100
const XP_PER_LEVEL: i32 = 100;

/// Outcome of a single experience award
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressionResult {
    pub gained_exp: i32,
    pub leveled_up: bool,
    /// Level after the award
    pub new_level: i32,
    /// Summed attribute changes from every level gained
    pub attribute_changes: BTreeMap<&'static str, i32>,
}

impl ProgressionResult {
    /// Number of levels gained, given the level before the award
    pub fn levels_gained(&self, old_level: i32) -> i32 {
        self.new_level - old_level
    }
}

fn level_of(attrs: &AttributeSet) -> i32 {
    attrs.get(names::LEVEL).unwrap_or(1)
}

fn experience_of(attrs: &AttributeSet) -> i32 {
    attrs.get(names::EXPERIENCE).unwrap_or(0)
}

/// XP required to advance from the current level
pub fn exp_for_next_level(attrs: &AttributeSet) -> i32 {
    level_of(attrs).saturating_mul(XP_PER_LEVEL)
}

/// XP still missing before the next level
pub fn experience_to_next_level(attrs: &AttributeSet) -> i32 {
    (exp_for_next_level(attrs) - experience_of(attrs)).max(0)
}

/// Award experience, applying as many level-ups as the total covers.
///
/// Non-positive amounts change nothing.
pub fn add_experience(attrs: &mut AttributeSet, amount: i32) -> ProgressionResult {
    let mut result = ProgressionResult {
        gained_exp: 0,
        leveled_up: false,
        new_level: level_of(attrs),
        attribute_changes: BTreeMap::new(),
    };

    if amount <= 0 {
        return result;
    }

    result.gained_exp = amount;
    let total = experience_of(attrs).saturating_add(amount);
    let _ = attrs.set(names::EXPERIENCE, total);

    loop {
        let threshold = exp_for_next_level(attrs);
        let current = experience_of(attrs);
        if current < threshold {
            break;
        }

        let _ = attrs.set(names::EXPERIENCE, current - threshold);
        let next_base = attrs.base(names::LEVEL).unwrap_or(1).saturating_add(1);
        let _ = attrs.set(names::LEVEL, next_base);

        for (attr, change) in attrs.handle_level_up() {
            *result.attribute_changes.entry(attr).or_insert(0) += change;
        }

        result.leveled_up = true;
        result.new_level = level_of(attrs);
        log::info!("Reached level {}", result.new_level);
    }

    result
}

/// Scale an opponent's attributes to `level`.
///
/// Health and mana pools are set to their new maxima and the three core
/// stats grow by one every two levels. Levels below 1 are treated as 1.
/// Returns every value that was set.
pub fn scale_to_level(attrs: &mut AttributeSet, level: i32) -> BTreeMap<&'static str, i32> {
    let level = level.max(1);
    let max_health = 50 + level * 10;
    let max_mana = 20 + level * 5;
    let core_stat = 8 + level / 2;

    let scaled = [
        (names::LEVEL, level),
        (names::MAX_HEALTH, max_health),
        (names::HEALTH, max_health),
        (names::MAX_MANA, max_mana),
        (names::MANA, max_mana),
        (names::STRENGTH, core_stat),
        (names::DEXTERITY, core_stat),
        (names::WISDOM, core_stat),
    ];

    scaled
        .into_iter()
        .map(|(name, value)| {
            let _ = attrs.set(name, value);
            (name, value)
        })
        .collect()
}
