//! Ability checks
//!
//! d20 + attribute bonus against a difficulty threshold.

use serde::Serialize;

use crate::attributes::AttributeSet;
use crate::dice::Dice;

/// Difficulty used when the caller has no specific target number
pub const DEFAULT_DIFFICULTY: i32 = 10;

/// Result of an ability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityCheck {
    pub success: bool,
    /// Raw d20 result, 0 when the check could not be made
    pub roll: i32,
    pub bonus: i32,
}

impl AbilityCheck {
    /// The outcome for a check against an unknown attribute
    pub const fn impossible() -> Self {
        Self {
            success: false,
            roll: 0,
            bonus: 0,
        }
    }

    pub fn total(&self) -> i32 {
        self.roll + self.bonus
    }
}

/// D&D-style modifier: (value - 10) / 2, rounded toward negative infinity
pub fn attribute_bonus(value: i32) -> i32 {
    (value - 10).div_euclid(2)
}

/// Roll a check of `name` against `difficulty`.
///
/// Unknown attributes never succeed and report a zero roll and bonus.
pub fn roll_ability_check(
    attrs: &AttributeSet,
    name: &str,
    difficulty: i32,
    dice: &mut impl Dice,
) -> AbilityCheck {
    let Some(value) = attrs.get(name) else {
        return AbilityCheck::impossible();
    };

    let bonus = attribute_bonus(value);
    let roll = dice.d20();
    let check = AbilityCheck {
        success: roll + bonus >= difficulty,
        roll,
        bonus,
    };
    log::debug!(
        "{} check: rolled {} {:+} vs DC {} -> {}",
        name,
        roll,
        bonus,
        difficulty,
        if check.success { "success" } else { "failure" }
    );
    check
}
