//! Dice rolling
//!
//! Every random draw in the engine goes through [`Dice`], so a session can be
//! seeded for reproducibility and tests can script exact rolls.

use std::collections::VecDeque;

use rand::Rng;

/// Source of dice rolls and percentile chances
pub trait Dice {
    /// Uniform roll in `1..=sides`
    fn roll(&mut self, sides: u32) -> i32;

    /// Uniform value in `[0, 1)`
    fn chance(&mut self) -> f64;

    fn d20(&mut self) -> i32 {
        self.roll(20)
    }

    fn d4(&mut self) -> i32 {
        self.roll(4)
    }
}

impl<R: Rng> Dice for R {
    fn roll(&mut self, sides: u32) -> i32 {
        let sides = i32::try_from(sides.max(1)).unwrap_or(i32::MAX);
        self.gen_range(1..=sides)
    }

    fn chance(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Dice that replay a fixed script.
///
/// Rolls are clamped into the requested die's range. When a script runs dry,
/// rolls fall back to 1 and chances to 0.99, so an exhausted script misses
/// checks and drops no loot.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    chances: VecDeque<f64>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue die results in order
    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    /// Queue percentile results in order
    pub fn with_chances(mut self, chances: impl IntoIterator<Item = f64>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn push_roll(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    pub fn push_chance(&mut self, chance: f64) {
        self.chances.push_back(chance);
    }

    /// Rolls not yet consumed
    pub fn rolls_left(&self) -> usize {
        self.rolls.len()
    }

    pub fn chances_left(&self) -> usize {
        self.chances.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> i32 {
        let sides = i32::try_from(sides.max(1)).unwrap_or(i32::MAX);
        self.rolls.pop_front().unwrap_or(1).clamp(1, sides)
    }

    fn chance(&mut self) -> f64 {
        self.chances.pop_front().unwrap_or(0.99).clamp(0.0, 0.999_999)
    }
}
