//! Progression systems

pub mod xp;

pub use xp::{
    add_experience, exp_for_next_level, experience_to_next_level, scale_to_level,
    ProgressionResult,
};
