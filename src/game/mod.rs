//! Game module - turn clock and deferred work

mod scheduler;

pub use scheduler::{Scheduler, TaskId};
