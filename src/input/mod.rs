//! Buffering of directional input between key presses and ticks.

pub mod queue;

pub use queue::{Admission, DirectionQueue, IgnoredReason};
