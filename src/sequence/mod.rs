//! Position-driven cue dispatch.

pub mod clock;
pub mod cue;
pub mod director;
pub mod timeline;
