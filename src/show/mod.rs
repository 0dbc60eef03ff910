//! Authored shows: the window roster plus the cue table.

pub mod dsl;
pub mod model;
pub mod yanzhi;
