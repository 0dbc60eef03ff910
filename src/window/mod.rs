//! Frameless windows and the stage that owns them.

pub mod container;
pub mod effects;
pub mod present;
pub mod stage;
