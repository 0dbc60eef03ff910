//! Headless rendering of the stage.

pub mod composite;
pub mod snapshot;
