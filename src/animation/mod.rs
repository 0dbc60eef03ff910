pub mod ease;
pub mod jitter;
pub mod motion;
pub mod scheduler;
pub mod shake;
pub mod timer;
