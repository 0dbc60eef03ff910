pub mod position;
pub mod scale;
