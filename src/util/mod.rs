#[macro_use]
pub mod log;
pub mod misc;
