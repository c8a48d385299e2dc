//! Shared constants and small math helpers.

pub mod constants;
pub mod vector2;

pub use constants::*;
pub use vector2::Vector2;
