//! Mutable 2D float pair used for positions and velocities.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn zero(&mut self) {
        self.set(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_zero() {
        let mut v = Vector2::new(1.0, 2.0);
        v.set(-3.5, 4.25);
        assert_eq!(v, Vector2::new(-3.5, 4.25));

        v.zero();
        assert_eq!(v, Vector2::default());
    }
}
