//! 2D presentation coordinates.
//!
//! `Position` places an agent on the facility floor plan for visualisation.
//! No simulation decision reads it; agents interpolate toward the layout
//! position of their destination area once per tick.

/// Largest per-axis displacement in one tick.
const MAX_STEP: f32 = 0.5;

/// Manhattan distance below which an agent counts as arrived.
const ARRIVAL_EPSILON: f32 = 0.5;

/// A point on the facility floor plan, in grid units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan(self, other: Position) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Move one tick toward `target` at `speed`, each axis capped at
    /// `MAX_STEP`.  Returns `true` once within `ARRIVAL_EPSILON`.
    pub fn step_toward(&mut self, target: Position, speed: f32) -> bool {
        let step = |diff: f32| (diff * speed * 0.1).clamp(-MAX_STEP, MAX_STEP);
        self.x += step(target.x - self.x);
        self.y += step(target.y - self.y);
        self.manhattan(target) < ARRIVAL_EPSILON
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
