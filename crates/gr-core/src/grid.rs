//! Grid coordinates.
//!
//! `Position` uses signed coordinates so that offsetting off the edge of the
//! board (e.g. while scanning a fan-shaped observation window) is
//! representable without wrapping; `Board::in_bounds` is the authority on
//! whether a given `Position` actually exists.

use crate::Direction;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position one step away from `self` in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// L1 (Manhattan) distance between two positions.
    #[inline]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
