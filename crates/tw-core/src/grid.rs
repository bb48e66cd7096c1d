//! Grid addressing.
//!
//! Floors are numbered upward from 0 (the deepest basement row); `x` grows to
//! the right from 0 (the street entrance side).

use std::fmt;

/// A cell coordinate on the building grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x:     i32,
    pub floor: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, floor: i32) -> Self {
        Self { x, floor }
    }

    /// The cell `dx` columns to the right (negative moves left).
    #[inline]
    pub fn shifted(self, dx: i32) -> Self {
        Self { x: self.x + dx, floor: self.floor }
    }

    /// The cell `df` floors up (negative moves down).
    #[inline]
    pub fn raised(self, df: i32) -> Self {
        Self { x: self.x, floor: self.floor + df }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, floor {})", self.x, self.floor)
    }
}

/// Grid dimensions.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub width:  u32,
    pub height: u32,
}

impl GridSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0
            && pos.floor >= 0
            && (pos.x as u32) < self.width
            && (pos.floor as u32) < self.height
    }

    /// Row-major index of `pos`, or `None` when it lies outside the grid.
    #[inline]
    pub fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.floor as usize * self.width as usize + pos.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn position(&self, index: usize) -> GridPos {
        let w = self.width as usize;
        GridPos::new((index % w) as i32, (index / w) as i32)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Clamp a floor number into `[0, height)`.
    pub fn clamp_floor(&self, floor: i32) -> i32 {
        floor.clamp(0, self.height.saturating_sub(1) as i32)
    }
}
