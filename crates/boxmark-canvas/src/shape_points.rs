//! Four-corner rectangle storage.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use boxmark_core::GeometryError;

use crate::vector::Vector2Int;

/// Corner of an axis-aligned rectangle, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Corner {
    type Error = GeometryError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Corner::ALL
            .get(index)
            .copied()
            .ok_or(GeometryError::InvalidVertex { index })
    }
}

/// The four corners of a rectangle, indexed by [`Corner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePoints([Vector2Int; 4]);

impl ShapePoints {
    /// Square of side `size` whose top-left corner is `origin`.
    pub fn from_size(origin: Vector2Int, size: i32) -> Self {
        Self([
            origin,
            origin + Vector2Int::new(size, 0),
            origin + Vector2Int::splat(size),
            origin + Vector2Int::new(0, size),
        ])
    }

    /// Rectangle spanning two opposite corners, given in any order.
    pub fn from_corners(a: Vector2Int, b: Vector2Int) -> Self {
        let (min, max) = (a.min(b), a.max(b));
        Self([
            min,
            Vector2Int::new(max.x, min.y),
            max,
            Vector2Int::new(min.x, max.y),
        ])
    }

    pub fn get(&self, corner: Corner) -> Vector2Int {
        self.0[corner.index()]
    }

    pub(crate) fn set(&mut self, corner: Corner, value: Vector2Int) {
        self.0[corner.index()] = value;
    }

    pub fn as_slice(&self) -> &[Vector2Int] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, Vector2Int)> + '_ {
        Corner::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Component-wise bounds of the corners, whatever order they are in.
    pub fn bounds(&self) -> (Vector2Int, Vector2Int) {
        let [first, rest @ ..] = &self.0;
        rest.iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)))
    }

    /// Rebuild the corners in canonical order from their own bounds.
    pub fn normalized(&self) -> Self {
        let (min, max) = self.bounds();
        Self::from_corners(min, max)
    }

    /// Corners mapped through `f`, keeping their order.
    pub fn map(&self, f: impl Fn(Vector2Int) -> Vector2Int) -> Self {
        Self(self.0.map(f))
    }
}

impl Index<Corner> for ShapePoints {
    type Output = Vector2Int;

    fn index(&self, corner: Corner) -> &Vector2Int {
        &self.0[corner.index()]
    }
}
