//! The logical canvas extent that viewport positions are expressed against.

use std::fmt;

use crate::shape_points::{Corner, ShapePoints};
use crate::vector::{Vector2, Vector2Int};

/// Global logical space.
///
/// Vertices run from `(0, 0)` to `size`. Positions handed to
/// [`CoordinatesSystem::to_global`] are offsets from [`CoordinatesSystem::center`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatesSystem {
    size: Vector2Int,
    vertices: ShapePoints,
}

impl CoordinatesSystem {
    /// Negative components are clamped to zero.
    pub fn new(size: Vector2Int) -> Self {
        let size = size.max(Vector2Int::ZERO);
        Self {
            size,
            vertices: ShapePoints::from_corners(Vector2Int::ZERO, size),
        }
    }

    pub fn size(&self) -> Vector2Int {
        self.size
    }

    pub fn resize(&mut self, size: Vector2Int) {
        *self = Self::new(size);
    }

    pub fn vertex(&self, corner: Corner) -> Vector2Int {
        self.vertices[corner]
    }

    /// Exact center; half a pixel off the grid for odd sizes.
    pub fn center(&self) -> Vector2 {
        self.vertex(Corner::TopLeft).to_real() + self.size.to_real() / 2.0
    }

    pub fn to_global(&self, local: Vector2) -> Vector2 {
        local + self.center()
    }
}

impl Default for CoordinatesSystem {
    fn default() -> Self {
        Self::new(Vector2Int::ZERO)
    }
}

impl fmt::Display for CoordinatesSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoordinatesSystem(size: {})", self.size)
    }
}
