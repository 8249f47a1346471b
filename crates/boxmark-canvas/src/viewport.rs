//! Viewport over the logical canvas.
//!
//! The viewport is the visible window ("camera") inside a
//! [`CoordinatesSystem`]. Its position is the offset of its center from the
//! system's center. Every move is clamped so the window never leaves the
//! system, except on an axis where the window is larger than the system:
//! there the position is pinned to the center.

use std::fmt;

use boxmark_core::DataCallback;

use crate::coordinates::CoordinatesSystem;
use crate::shape_points::Corner;
use crate::vector::Vector2;

/// Visible window into logical space.
///
/// The owning [`CoordinatesSystem`] is passed to every operation that needs
/// it; the viewport keeps no reference to it.
pub struct Viewport {
    relative_pos: Vector2,
    size: Vector2,
    listeners: Vec<DataCallback<Vector2>>,
}

impl Viewport {
    /// Creates a viewport of the given size centered on the system.
    pub fn new(size: Vector2) -> Self {
        Self {
            relative_pos: Vector2::ZERO,
            size,
            listeners: Vec::new(),
        }
    }

    /// Offset of the viewport center from the system center.
    pub fn position(&self) -> Vector2 {
        self.relative_pos
    }

    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// Registers a listener called with the new position after every move
    /// that actually changes the position.
    pub fn on_move<F>(&mut self, listener: F)
    where
        F: Fn(Vector2) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Where a request to move to `to` would land, without moving.
    pub fn clamped(&self, to: Vector2, system: &CoordinatesSystem) -> Vector2 {
        let bounds = system.size().to_real();
        let half = self.size / 2.0;
        let limit = bounds / 2.0;

        let axis = |to: f64, size: f64, bound: f64, half: f64, limit: f64| {
            if size > bound {
                0.0
            } else {
                to.min(limit - half).max(half - limit)
            }
        };

        Vector2::new(
            axis(to.x, self.size.x, bounds.x, half.x, limit.x),
            axis(to.y, self.size.y, bounds.y, half.y, limit.y),
        )
    }

    /// Moves the viewport center to `to`, clamped into the system.
    ///
    /// Returns whether the position changed. Listeners are only notified
    /// when it did.
    pub fn move_to(&mut self, to: Vector2, system: &CoordinatesSystem) -> bool {
        let target = self.clamped(to, system);
        if target == self.relative_pos {
            return false;
        }
        self.relative_pos = target;
        tracing::trace!("viewport moved to {}", target);
        for listener in &self.listeners {
            listener(target);
        }
        true
    }

    pub fn move_by(&mut self, delta: Vector2, system: &CoordinatesSystem) -> bool {
        self.move_to(self.relative_pos + delta, system)
    }

    /// Changes the size and re-clamps the current position.
    pub fn resize(&mut self, size: Vector2, system: &CoordinatesSystem) -> bool {
        self.size = size;
        self.move_to(self.relative_pos, system)
    }

    /// Converts a viewport-local offset to a global logical position.
    pub fn to_global(&self, local: Vector2, system: &CoordinatesSystem) -> Vector2 {
        local + self.relative_pos + system.center()
    }

    /// Viewport center in global logical space.
    pub fn paint_pos(&self, system: &CoordinatesSystem) -> Vector2 {
        self.relative_pos + system.center()
    }

    /// Corner of the viewport relative to the system center.
    pub fn corner(&self, corner: Corner) -> Vector2 {
        let half = self.size / 2.0;
        let offset = match corner {
            Corner::TopLeft => Vector2::new(-half.x, -half.y),
            Corner::TopRight => Vector2::new(half.x, -half.y),
            Corner::BottomRight => half,
            Corner::BottomLeft => Vector2::new(-half.x, half.y),
        };
        self.relative_pos + offset
    }

    pub fn top_left(&self) -> Vector2 {
        self.corner(Corner::TopLeft)
    }

    pub fn bottom_right(&self) -> Vector2 {
        self.corner(Corner::BottomRight)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vector2::ZERO)
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("relative_pos", &self.relative_pos)
            .field("size", &self.size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Viewport(pos: {}, size: {})", self.relative_pos, self.size)
    }
}
