//! Scrollbar model kept in step with the viewport.
//!
//! Values are viewport offsets from the logical center, so each axis ranges
//! over `-(system - viewport) / 2 ..= (system - viewport) / 2`.

use serde::{Deserialize, Serialize};

use crate::vector::{Vector2, Vector2Int};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxis {
    pub min: i32,
    pub max: i32,
    /// Visible extent, for thumb sizing.
    pub page: i32,
    pub value: i32,
}

impl ScrollAxis {
    fn configure(&mut self, system: i32, viewport: i32, value: f64) {
        let range = ((system - viewport).max(0)) / 2;
        self.min = -range;
        self.max = range;
        self.page = viewport.max(0);
        self.value = (value.round() as i32).clamp(self.min, self.max);
    }

    pub fn is_scrollable(&self) -> bool {
        self.max > self.min
    }
}

/// Horizontal and vertical scrollbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub horizontal: ScrollAxis,
    pub vertical: ScrollAxis,
}

impl ScrollState {
    pub fn axis(&self, orientation: Orientation) -> &ScrollAxis {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    fn axis_mut(&mut self, orientation: Orientation) -> &mut ScrollAxis {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }

    /// Recompute ranges after the system or viewport changed size.
    pub fn on_scale(&mut self, system: Vector2Int, viewport: Vector2, position: Vector2) {
        self.horizontal
            .configure(system.x, viewport.x.round() as i32, position.x);
        self.vertical
            .configure(system.y, viewport.y.round() as i32, position.y);
    }

    /// Follow a viewport move. Never produces a new request.
    pub fn on_viewport_moved(&mut self, position: Vector2) {
        for (axis, value) in [
            (&mut self.horizontal, position.x),
            (&mut self.vertical, position.y),
        ] {
            axis.value = (value.round() as i32).clamp(axis.min, axis.max);
        }
    }

    /// A scrollbar was dragged to `value` while the viewport sits at
    /// `current`.
    ///
    /// Returns the viewport position to move to, or `None` when the value
    /// did not change (which is how a value echoed back from
    /// [`Self::on_viewport_moved`] is ignored). The other axis keeps its
    /// exact position.
    pub fn request(&mut self, orientation: Orientation, value: i32, current: Vector2) -> Option<Vector2> {
        let axis = self.axis_mut(orientation);
        let value = value.clamp(axis.min, axis.max);
        if value == axis.value {
            return None;
        }
        axis.value = value;
        let value = f64::from(value);
        Some(match orientation {
            Orientation::Horizontal => Vector2::new(value, current.y),
            Orientation::Vertical => Vector2::new(current.x, value),
        })
    }
}
