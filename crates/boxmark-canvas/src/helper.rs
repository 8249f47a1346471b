//! Hit-testing and group-move utilities over shape collections.
//!
//! All functions are stateless. Ties between shapes are broken by list
//! order: the earlier shape wins.

use crate::shape::{Shape, ShapeId};
use crate::shape_points::Corner;
use crate::vector::Vector2Int;

/// Default pointer-to-vertex distance that counts as hovering a vertex.
pub const MIN_DIST_HIGHLIGHT: f64 = 8.0;
/// Create drags shorter than this are discarded as clicks.
pub const MIN_DIST_CREATE: f64 = 10.0;
/// Presses that travel less than this are clicks, not drags.
pub const MIN_DIST_TO_MOVE: f64 = 1.3;
pub const MAX_ZOOM: f64 = 5.0;
pub const MIN_ZOOM: f64 = 0.5;

/// A vertex under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHit {
    pub shape: ShapeId,
    pub corner: Corner,
    pub distance: f64,
}

/// Offsets of each shape's top-left from the anchor's top-left.
pub type Formation = Vec<(ShapeId, Vector2Int)>;

/// Nearest vertex of any shape strictly within `radius`.
pub fn get_closest_shape_vertex(pos: Vector2Int, shapes: &[Shape], radius: f64) -> Option<VertexHit> {
    let mut best: Option<VertexHit> = None;
    for shape in shapes {
        let limit = best.map_or(radius, |b| b.distance);
        if let Some((corner, distance)) = shape.closest_vertex(pos, limit) {
            best = Some(VertexHit {
                shape: shape.id(),
                corner,
                distance,
            });
        }
    }
    best
}

/// Shape containing `pos`, preferring unselected shapes.
///
/// Returns the first unselected shape that contains the point; only when
/// every containing shape is selected is the first selected one returned.
/// This lets a click reach a shape lying under the current selection.
pub fn get_shape_within(pos: Vector2Int, shapes: &[Shape]) -> Option<ShapeId> {
    get_within(pos, shapes, 0.0).0
}

/// [`get_shape_within`] and [`get_closest_shape_vertex`] in one pass.
pub fn get_within(
    pos: Vector2Int,
    shapes: &[Shape],
    radius: f64,
) -> (Option<ShapeId>, Option<VertexHit>) {
    let mut unselected: Option<ShapeId> = None;
    let mut selected: Option<ShapeId> = None;
    let mut vertex: Option<VertexHit> = None;

    for shape in shapes {
        let limit = vertex.map_or(radius, |v| v.distance);
        if let Some((corner, distance)) = shape.closest_vertex(pos, limit) {
            vertex = Some(VertexHit {
                shape: shape.id(),
                corner,
                distance,
            });
        }

        if unselected.is_none() && shape.is_within(pos) {
            if !shape.is_selected() {
                unselected = Some(shape.id());
            } else if selected.is_none() {
                selected = Some(shape.id());
            }
        }
    }

    (unselected.or(selected), vertex)
}

/// Offsets that keep `shapes` in place relative to `anchor` during a drag.
pub fn get_formation<'a>(anchor: &Shape, shapes: impl IntoIterator<Item = &'a Shape>) -> Formation {
    shapes
        .into_iter()
        .map(|s| (s.id(), anchor.top_left() - s.top_left()))
        .collect()
}

/// Moves the clicked shape's top-left to `mouse_pos`, then every other
/// shape of the formation to the same offset from it. Each move is clamped
/// to `[0, clip_max]` independently.
pub fn move_shapes(
    mouse_pos: Vector2Int,
    clicked: ShapeId,
    formation: &[(ShapeId, Vector2Int)],
    clip_max: Vector2Int,
    shapes: &mut [Shape],
) {
    let Some(anchor) = shapes.iter_mut().find(|s| s.id() == clicked) else {
        return;
    };
    anchor.move_to(mouse_pos, clip_max);
    let anchor_pos = anchor.top_left();

    for (id, offset) in formation.iter().filter(|(id, _)| *id != clicked) {
        if let Some(shape) = shapes.iter_mut().find(|s| s.id() == *id) {
            shape.move_to(anchor_pos - *offset, clip_max);
        }
    }
}

/// Position of `pos` relative to `center`.
pub fn relative_pos(pos: Vector2Int, center: Vector2Int) -> Vector2Int {
    pos - center
}

/// Horizontal and vertical guide lines through `pos` spanning `size`.
pub fn crosshair(pos: Vector2Int, size: Vector2Int) -> [(Vector2Int, Vector2Int); 2] {
    [
        (Vector2Int::new(0, pos.y), Vector2Int::new(size.x, pos.y)),
        (Vector2Int::new(pos.x, 0), Vector2Int::new(pos.x, size.y)),
    ]
}
