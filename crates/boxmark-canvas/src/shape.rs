//! Annotated rectangles.
//!
//! A [`Shape`] lives in image pixel space. Coordinate conversion from the
//! screen is the canvas's job; the only scale a shape knows about is the
//! one it is painted at.

use serde::{Deserialize, Serialize};

use boxmark_core::GeometryError;

use crate::shape_points::{Corner, ShapePoints};
use crate::vector::Vector2Int;

/// Identifier assigned by the canvas when a shape is added.
pub type ShapeId = u64;

/// Vertex marker side length at scale 1.
pub const VERTEX_SIZE: i32 = 4;
/// Extra side length of the highlighted vertex marker.
pub const VERTEX_HIGHLIGHT_GROWTH: i32 = 3;
/// Outline width.
pub const PEN_SIZE: i32 = 2;

/// Display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Stable colour for a label, so every box with the same label looks alike.
pub fn color_for_label(label: &str) -> Rgb {
    // FNV-1a
    let hash = label.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    let channel = |shift: u32| 64 + ((hash >> shift) & 0xff) as u8 % 160;
    Rgb {
        r: channel(0),
        g: channel(16),
        b: channel(32),
    }
}

/// How a vertex marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexMarker {
    Circle,
    /// The hovered or dragged vertex.
    Square,
}

/// Everything a backend needs to draw one shape at the current scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDrawing<'a> {
    pub id: ShapeId,
    pub label: &'a str,
    /// Scaled corners.
    pub corners: &'a ShapePoints,
    pub color: Rgb,
    pub filled: bool,
    pub selected: bool,
    pub highlighted: Option<Corner>,
    pub pen_width: i32,
    /// `(center, side, marker)` for each corner.
    pub vertices: [(Vector2Int, i32, VertexMarker); 4],
}

/// Drawing backend. Implemented outside the engine.
pub trait ShapePainter {
    fn draw_shape(&mut self, shape: &ShapeDrawing<'_>);

    /// Rubber-band rectangle while a shape is being created, in screen space.
    fn draw_preview(&mut self, _min: Vector2Int, _max: Vector2Int) {}

    /// Horizontal then vertical guide line through the pointer in create
    /// mode, in screen space.
    fn draw_guides(&mut self, _lines: [(Vector2Int, Vector2Int); 2]) {}
}

/// One labelled bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    name: String,
    points: ShapePoints,
    /// Hidden shapes are skipped by painting but still hit-tested.
    pub visible: bool,
    highlighted_vertex: Option<Corner>,
    fill: bool,
    selected: bool,
    color: Rgb,
    size: Vector2Int,
    scale: f64,
    scaled: ShapePoints,
}

impl Shape {
    /// Corners are normalized so the top-left is the minimum.
    pub fn new(name: impl Into<String>, points: ShapePoints) -> Self {
        let name = name.into();
        let points = points.normalized();
        let mut shape = Self {
            id: 0,
            color: color_for_label(&name),
            name,
            points,
            visible: true,
            highlighted_vertex: None,
            fill: false,
            selected: false,
            size: Vector2Int::ZERO,
            scale: 1.0,
            scaled: points,
        };
        shape.refresh();
        shape
    }

    /// Rectangle spanning two opposite corners.
    pub fn from_corners(name: impl Into<String>, a: Vector2Int, b: Vector2Int) -> Self {
        Self::new(name, ShapePoints::from_corners(a, b))
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ShapeId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.color = color_for_label(&self.name);
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn points(&self) -> &ShapePoints {
        &self.points
    }

    pub fn corner(&self, corner: Corner) -> Vector2Int {
        self.points[corner]
    }

    pub fn top_left(&self) -> Vector2Int {
        self.points[Corner::TopLeft]
    }

    pub fn bot_right(&self) -> Vector2Int {
        self.points[Corner::BottomRight]
    }

    /// `bot_right - top_left`.
    pub fn size(&self) -> Vector2Int {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// `(min, max)` corners.
    pub fn bounds(&self) -> (Vector2Int, Vector2Int) {
        self.points.bounds()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Selection flag. A canvas keeps this in step with its selection list.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_filled(&self) -> bool {
        self.fill
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }

    pub fn highlighted_vertex(&self) -> Option<Corner> {
        self.highlighted_vertex
    }

    pub fn highlight_vertex(&mut self, corner: Corner) {
        self.highlighted_vertex = Some(corner);
    }

    pub fn unhighlight(&mut self) {
        self.highlighted_vertex = None;
    }

    /// Moves the top-left corner to `to`, keeping the whole rectangle inside
    /// `[0, clip_max]`. A shape larger than `clip_max` is pinned at 0.
    pub fn move_to(&mut self, to: Vector2Int, clip_max: Vector2Int) {
        let to = to.min(clip_max - self.size).max(Vector2Int::ZERO);
        self.points = ShapePoints::from_corners(to, to + self.size);
        self.refresh();
    }

    pub fn move_by(&mut self, delta: Vector2Int, clip_max: Vector2Int) {
        self.move_to(self.top_left() + delta, clip_max);
    }

    /// Moves the corner at `index` to `to`. See [`Shape::move_corner`].
    pub fn move_vertex(&mut self, to: Vector2Int, index: usize) -> Result<Corner, GeometryError> {
        let corner = Corner::try_from(index)?;
        Ok(self.move_corner(to, corner))
    }

    /// Moves one corner to `to`, dragging the two neighbours that share its
    /// x and y so the rectangle stays axis-aligned.
    ///
    /// Dragging a corner past the opposite side flips the rectangle; the
    /// corners are then re-sorted and the returned corner is the one that
    /// now sits at `to`. Keep dragging that one.
    pub fn move_corner(&mut self, to: Vector2Int, corner: Corner) -> Corner {
        let (same_y, same_x) = match corner {
            Corner::TopLeft => (Corner::TopRight, Corner::BottomLeft),
            Corner::TopRight => (Corner::TopLeft, Corner::BottomRight),
            Corner::BottomRight => (Corner::BottomLeft, Corner::TopRight),
            Corner::BottomLeft => (Corner::BottomRight, Corner::TopLeft),
        };

        let mut points = self.points;
        points.set(corner, to);
        points.set(same_y, Vector2Int::new(points[same_y].x, to.y));
        points.set(same_x, Vector2Int::new(to.x, points[same_x].y));
        self.points = points.normalized();
        self.refresh();

        let landed = if self.points[corner] == to {
            corner
        } else {
            Corner::ALL
                .into_iter()
                .find(|c| self.points[*c] == to)
                .unwrap_or(corner)
        };
        if self.highlighted_vertex == Some(corner) {
            self.highlighted_vertex = Some(landed);
        }
        landed
    }

    /// Strict interior test; points on the outline are outside.
    pub fn is_within(&self, pos: Vector2Int) -> bool {
        let (min, max) = self.bounds();
        min.all_lt(pos) && pos.all_lt(max)
    }

    /// Nearest corner strictly closer than `limit`, with its distance.
    /// On equal distances the lower corner index wins.
    pub fn closest_vertex(&self, pos: Vector2Int, limit: f64) -> Option<(Corner, f64)> {
        let mut best: Option<(Corner, f64)> = None;
        for (corner, point) in self.points.iter() {
            let dist = Vector2Int::distance(point, pos);
            if dist < best.map_or(limit, |(_, d)| d) {
                best = Some((corner, dist));
            }
        }
        best
    }

    /// Independent duplicate with fresh display state and no id.
    pub fn copy(&self) -> Self {
        Self::new(self.name.clone(), self.points)
    }

    /// Hands the shape to `painter` at `scale`, refreshing the scaled
    /// corners only when the scale changed.
    pub fn paint(&mut self, scale: f64, painter: &mut dyn ShapePainter) {
        if !self.visible {
            return;
        }
        if scale != self.scale {
            self.scale = scale;
            self.scaled = self.points.map(|p| p * scale);
        }

        let vertex_side = |grown: bool| {
            if grown {
                (f64::from(VERTEX_SIZE + VERTEX_HIGHLIGHT_GROWTH) * scale) as i32
            } else {
                (f64::from(VERTEX_SIZE) * scale.max(1.0)) as i32
            }
        };
        let vertices = Corner::ALL.map(|c| {
            let grown = self.highlighted_vertex == Some(c);
            let marker = if grown {
                VertexMarker::Square
            } else {
                VertexMarker::Circle
            };
            (self.scaled[c], vertex_side(grown), marker)
        });

        painter.draw_shape(&ShapeDrawing {
            id: self.id,
            label: &self.name,
            corners: &self.scaled,
            color: self.color,
            filled: self.fill,
            selected: self.selected,
            highlighted: self.highlighted_vertex,
            pen_width: PEN_SIZE,
            vertices,
        });
    }

    fn refresh(&mut self) {
        self.size = (self.bot_right() - self.top_left()).abs();
        self.scaled = self.points.map(|p| p * self.scale);
    }
}
