use boxmark_canvas::helper::{get_shape_within, get_within};
use boxmark_canvas::shape::{PEN_SIZE, VERTEX_HIGHLIGHT_GROWTH, VERTEX_SIZE};
use boxmark_canvas::{
    color_for_label, Canvas, Corner, InputEvent, PointerButton, Shape, ShapeDrawing, ShapePainter,
    VertexMarker, Vector2Int,
};
use boxmark_core::{EventBus, GeometryError};
use boxmark_settings::CanvasSettings;

#[derive(Default)]
struct Recorder {
    shapes: Vec<(String, (Vector2Int, Vector2Int), bool, Vec<(i32, VertexMarker)>)>,
    previews: Vec<(Vector2Int, Vector2Int)>,
    guides: Vec<[(Vector2Int, Vector2Int); 2]>,
}

impl ShapePainter for Recorder {
    fn draw_shape(&mut self, shape: &ShapeDrawing<'_>) {
        assert_eq!(shape.pen_width, PEN_SIZE);
        self.shapes.push((
            shape.label.to_string(),
            shape.corners.bounds(),
            shape.filled,
            shape.vertices.iter().map(|(_, side, m)| (*side, *m)).collect(),
        ));
    }

    fn draw_preview(&mut self, min: Vector2Int, max: Vector2Int) {
        self.previews.push((min, max));
    }

    fn draw_guides(&mut self, lines: [(Vector2Int, Vector2Int); 2]) {
        self.guides.push(lines);
    }
}

fn shape(name: &str, min: (i32, i32), max: (i32, i32)) -> Shape {
    Shape::from_corners(name, min.into(), max.into())
}

#[test]
fn test_move_and_resize_scenario() {
    let mut s = shape("cat", (10, 10), (50, 50));
    s.move_to(Vector2Int::new(20, 30), Vector2Int::new(100, 100));
    assert_eq!(s.bounds(), (Vector2Int::new(20, 30), Vector2Int::new(60, 70)));

    s.move_to(Vector2Int::new(90, 90), Vector2Int::new(100, 100));
    assert_eq!(s.top_left(), Vector2Int::new(60, 60));

    assert_eq!(s.move_vertex(Vector2Int::new(120, 110), 2), Ok(Corner::BottomRight));
    assert_eq!(s.size(), Vector2Int::new(60, 50));
    assert_eq!(
        s.move_vertex(Vector2Int::ZERO, 4),
        Err(GeometryError::InvalidVertex { index: 4 })
    );
}

#[test]
fn test_copy_is_independent() {
    let mut original = shape("cat", (0, 0), (10, 10));
    original.set_selected(true);
    let mut copy = original.copy();

    copy.move_to(Vector2Int::new(5, 5), Vector2Int::new(100, 100));
    assert_eq!(original.top_left(), Vector2Int::ZERO);
    assert!(!copy.is_selected());
    assert_eq!(copy.name(), "cat");
    assert_eq!(copy.color(), original.color());
}

#[test]
fn test_label_colors_are_stable() {
    assert_eq!(color_for_label("cat"), color_for_label("cat"));
    let s = shape("cat", (0, 0), (1, 1));
    assert_eq!(s.color(), color_for_label("cat"));
}

#[test]
fn test_boundary_points_are_outside() {
    let shapes = vec![shape("a", (0, 0), (10, 10))];
    assert_eq!(get_shape_within(Vector2Int::new(10, 5), &shapes), None);
    assert_eq!(get_shape_within(Vector2Int::new(9, 5), &shapes), Some(0));
    assert!(shapes[0].is_within(Vector2Int::new(9, 5)));
    assert!(!shapes[0].is_within(Vector2Int::new(0, 0)));
}

#[test]
fn test_hidden_shape_is_not_painted_but_still_hit() {
    let mut s = shape("a", (0, 0), (10, 10));
    s.visible = false;
    let mut recorder = Recorder::default();
    s.paint(1.0, &mut recorder);
    assert!(recorder.shapes.is_empty());

    let shapes = vec![s];
    assert_eq!(get_within(Vector2Int::new(5, 5), &shapes, 8.0).0, Some(0));
}

#[test]
fn test_canvas_paint_scales_and_marks_highlight() {
    let mut canvas = Canvas::new(CanvasSettings::default(), EventBus::shared());
    canvas.resize(Vector2Int::new(800, 600));
    canvas.set_image_size(Vector2Int::new(400, 300));
    canvas.add_shape(shape("cat", (10, 10), (50, 50)));
    canvas.set_scale(2.0);

    // hover the top-left vertex; image origin is (0, 0) at scale 2
    canvas.handle(InputEvent::PointerMoved(Vector2Int::new(22, 20)));
    assert_eq!(canvas.highlighted().map(|(_, c)| c), Some(Corner::TopLeft));

    let mut recorder = Recorder::default();
    canvas.paint(&mut recorder);
    let (label, bounds, filled, vertices) = &recorder.shapes[0];
    assert_eq!(label, "cat");
    assert_eq!(*bounds, (Vector2Int::new(20, 20), Vector2Int::new(100, 100)));
    assert!(!filled);
    assert_eq!(
        vertices[0],
        ((VERTEX_SIZE + VERTEX_HIGHLIGHT_GROWTH) * 2, VertexMarker::Square)
    );
    assert_eq!(vertices[1], (VERTEX_SIZE * 2, VertexMarker::Circle));
    assert!(recorder.previews.is_empty());
    assert!(recorder.guides.is_empty());
}

#[test]
fn test_canvas_paint_create_preview() {
    let mut canvas = Canvas::new(CanvasSettings::default(), EventBus::shared());
    canvas.resize(Vector2Int::new(800, 600));
    canvas.set_image_size(Vector2Int::new(400, 300));
    canvas.create_mode();
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Left,
        pos: Vector2Int::new(300, 250),
    });
    canvas.handle(InputEvent::PointerMoved(Vector2Int::new(250, 280)));

    let mut recorder = Recorder::default();
    canvas.paint(&mut recorder);
    assert_eq!(
        recorder.previews,
        vec![(Vector2Int::new(250, 250), Vector2Int::new(300, 280))]
    );
    assert_eq!(
        recorder.guides,
        vec![[
            (Vector2Int::new(0, 280), Vector2Int::new(800, 280)),
            (Vector2Int::new(250, 0), Vector2Int::new(250, 600)),
        ]]
    );
}
