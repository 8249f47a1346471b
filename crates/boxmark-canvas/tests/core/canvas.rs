use std::cell::Cell;
use std::rc::Rc;

use boxmark_canvas::{Canvas, CanvasMode, InputEvent, PointerButton, Shape, Vector2Int};
use boxmark_core::{AppEvent, CanvasEvent, EventBus};
use boxmark_settings::CanvasSettings;

// 800x600 widget showing a 400x300 image at scale 1; the image's top-left
// pixel sits at widget (200, 150).
fn canvas() -> Canvas {
    let mut canvas = Canvas::new(CanvasSettings::default(), EventBus::shared());
    canvas.resize(Vector2Int::new(800, 600));
    canvas.set_image_size(Vector2Int::new(400, 300));
    canvas
}

fn at(x: i32, y: i32) -> Vector2Int {
    Vector2Int::new(200 + x, 150 + y)
}

fn drag(canvas: &mut Canvas, button: PointerButton, from: Vector2Int, to: Vector2Int) {
    canvas.handle(InputEvent::PointerPressed { button, pos: from });
    canvas.handle(InputEvent::PointerMoved(to));
    canvas.handle(InputEvent::PointerReleased { button, pos: to });
}

fn click(canvas: &mut Canvas, button: PointerButton, pos: Vector2Int) {
    canvas.handle(InputEvent::PointerPressed { button, pos });
    canvas.handle(InputEvent::PointerReleased { button, pos });
}

#[test]
fn test_create_shape_from_drag() {
    let mut canvas = canvas().with_label_prompt(|title: &str, initial: &str| {
        assert_eq!(title, "Create Shape");
        assert!(initial.is_empty());
        Some("cat".to_string())
    });
    canvas.create_mode();
    drag(&mut canvas, PointerButton::Left, at(60, 50), at(10, 20));

    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert_eq!(canvas.shape_count(), 1);
    let shape = &canvas.shapes()[0];
    assert_eq!(shape.name(), "cat");
    assert_eq!(shape.bounds(), (Vector2Int::new(10, 20), Vector2Int::new(60, 50)));
}

#[test]
fn test_create_below_threshold_is_discarded() {
    let asked = Rc::new(Cell::new(false));
    let flag = asked.clone();
    let mut canvas = canvas().with_label_prompt(move |_: &str, _: &str| {
        flag.set(true);
        Some("cat".to_string())
    });
    canvas.create_mode();
    drag(&mut canvas, PointerButton::Left, at(10, 10), at(15, 15));

    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert_eq!(canvas.shape_count(), 0);
    assert!(!asked.get());
}

#[test]
fn test_create_with_empty_label_is_cancelled() {
    let mut canvas = canvas().with_label_prompt(|_: &str, _: &str| Some(String::new()));
    canvas.create_mode();
    drag(&mut canvas, PointerButton::Left, at(10, 10), at(100, 100));

    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_create_when_zoomed_uses_image_pixels() {
    let mut canvas = canvas().with_label_prompt(|_: &str, _: &str| Some("car".to_string()));
    canvas.set_scale(2.0);
    // scaled image (800x600) fills the widget exactly
    assert_eq!(canvas.pixmap_rel_pos(), Vector2Int::ZERO);

    canvas.create_mode();
    drag(
        &mut canvas,
        PointerButton::Left,
        Vector2Int::new(100, 100),
        Vector2Int::new(200, 160),
    );
    assert_eq!(
        canvas.shapes()[0].bounds(),
        (Vector2Int::new(50, 50), Vector2Int::new(100, 80))
    );
}

#[test]
fn test_create_is_clipped_to_image() {
    let mut canvas = canvas().with_label_prompt(|_: &str, _: &str| Some("sky".to_string()));
    canvas.create_mode();
    drag(&mut canvas, PointerButton::Left, at(-50, -50), at(500, 20));

    assert_eq!(
        canvas.shapes()[0].bounds(),
        (Vector2Int::new(0, 0), Vector2Int::new(400, 20))
    );
}

#[test]
fn test_copy_and_paste() {
    let offered = Rc::new(Cell::new(None));
    let seen = offered.clone();
    let mut canvas = canvas().with_paste_menu(move |pos: Vector2Int| {
        seen.set(Some(pos));
        true
    });
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));

    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Right,
        pos: at(20, 20),
    });
    assert_eq!(canvas.mode(), CanvasMode::Copy);
    canvas.handle(InputEvent::PointerMoved(at(100, 100)));
    assert_eq!(
        canvas.shape_copy().map(|s| s.top_left()),
        Some(Vector2Int::new(90, 90))
    );

    // released after a drag: no menu yet
    canvas.handle(InputEvent::PointerReleased {
        button: PointerButton::Right,
        pos: at(100, 100),
    });
    assert_eq!(canvas.mode(), CanvasMode::Copy);
    assert_eq!(offered.get(), None);

    click(&mut canvas, PointerButton::Right, at(100, 100));
    assert_eq!(offered.get(), Some(Vector2Int::new(90, 90)));
    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert_eq!(canvas.shape_count(), 2);
    assert!(canvas.shape_copy().is_none());

    let pasted = &canvas.shapes()[1];
    assert_eq!(pasted.name(), "cat");
    assert_eq!(pasted.bounds(), (Vector2Int::new(90, 90), Vector2Int::new(130, 130)));
    assert_eq!(canvas.selected_ids(), &[pasted.id()]);
}

#[test]
fn test_copy_follows_pointer_within_image() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Right,
        pos: at(20, 20),
    });
    canvas.handle(InputEvent::PointerMoved(at(1000, 1000)));
    assert_eq!(
        canvas.shape_copy().map(|s| s.bot_right()),
        Some(Vector2Int::new(400, 300))
    );
}

#[test]
fn test_left_click_cancels_copy() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Right,
        pos: at(20, 20),
    });
    canvas.handle(InputEvent::PointerMoved(at(200, 200)));
    click(&mut canvas, PointerButton::Left, at(200, 200));

    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert!(canvas.shape_copy().is_none());
    assert_eq!(canvas.shape_count(), 1);
}

#[test]
fn test_declined_paste_discards_copy() {
    let mut canvas = canvas().with_paste_menu(|_: Vector2Int| false);
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    click(&mut canvas, PointerButton::Right, at(20, 20));

    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert!(canvas.shape_copy().is_none());
    assert_eq!(canvas.shape_count(), 1);

    // a new right press starts a fresh copy from the shape under the pointer
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Right,
        pos: at(30, 30),
    });
    assert_eq!(canvas.mode(), CanvasMode::Copy);
    assert_eq!(
        canvas.shape_copy().map(|s| s.top_left()),
        Some(Vector2Int::new(10, 10))
    );
}

#[test]
fn test_delete_during_shape_drag() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Left,
        pos: at(20, 20),
    });
    assert_eq!(canvas.mode(), CanvasMode::MovingShape);

    assert_eq!(canvas.delete(), vec![1]);
    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert_eq!(canvas.shape_count(), 0);

    canvas.handle(InputEvent::PointerMoved(at(80, 80)));
    canvas.handle(InputEvent::PointerReleased {
        button: PointerButton::Left,
        pos: at(80, 80),
    });
    assert_eq!(canvas.mode(), CanvasMode::Edit);
    assert!(canvas.highlighted().is_none());
}

#[test]
fn test_group_move_keeps_formation() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("a", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    canvas.add_shape(Shape::from_corners("b", Vector2Int::new(100, 100), Vector2Int::new(120, 130)));
    canvas.multi_select_mode();

    click(&mut canvas, PointerButton::Left, at(20, 20));
    click(&mut canvas, PointerButton::Left, at(110, 110));
    assert_eq!(canvas.selected_ids(), &[1, 2]);

    drag(&mut canvas, PointerButton::Left, at(20, 20), at(40, 30));
    assert_eq!(canvas.shapes()[0].top_left(), Vector2Int::new(30, 20));
    assert_eq!(canvas.shapes()[1].top_left(), Vector2Int::new(120, 110));
    assert_eq!(canvas.selected_ids(), &[1, 2]);
}

#[test]
fn test_vertex_drag_through_opposite_corner() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));

    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Left,
        pos: at(50, 50),
    });
    assert_eq!(canvas.mode(), CanvasMode::MovingVertex);
    canvas.handle(InputEvent::PointerMoved(at(5, 5)));
    assert_eq!(
        canvas.shapes()[0].bounds(),
        (Vector2Int::new(5, 5), Vector2Int::new(10, 10))
    );
    canvas.handle(InputEvent::PointerMoved(at(30, 40)));
    canvas.handle(InputEvent::PointerReleased {
        button: PointerButton::Left,
        pos: at(30, 40),
    });

    assert_eq!(
        canvas.shapes()[0].bounds(),
        (Vector2Int::new(10, 10), Vector2Int::new(30, 40))
    );
    assert_eq!(canvas.mode(), CanvasMode::Edit);
}

#[test]
fn test_focus_lost_mid_gesture() {
    let mut canvas = canvas();
    canvas.add_shape(Shape::from_corners("cat", Vector2Int::new(10, 10), Vector2Int::new(50, 50)));
    canvas.handle(InputEvent::PointerPressed {
        button: PointerButton::Left,
        pos: at(50, 50),
    });
    canvas.handle(InputEvent::FocusLost);
    assert_eq!(canvas.mode(), CanvasMode::Edit);

    canvas.handle(InputEvent::PointerMoved(at(100, 100)));
    assert_eq!(
        canvas.shapes()[0].bounds(),
        (Vector2Int::new(10, 10), Vector2Int::new(50, 50))
    );
}

#[test]
fn test_events_for_create_and_select() {
    let mut canvas = canvas().with_label_prompt(|_: &str, _: &str| Some("cat".to_string()));
    let mut rx = canvas.bus().receiver();

    canvas.create_mode();
    drag(&mut canvas, PointerButton::Left, at(10, 10), at(60, 60));
    click(&mut canvas, PointerButton::Left, at(30, 30));

    let mut events = Vec::new();
    while let Ok(AppEvent::Canvas(event)) = rx.try_recv() {
        events.push(event);
    }
    assert!(events.contains(&CanvasEvent::ShapeAdded {
        id: 1,
        label: "cat".to_string()
    }));
    assert!(events.contains(&CanvasEvent::ModeChanged {
        mode: "create".to_string()
    }));
    assert!(events.contains(&CanvasEvent::ShapeSelected { id: 1 }));
}
