use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use boxmark_canvas::{Canvas, CoordinatesSystem, InputEvent, Orientation, Vector2, Vector2Int, Viewport};
use boxmark_core::EventBus;
use boxmark_settings::CanvasSettings;

fn zoomed_canvas() -> Canvas {
    let mut canvas = Canvas::new(CanvasSettings::default(), EventBus::shared());
    canvas.resize(Vector2Int::new(800, 600));
    canvas.set_image_size(Vector2Int::new(400, 300));
    canvas.set_scale(2.0);
    canvas
}

#[test]
fn test_scrollbar_and_viewport_do_not_loop() {
    let mut canvas = zoomed_canvas();
    let moves = Arc::new(AtomicUsize::new(0));
    let counter = moves.clone();
    canvas.on_viewport_move(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    canvas.handle(InputEvent::Scrolled {
        orientation: Orientation::Vertical,
        value: 20,
    });
    assert_eq!(moves.load(Ordering::SeqCst), 1);
    assert_eq!(canvas.viewport().position(), Vector2::new(0.0, 20.0));

    // the scrollbar echoing the value it was just given is a no-op
    canvas.handle(InputEvent::Scrolled {
        orientation: Orientation::Vertical,
        value: 20,
    });
    assert_eq!(moves.load(Ordering::SeqCst), 1);

    canvas.move_viewport_by(Vector2::new(-15.0, 0.0));
    assert_eq!(moves.load(Ordering::SeqCst), 2);
    assert_eq!(canvas.scroll().horizontal.value, -15);
    assert_eq!(canvas.scroll().vertical.value, 20);
}

#[test]
fn test_zoom_out_recenters_viewport() {
    let mut canvas = zoomed_canvas();
    canvas.move_viewport_to(Vector2::new(50.0, 50.0));
    assert_eq!(canvas.viewport().position(), Vector2::new(50.0, 50.0));

    canvas.set_scale(1.0);
    assert_eq!(canvas.viewport().position(), Vector2::ZERO);
    assert!(!canvas.scroll().horizontal.is_scrollable());
    assert_eq!(canvas.pixmap_rel_pos(), Vector2Int::new(200, 150));
}

#[test]
fn test_rescale_is_idempotent() {
    let mut canvas = zoomed_canvas();
    canvas.move_viewport_to(Vector2::new(30.0, -10.0));
    let before = (canvas.draw_rect(), canvas.viewport().position());

    for _ in 0..5 {
        canvas.set_scale(3.0);
        canvas.set_scale(2.0);
        canvas.resize(Vector2Int::new(800, 600));
    }
    assert_eq!((canvas.draw_rect(), canvas.viewport().position()), before);
}

#[test]
fn test_pointer_maps_through_pan() {
    let mut canvas = zoomed_canvas();
    canvas.move_viewport_to(Vector2::new(40.0, 20.0));
    // image now starts 40/20 logical pixels left/up of the widget origin
    assert_eq!(canvas.pixmap_rel_pos(), Vector2Int::new(-40, -20));
    canvas.handle(InputEvent::PointerMoved(Vector2Int::new(60, 80)));
    assert_eq!(canvas.get_mouse(), Vector2Int::new(60, 80));
    assert_eq!(canvas.get_mouse_relative(), Vector2Int::new(50, 50));
}

#[test]
fn test_standalone_viewport_scenario() {
    let system = CoordinatesSystem::new(Vector2Int::new(1000, 1000));
    let mut viewport = Viewport::new(Vector2::new(200.0, 200.0));
    viewport.move_by(Vector2::new(5000.0, 0.0), &system);

    assert_eq!(viewport.position(), Vector2::new(400.0, 0.0));
    assert_eq!(
        viewport.to_global(Vector2::ZERO, &system),
        Vector2::new(900.0, 500.0)
    );
    assert_eq!(viewport.top_left(), Vector2::new(300.0, -100.0));
}

#[test]
fn test_horizontal_scroll_keeps_fractional_vertical_pan() {
    let mut canvas = zoomed_canvas();
    canvas.move_viewport_by(Vector2::new(0.0, 7.5));

    canvas.handle(InputEvent::Scrolled {
        orientation: Orientation::Horizontal,
        value: 20,
    });
    assert_eq!(canvas.viewport().position(), Vector2::new(20.0, 7.5));
}
