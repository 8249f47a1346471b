use boxmark_canvas::helper::get_formation;
use boxmark_canvas::{CoordinatesSystem, Corner, Shape, ShapePoints, Vector2, Vector2Int, Viewport};
use proptest::prelude::*;

fn vec2i(range: std::ops::Range<i32>) -> impl Strategy<Value = Vector2Int> {
    (range.clone(), range).prop_map(|(x, y)| Vector2Int::new(x, y))
}

proptest! {
    #[test]
    fn test_min_max_bounds_every_point(points in prop::collection::vec(vec2i(-1000..1000), 1..20)) {
        let (min, max) = Vector2Int::get_min_max(&points).unwrap();
        for p in &points {
            prop_assert!(min.all_le(*p) && p.all_le(max));
        }
        prop_assert!(points.iter().any(|p| p.x == min.x));
        prop_assert!(points.iter().any(|p| p.y == max.y));
    }

    #[test]
    fn test_move_to_stays_inside(
        a in vec2i(0..200),
        b in vec2i(0..200),
        to in vec2i(-500..500),
    ) {
        let clip = Vector2Int::new(200, 200);
        let mut shape = Shape::from_corners("s", a, b);
        let size = shape.size();
        shape.move_to(to, clip);

        prop_assert_eq!(shape.size(), size);
        prop_assert!(shape.top_left().all_ge(Vector2Int::ZERO));
        prop_assert!(shape.bot_right().all_le(clip));
    }

    #[test]
    fn test_move_vertex_keeps_rectangle(
        a in vec2i(0..100),
        b in vec2i(0..100),
        to in vec2i(-100..200),
        index in 0usize..4,
    ) {
        let mut shape = Shape::from_corners("s", a, b);
        let landed = shape.move_vertex(to, index).unwrap();
        let p = shape.points();

        prop_assert_eq!(shape.corner(landed), to);
        prop_assert_eq!(p.get(Corner::TopLeft).y, p.get(Corner::TopRight).y);
        prop_assert_eq!(p.get(Corner::BottomLeft).y, p.get(Corner::BottomRight).y);
        prop_assert_eq!(p.get(Corner::TopLeft).x, p.get(Corner::BottomLeft).x);
        prop_assert!(shape.top_left().all_le(shape.bot_right()));
    }

    #[test]
    fn test_corners_normalize(a in vec2i(-100..100), b in vec2i(-100..100)) {
        let points = ShapePoints::from_corners(a, b);
        prop_assert_eq!(points.get(Corner::TopLeft), a.min(b));
        prop_assert_eq!(points.get(Corner::BottomRight), a.max(b));
    }

    #[test]
    fn test_viewport_never_leaves_system(
        system in vec2i(0..2000),
        size in (0.0f64..1500.0, 0.0f64..1500.0),
        to in (-5000.0f64..5000.0, -5000.0f64..5000.0),
    ) {
        let cs = CoordinatesSystem::new(system);
        let mut vp = Viewport::new(Vector2::new(size.0, size.1));
        vp.move_to(Vector2::new(to.0, to.1), &cs);

        let pos = vp.position();
        let bounds = cs.size().to_real();
        for (p, s, b) in [(pos.x, size.0, bounds.x), (pos.y, size.1, bounds.y)] {
            if s > b {
                prop_assert_eq!(p, 0.0);
            } else {
                prop_assert!(p.abs() <= (b - s) / 2.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_viewport_resize_is_idempotent(
        size in (1.0f64..1500.0, 1.0f64..1500.0),
        to in (-800.0f64..800.0, -800.0f64..800.0),
    ) {
        let cs = CoordinatesSystem::new(Vector2Int::new(1000, 800));
        let mut vp = Viewport::new(Vector2::new(300.0, 300.0));
        vp.move_to(Vector2::new(to.0, to.1), &cs);

        let new_size = Vector2::new(size.0, size.1);
        vp.resize(new_size, &cs);
        let once = vp.position();
        prop_assert!(!vp.resize(new_size, &cs));
        prop_assert_eq!(vp.position(), once);
    }

    #[test]
    fn test_formation_offsets(origin in vec2i(0..100), others in prop::collection::vec(vec2i(0..100), 1..5)) {
        let anchor = Shape::from_corners("a", origin, origin + Vector2Int::ONE);
        let shapes: Vec<Shape> = others
            .iter()
            .map(|p| Shape::from_corners("o", *p, *p + Vector2Int::ONE))
            .collect();
        let formation = get_formation(&anchor, shapes.iter());
        for ((_, offset), shape) in formation.iter().zip(&shapes) {
            prop_assert_eq!(anchor.top_left() - *offset, shape.top_left());
        }
    }
}
