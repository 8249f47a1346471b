//! # Boxmark Canvas
//!
//! The interaction engine of the annotation tool: geometry primitives,
//! labelled rectangles, the viewport over a zoomable image, and the canvas
//! state machine that turns pointer input into shape edits.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Vector2Int`], [`Vector2`], [`ShapePoints`] and the
//!   [`CoordinatesSystem`] the viewport pans over
//! - **Shapes**: [`Shape`] with hit-testing, clamped moves and corner drags
//! - **Viewport**: [`Viewport`] and the [`ScrollState`] scrollbars
//! - **Canvas**: [`Canvas`], driven by [`InputEvent`]s and actions
//! - **Persistence**: Pascal VOC sidecars through [`AnnotationStore`]
//! - **Session**: [`ImageSession`] and the [`Annotator`] that ties it all
//!   together
//!
//! ## Architecture
//!
//! ```text
//! Annotator
//!   ├── ImageSession (folder, current image)
//!   ├── AnnotationStore (Pascal VOC sidecars)
//!   ├── ActionQueue (actions from any thread)
//!   └── Canvas (state machine)
//!         ├── Shapes + SelectionManager
//!         ├── CoordinatesSystem + Viewport + ScrollState
//!         └── helper (hit-testing, group moves)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use boxmark_canvas::{Canvas, InputEvent, PointerButton, Vector2Int};
//! use boxmark_core::EventBus;
//! use boxmark_settings::CanvasSettings;
//!
//! let mut canvas = Canvas::new(CanvasSettings::default(), EventBus::shared())
//!     .with_label_prompt(|_title: &str, _initial: &str| Some("cat".to_string()));
//! canvas.resize(Vector2Int::new(800, 600));
//! canvas.set_image_size(Vector2Int::new(400, 300));
//!
//! canvas.create_mode();
//! canvas.handle(InputEvent::PointerPressed {
//!     button: PointerButton::Left,
//!     pos: Vector2Int::new(210, 160),
//! });
//! canvas.handle(InputEvent::PointerMoved(Vector2Int::new(260, 200)));
//! canvas.handle(InputEvent::PointerReleased {
//!     button: PointerButton::Left,
//!     pos: Vector2Int::new(260, 200),
//! });
//!
//! assert_eq!(canvas.shapes()[0].bounds(), (Vector2Int::new(10, 10), Vector2Int::new(60, 50)));
//! ```

pub mod actions;
pub mod annotator;
pub mod canvas;
pub mod coordinates;
pub mod helper;
pub mod scroll;
pub mod selection_manager;
pub mod session;
pub mod shape;
pub mod shape_points;
pub mod vector;
pub mod viewport;
pub mod voc;

pub use actions::{Action, ActionQueue, ActionSender};
pub use annotator::Annotator;
pub use canvas::{Canvas, CanvasMode, InputEvent, LabelPrompt, NoPrompt, PasteMenu, PointerButton};
pub use coordinates::CoordinatesSystem;
pub use helper::{Formation, VertexHit};
pub use scroll::{Orientation, ScrollAxis, ScrollState};
pub use selection_manager::SelectionManager;
pub use session::ImageSession;
pub use shape::{color_for_label, Rgb, Shape, ShapeDrawing, ShapeId, ShapePainter, VertexMarker};
pub use shape_points::{Corner, ShapePoints};
pub use vector::{Vector2, Vector2Int};
pub use viewport::Viewport;
pub use voc::{AnnotationStore, BoundingBox, PascalVocStore};
