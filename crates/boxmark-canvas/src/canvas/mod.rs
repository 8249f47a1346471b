//! Interactive annotation canvas.
//!
//! Three coordinate spaces meet here:
//! - widget space: pointer positions as delivered by the host toolkit
//! - logical space: the [`CoordinatesSystem`] the [`Viewport`] pans over,
//!   sized to the scaled image plus padding
//! - image space: pixels of the original image, where shapes live
//!
//! The scaled image is drawn at [`Canvas::draw_rect`]; a widget position
//! maps to image space through [`Canvas::get_mouse_relative`].

mod input;
mod operations;
mod types;

pub use types::{CanvasMode, InputEvent, LabelPrompt, NoPrompt, PasteMenu, PointerButton};

use boxmark_core::{AppEvent, CanvasEvent, EventBus, SharedBus};
use boxmark_settings::CanvasSettings;

use crate::coordinates::CoordinatesSystem;
use crate::helper::{crosshair, relative_pos, Formation};
use crate::scroll::{Orientation, ScrollState};
use crate::selection_manager::SelectionManager;
use crate::shape::{Shape, ShapeId, ShapePainter};
use crate::shape_points::Corner;
use crate::vector::{Vector2, Vector2Int};
use crate::viewport::Viewport;

/// Canvas state: shapes, selection, viewport and the interaction mode.
///
/// All methods run on the thread that owns the canvas. Observers hear about
/// changes through the [`EventBus`] handed to [`Canvas::new`].
pub struct Canvas {
    shapes: Vec<Shape>,
    selection: SelectionManager,
    next_id: ShapeId,
    mode: CanvasMode,
    multi_select: bool,
    scale: f64,

    system: CoordinatesSystem,
    viewport: Viewport,
    scroll: ScrollState,
    widget_size: Vector2Int,
    image_size: Option<Vector2Int>,
    draw_rect: (Vector2Int, Vector2Int),

    pointer: Vector2Int,
    left_pressed: bool,
    creating_pos: Option<Vector2Int>,
    mouse_offset: Vector2Int,
    mouse_moved: f64,
    was_selected: bool,
    clicked_shape: Option<ShapeId>,
    dragged_vertex: Option<(ShapeId, Corner)>,
    formation: Formation,
    highlighted: Option<(ShapeId, Corner)>,
    filled: Option<ShapeId>,
    shape_copy: Option<Shape>,
    choosing_option: bool,

    settings: CanvasSettings,
    label_prompt: Box<dyn LabelPrompt>,
    paste_menu: Box<dyn PasteMenu>,
    bus: SharedBus,
}

impl Canvas {
    /// Creates an empty canvas in [`CanvasMode::Edit`] with no image.
    ///
    /// Label prompts and the paste menu cancel until real ones are attached
    /// with [`Canvas::with_label_prompt`] and [`Canvas::with_paste_menu`].
    pub fn new(settings: CanvasSettings, bus: SharedBus) -> Self {
        Self {
            shapes: Vec::new(),
            selection: SelectionManager::new(),
            next_id: 1,
            mode: CanvasMode::Edit,
            multi_select: false,
            scale: 1.0,
            system: CoordinatesSystem::default(),
            viewport: Viewport::default(),
            scroll: ScrollState::default(),
            widget_size: Vector2Int::ZERO,
            image_size: None,
            draw_rect: (Vector2Int::ZERO, Vector2Int::ZERO),
            pointer: Vector2Int::ZERO,
            left_pressed: false,
            creating_pos: None,
            mouse_offset: Vector2Int::ZERO,
            mouse_moved: 0.0,
            was_selected: false,
            clicked_shape: None,
            dragged_vertex: None,
            formation: Vec::new(),
            highlighted: None,
            filled: None,
            shape_copy: None,
            choosing_option: false,
            settings,
            label_prompt: Box::new(NoPrompt),
            paste_menu: Box::new(NoPrompt),
            bus,
        }
    }

    pub fn with_label_prompt(mut self, prompt: impl LabelPrompt + 'static) -> Self {
        self.label_prompt = Box::new(prompt);
        self
    }

    pub fn with_paste_menu(mut self, menu: impl PasteMenu + 'static) -> Self {
        self.paste_menu = Box::new(menu);
        self
    }

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> &[ShapeId] {
        self.selection.ids()
    }

    pub fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.selection.ids().iter().filter_map(|id| self.shape(*id))
    }

    /// Shape and corner under the pointer, if any.
    pub fn highlighted(&self) -> Option<(ShapeId, Corner)> {
        self.highlighted
    }

    /// Shape shown filled because the pointer is over it.
    pub fn filled(&self) -> Option<ShapeId> {
        self.filled
    }

    /// The transient copy while in [`CanvasMode::Copy`].
    pub fn shape_copy(&self) -> Option<&Shape> {
        self.shape_copy.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn system(&self) -> &CoordinatesSystem {
        &self.system
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn image_size(&self) -> Option<Vector2Int> {
        self.image_size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Registers a listener for viewport moves.
    pub fn on_viewport_move<F>(&mut self, listener: F)
    where
        F: Fn(Vector2) + Send + Sync + 'static,
    {
        self.viewport.on_move(listener);
    }

    /// Sets the zoom factor, clamped to the configured range.
    pub fn set_scale(&mut self, value: f64) {
        let value = value.clamp(self.settings.min_zoom, self.settings.max_zoom);
        if value == self.scale {
            return;
        }
        self.scale = value;
        tracing::debug!("canvas scale {:.2}", value);
        self.update_coordinates();
        self.emit(CanvasEvent::ScaleChanged { scale: value });
    }

    /// Zooms by one step per 120 units of `delta`.
    pub fn wheel(&mut self, delta: i32) {
        let target = self.scale + f64::from(delta) / 120.0 * self.settings.zoom_step;
        if target > self.settings.max_zoom {
            if self.scale < self.settings.max_zoom {
                self.set_scale(self.settings.max_zoom);
            }
            return;
        }
        self.set_scale(target);
    }

    /// The widget was resized.
    pub fn resize(&mut self, widget_size: Vector2Int) {
        self.widget_size = widget_size.max(Vector2Int::ZERO);
        self.update_coordinates();
    }

    /// A new image is shown; positions are relative to its top-left pixel.
    pub fn set_image_size(&mut self, size: Vector2Int) {
        self.image_size = Some(size.max(Vector2Int::ZERO));
        self.update_coordinates();
    }

    pub fn clear_image(&mut self) {
        self.image_size = None;
        self.update_coordinates();
    }

    /// Scaled image size.
    pub fn resized_pixmap_size(&self) -> Vector2Int {
        self.image_size.unwrap_or(Vector2Int::ZERO) * self.scale
    }

    /// Widget position of the scaled image's top-left corner.
    pub fn pixmap_rel_pos(&self) -> Vector2Int {
        let center = self.widget_size.to_real() / 2.0;
        let half_image = self.resized_pixmap_size().to_real() / 2.0;
        (center - self.viewport.position() - half_image).round()
    }

    /// `(top-left, size)` of the scaled image in widget space.
    pub fn draw_rect(&self) -> (Vector2Int, Vector2Int) {
        self.draw_rect
    }

    /// Last pointer position, in widget space.
    pub fn get_mouse(&self) -> Vector2Int {
        self.pointer
    }

    /// Last pointer position, in image pixels.
    pub fn get_mouse_relative(&self) -> Vector2Int {
        self.to_image(self.pointer)
    }

    /// Widget position to image pixels.
    pub fn to_image(&self, widget_pos: Vector2Int) -> Vector2Int {
        relative_pos(widget_pos, self.pixmap_rel_pos()) / self.scale
    }

    /// Widget position to a global logical position.
    pub fn to_logical(&self, widget_pos: Vector2Int) -> Vector2 {
        let local = widget_pos.to_real() - self.widget_size.to_real() / 2.0;
        self.viewport.to_global(local, &self.system)
    }

    /// Clamps an image position into the image.
    pub fn clip_to_image(&self, pos: Vector2Int) -> Vector2Int {
        pos.clipped(Vector2Int::ZERO, self.image_size.unwrap_or(Vector2Int::ZERO))
    }

    /// A scrollbar was dragged.
    pub fn on_scroll(&mut self, orientation: Orientation, value: i32) {
        if let Some(pos) = self.scroll.request(orientation, value, self.viewport.position()) {
            self.move_viewport_to(pos);
        }
    }

    /// Pans by `delta` logical units.
    pub fn move_viewport_by(&mut self, delta: Vector2) {
        self.move_viewport_to(self.viewport.position() + delta);
    }

    pub fn move_viewport_to(&mut self, to: Vector2) {
        if self.viewport.move_to(to, &self.system) {
            self.after_viewport_move();
        }
    }

    /// Draws every shape, the copy being dragged and the create preview.
    ///
    /// Shape corners are in scaled image space; offset them by
    /// `draw_rect().0` to reach widget space.
    pub fn paint(&mut self, painter: &mut dyn ShapePainter) {
        for shape in &mut self.shapes {
            shape.paint(self.scale, painter);
        }
        if let Some(copy) = self.shape_copy.as_mut() {
            copy.paint(self.scale, painter);
        }
        if self.mode == CanvasMode::Create {
            if let Some(start) = self.creating_pos {
                painter.draw_preview(start.min(self.pointer), start.max(self.pointer));
            }
            painter.draw_guides(crosshair(self.pointer, self.widget_size));
        }
    }

    fn update_coordinates(&mut self) {
        let logical = match self.image_size {
            Some(image) => (image + Vector2Int::splat(self.settings.canvas_padding)) * self.scale,
            None => Vector2Int::ZERO,
        };
        self.system.resize(logical);
        let moved = self.viewport.resize(self.widget_size.to_real(), &self.system);
        self.scroll.on_scale(
            self.system.size(),
            self.viewport.size(),
            self.viewport.position(),
        );
        if moved {
            self.after_viewport_move();
        } else {
            self.update_rect();
        }
    }

    fn after_viewport_move(&mut self) {
        let pos = self.viewport.position();
        self.scroll.on_viewport_moved(pos);
        self.update_rect();
        self.emit(CanvasEvent::ViewportMoved { x: pos.x, y: pos.y });
    }

    fn update_rect(&mut self) {
        self.draw_rect = (self.pixmap_rel_pos(), self.resized_pixmap_size());
    }

    fn emit(&self, event: CanvasEvent) {
        self.bus.emit(AppEvent::Canvas(event));
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("mode", &self.mode)
            .field("shapes", &self.shapes.len())
            .field("selected", &self.selection.ids())
            .field("scale", &self.scale)
            .field("viewport", &self.viewport)
            .field("image_size", &self.image_size)
            .finish()
    }
}
