//! Shape list, selection and mode operations for Canvas.

use boxmark_core::CanvasEvent;

use super::types::CanvasMode;
use super::Canvas;
use crate::helper::{get_formation, get_shape_within};
use crate::shape::{Shape, ShapeId};
use crate::shape_points::Corner;
use crate::vector::Vector2Int;

impl Canvas {
    /// Appends `shape` and assigns it a fresh id.
    pub fn add_shape(&mut self, mut shape: Shape) -> ShapeId {
        let id = self.next_id;
        self.next_id += 1;
        shape.set_id(id);
        shape.set_selected(false);
        let label = shape.name().to_string();
        self.shapes.push(shape);
        self.emit(CanvasEvent::ShapeAdded { id, label });
        id
    }

    /// Replaces the whole shape list, e.g. after switching images.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) -> Vec<ShapeId> {
        self.cancel_gesture();
        self.selection.reset();
        self.highlighted = None;
        self.filled = None;
        self.shapes.clear();

        let mut ids = Vec::with_capacity(shapes.len());
        for mut shape in shapes {
            let id = self.next_id;
            self.next_id += 1;
            shape.set_id(id);
            shape.set_selected(false);
            shape.set_fill(false);
            shape.unhighlight();
            self.shapes.push(shape);
            ids.push(id);
        }
        self.set_mode(CanvasMode::Edit);
        self.emit(CanvasEvent::ShapesReplaced { ids: ids.clone() });
        ids
    }

    /// Removes every selected shape.
    ///
    /// Any gesture referring to a removed shape is dropped, so a delete in
    /// the middle of a drag leaves the canvas in `Edit`.
    pub fn delete(&mut self) -> Vec<ShapeId> {
        let removed = self.selection.deselect_all(&mut self.shapes);
        if removed.is_empty() {
            return removed;
        }
        self.shapes.retain(|s| !removed.contains(&s.id()));

        self.clicked_shape = None;
        self.dragged_vertex = None;
        self.formation.clear();
        if self.highlighted.is_some_and(|(id, _)| removed.contains(&id)) {
            self.highlighted = None;
        }
        if self.filled.is_some_and(|id| removed.contains(&id)) {
            self.filled = None;
        }
        if matches!(self.mode, CanvasMode::MovingShape | CanvasMode::MovingVertex) {
            self.set_mode(CanvasMode::Edit);
        }

        tracing::info!("Deleted {} shape(s)", removed.len());
        self.emit(CanvasEvent::ShapesRemoved {
            ids: removed.clone(),
        });
        removed
    }

    /// Selects `id`.
    ///
    /// `multi` overrides the canvas multi-select flag. Without multi-select
    /// the previous selection is replaced. Selecting an already selected
    /// shape toggles it off unless `force` is set; a forced re-select
    /// remembers that the shape was selected before, so a click without
    /// drag can deselect it on release.
    pub fn select(&mut self, id: ShapeId, force: bool, multi: Option<bool>) {
        if self.shape(id).is_none() {
            tracing::debug!("select: no shape {}", id);
            return;
        }
        let multi = multi.unwrap_or(self.multi_select);
        let already = self.selection.contains(id);

        if !multi && self.selection.len() > 1 {
            self.was_selected = false;
            self.deselect_all();
            self.select_one(id);
            return;
        }

        if already && !force {
            if multi {
                self.deselect(id);
            } else {
                self.deselect_all();
            }
            return;
        }

        self.was_selected = force && already;
        if !multi && !already {
            self.deselect_all();
        }
        if !already {
            self.select_one(id);
        }
    }

    pub fn deselect(&mut self, id: ShapeId) {
        if !self.selection.deselect(id, &mut self.shapes) {
            tracing::debug!("deselect: shape {} not selected", id);
            return;
        }
        self.emit(CanvasEvent::ShapeDeselected { id });
    }

    pub fn deselect_all(&mut self) {
        for id in self.selection.deselect_all(&mut self.shapes) {
            self.emit(CanvasEvent::ShapeDeselected { id });
        }
    }

    /// Adds every id to the selection, keeping what is already selected.
    pub fn select_multiple(&mut self, ids: &[ShapeId]) {
        for id in ids {
            self.select_one(*id);
        }
    }

    /// Renames every selected shape through the label prompt.
    pub fn edit_label(&mut self) -> Option<String> {
        let first = self.selection.first()?;
        let initial = self.shape(first)?.name().to_string();
        let label = self
            .label_prompt
            .prompt_label("Edit Label", &initial)
            .filter(|l| !l.is_empty())?;

        let ids = self.selection.ids().to_vec();
        for shape in self.shapes.iter_mut().filter(|s| ids.contains(&s.id())) {
            shape.set_name(label.clone());
        }
        tracing::info!("Relabelled {} shape(s) as '{}'", ids.len(), label);
        self.emit(CanvasEvent::LabelChanged {
            ids,
            label: label.clone(),
        });
        Some(label)
    }

    /// Enters `Create`; the next press and release draw a box.
    pub fn create_mode(&mut self) {
        self.cancel_gesture();
        self.set_mode(CanvasMode::Create);
    }

    /// Toggles panning.
    pub fn move_mode(&mut self) {
        self.cancel_gesture();
        let next = if self.mode == CanvasMode::Move {
            CanvasMode::Edit
        } else {
            CanvasMode::Move
        };
        self.set_mode(next);
    }

    /// Toggles multi-select and returns the new state.
    pub fn multi_select_mode(&mut self) -> bool {
        self.multi_select = !self.multi_select;
        tracing::debug!("multi-select {}", self.multi_select);
        self.multi_select
    }

    /// Abandons any gesture and returns to `Edit`.
    pub fn focus_lost(&mut self) {
        self.cancel_gesture();
        self.set_mode(CanvasMode::Edit);
    }

    pub(super) fn set_mode(&mut self, mode: CanvasMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!("canvas mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.emit(CanvasEvent::ModeChanged {
            mode: mode.as_str().to_string(),
        });
    }

    fn select_one(&mut self, id: ShapeId) {
        if self.selection.select(id, &mut self.shapes) {
            tracing::debug!("selected shape {}", id);
            self.emit(CanvasEvent::ShapeSelected { id });
        }
    }

    /// Finishes a create drag from `creating_pos` to the pointer.
    pub(super) fn create(&mut self) {
        let Some(start) = self.creating_pos.take() else {
            self.set_mode(CanvasMode::Edit);
            return;
        };
        let end = self.pointer;

        if Vector2Int::distance(start, end) < self.settings.min_create_distance {
            tracing::debug!("create drag too short, ignored");
            self.set_mode(CanvasMode::Edit);
            return;
        }

        let label = self
            .label_prompt
            .prompt_label("Create Shape", "")
            .filter(|l| !l.is_empty());
        if let Some(label) = label {
            let origin = self.pixmap_rel_pos();
            let bound = self.resized_pixmap_size();
            let min = (start.min(end) - origin).clipped(Vector2Int::ZERO, bound);
            let max = (start.max(end) - origin).clipped(Vector2Int::ZERO, bound);
            let shape = Shape::from_corners(label, min / self.scale, max / self.scale);
            tracing::info!("Created shape '{}' at {}..{}", shape.name(), shape.top_left(), shape.bot_right());
            self.add_shape(shape);
        }
        self.set_mode(CanvasMode::Edit);
    }

    /// Starts dragging a copy of `id`.
    pub(super) fn start_copy(&mut self, id: ShapeId) {
        let Some(shape) = self.shape(id) else {
            return;
        };
        let copy = shape.copy();
        self.mouse_offset = self.get_mouse_relative() - copy.top_left();
        self.shape_copy = Some(copy);
        self.mouse_moved = 0.0;
        self.set_mode(CanvasMode::Copy);
    }

    /// Offers "paste here" and, on confirmation, adds the copy and selects it.
    pub(super) fn paste_copy(&mut self) {
        let Some(copy) = self.shape_copy.as_ref() else {
            self.set_mode(CanvasMode::Edit);
            return;
        };
        let at = copy.top_left();
        self.choosing_option = true;
        let confirmed = self.paste_menu.confirm_paste(at);
        self.choosing_option = false;
        if !confirmed {
            tracing::debug!("paste declined, copy discarded");
            self.cancel_copy();
            return;
        }

        if let Some(copy) = self.shape_copy.take() {
            let id = self.add_shape(copy);
            self.select(id, false, Some(false));
        }
        self.set_mode(CanvasMode::Edit);
    }

    pub(super) fn cancel_copy(&mut self) {
        self.shape_copy = None;
        self.mouse_offset = Vector2Int::ZERO;
        self.mouse_moved = 0.0;
        self.set_mode(CanvasMode::Edit);
    }

    /// Ends a shape or vertex drag.
    pub(super) fn finish_drag(&mut self) {
        self.clicked_shape = None;
        self.dragged_vertex = None;
        self.formation.clear();
        self.mouse_moved = 0.0;
        self.set_mode(CanvasMode::Edit);
        let under = get_shape_within(self.get_mouse_relative(), &self.shapes);
        self.auto_fill(under);
    }

    /// Starts moving `id` together with the rest of the selection.
    pub(super) fn start_shape_drag(&mut self, id: ShapeId) {
        let Some(anchor) = self.shape(id) else {
            return;
        };
        let offset = self.get_mouse_relative() - anchor.top_left();
        let formation = get_formation(anchor, self.selected_shapes());
        self.mouse_offset = offset;
        self.formation = formation;
        self.clicked_shape = Some(id);
        self.mouse_moved = 0.0;
        self.set_mode(CanvasMode::MovingShape);
    }

    /// Shows `id` filled; clears the previous fill.
    pub(super) fn auto_fill(&mut self, id: Option<ShapeId>) {
        if self.filled == id {
            return;
        }
        let previous = std::mem::replace(&mut self.filled, id);
        for shape in &mut self.shapes {
            if Some(shape.id()) == previous {
                shape.set_fill(false);
            } else if Some(shape.id()) == id {
                shape.set_fill(true);
            }
        }
    }

    pub(super) fn set_highlight(&mut self, target: Option<(ShapeId, Corner)>) {
        if self.highlighted == target {
            return;
        }
        let previous = std::mem::replace(&mut self.highlighted, target);
        if let Some((id, _)) = previous {
            if let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) {
                shape.unhighlight();
            }
        }
        if let Some((id, corner)) = target {
            if let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) {
                shape.highlight_vertex(corner);
            }
        }
    }

    fn cancel_gesture(&mut self) {
        self.creating_pos = None;
        self.shape_copy = None;
        self.clicked_shape = None;
        self.dragged_vertex = None;
        self.formation.clear();
        self.left_pressed = false;
        self.mouse_moved = 0.0;
        self.choosing_option = false;
    }
}
