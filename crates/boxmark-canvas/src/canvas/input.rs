//! Pointer input handling for Canvas.

use super::types::{CanvasMode, InputEvent, PointerButton};
use super::Canvas;
use crate::helper::{get_shape_within, get_within, move_shapes};
use crate::vector::{Vector2, Vector2Int};

impl Canvas {
    /// Feeds one input event through the state machine.
    ///
    /// Pointer events are ignored while no image is shown.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved(pos) => self.pointer_moved(pos),
            InputEvent::PointerPressed { button, pos } => self.pointer_pressed(button, pos),
            InputEvent::PointerReleased { button, pos } => self.pointer_released(button, pos),
            InputEvent::Wheel { delta } => self.wheel(delta),
            InputEvent::Resized(size) => self.resize(size),
            InputEvent::Scrolled { orientation, value } => self.on_scroll(orientation, value),
            InputEvent::FocusLost => self.focus_lost(),
        }
    }

    pub fn pointer_moved(&mut self, pos: Vector2Int) {
        let Some(image) = self.image_size else {
            return;
        };
        let previous = std::mem::replace(&mut self.pointer, pos);
        let travelled = Vector2Int::distance(previous, pos);

        match self.mode {
            CanvasMode::Move => {
                if self.left_pressed {
                    let factor = self.settings.move_sensitivity * self.scale.min(1.0);
                    let delta: Vector2 = (pos - previous).to_real();
                    self.move_viewport_by(-delta * factor);
                }
            }
            CanvasMode::Copy => {
                self.mouse_moved += travelled;
                let target = self.get_mouse_relative() - self.mouse_offset;
                if let Some(copy) = self.shape_copy.as_mut() {
                    copy.move_to(target, image);
                }
            }
            CanvasMode::MovingVertex => {
                let Some((id, corner)) = self.dragged_vertex else {
                    return;
                };
                let to = self.clip_to_image(self.get_mouse_relative());
                let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) else {
                    return;
                };
                let landed = shape.move_corner(to, corner);
                self.dragged_vertex = Some((id, landed));
                self.highlighted = Some((id, landed));
            }
            CanvasMode::MovingShape => {
                self.mouse_moved += travelled;
                if self.mouse_moved <= self.settings.min_move_distance {
                    return;
                }
                let Some(clicked) = self.clicked_shape else {
                    return;
                };
                let target = self.get_mouse_relative() - self.mouse_offset;
                move_shapes(target, clicked, &self.formation, image, &mut self.shapes);
            }
            CanvasMode::Edit | CanvasMode::Create => {
                if !self.left_pressed {
                    self.hover();
                }
            }
        }
    }

    pub fn pointer_pressed(&mut self, button: PointerButton, pos: Vector2Int) {
        if self.image_size.is_none() || self.choosing_option {
            return;
        }
        self.pointer = pos;
        let rel = self.get_mouse_relative();

        match (button, self.mode) {
            (PointerButton::Right, CanvasMode::Edit) => {
                if let Some(id) = get_shape_within(rel, &self.shapes) {
                    self.start_copy(id);
                }
            }
            (PointerButton::Right, CanvasMode::Copy) => {
                self.mouse_moved = 0.0;
            }
            (PointerButton::Left, CanvasMode::Copy) => {
                self.cancel_copy();
            }
            (PointerButton::Left, CanvasMode::Move) => {
                self.left_pressed = true;
            }
            (PointerButton::Left, CanvasMode::Create) => {
                self.left_pressed = true;
                self.creating_pos = Some(pos);
            }
            (PointerButton::Left, CanvasMode::Edit) => {
                self.left_pressed = true;
                let radius = self.settings.highlight_radius / self.scale;
                let (within, vertex) = get_within(rel, &self.shapes, radius);
                if let Some(hit) = vertex {
                    self.deselect_all();
                    self.select(hit.shape, true, None);
                    self.dragged_vertex = Some((hit.shape, hit.corner));
                    self.set_highlight(Some((hit.shape, hit.corner)));
                    self.set_mode(CanvasMode::MovingVertex);
                } else if let Some(id) = within {
                    self.select(id, true, None);
                    self.start_shape_drag(id);
                } else {
                    self.deselect_all();
                }
            }
            _ => {}
        }
    }

    pub fn pointer_released(&mut self, button: PointerButton, pos: Vector2Int) {
        if self.image_size.is_none() || self.choosing_option {
            return;
        }
        self.pointer = pos;
        if button == PointerButton::Left {
            self.left_pressed = false;
        }

        match (button, self.mode) {
            (PointerButton::Right, CanvasMode::Copy) => {
                if self.mouse_moved <= self.settings.min_move_distance {
                    self.paste_copy();
                }
            }
            (PointerButton::Left, CanvasMode::Create) => {
                if self.creating_pos.is_some() {
                    self.create();
                }
            }
            (PointerButton::Left, CanvasMode::MovingShape) => {
                if self.mouse_moved <= self.settings.min_move_distance && self.was_selected {
                    if let Some(id) = self.clicked_shape {
                        self.deselect(id);
                    }
                }
                self.was_selected = false;
                self.finish_drag();
            }
            (PointerButton::Left, CanvasMode::MovingVertex) => {
                self.finish_drag();
            }
            _ => {}
        }
    }

    /// Highlights the vertex under the pointer, or fills the shape under it.
    fn hover(&mut self) {
        let rel = self.get_mouse_relative();
        let radius = self.settings.highlight_radius / self.scale;
        let (within, vertex) = get_within(rel, &self.shapes, radius);
        match vertex {
            Some(hit) => {
                self.set_highlight(Some((hit.shape, hit.corner)));
                self.auto_fill(None);
            }
            None => {
                self.set_highlight(None);
                self.auto_fill(within);
            }
        }
    }
}
