//! Canvas type definitions: CanvasMode, PointerButton, InputEvent and the
//! collaborator traits the canvas calls out to.

use std::fmt;

use crate::scroll::Orientation;
use crate::vector::Vector2Int;

/// Interaction modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CanvasMode {
    /// Press and drag to draw a new box.
    Create,
    /// Hover, select, and start drags.
    #[default]
    Edit,
    /// Press and drag to pan.
    Move,
    /// Dragging the selection.
    MovingShape,
    /// Dragging one corner.
    MovingVertex,
    /// A transient copy follows the pointer.
    Copy,
}

impl CanvasMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasMode::Create => "create",
            CanvasMode::Edit => "edit",
            CanvasMode::Move => "move",
            CanvasMode::MovingShape => "moving_shape",
            CanvasMode::MovingVertex => "moving_vertex",
            CanvasMode::Copy => "copy",
        }
    }

    /// Whether a pointer gesture is in flight.
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            CanvasMode::MovingShape | CanvasMode::MovingVertex | CanvasMode::Copy
        )
    }
}

impl fmt::Display for CanvasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Input delivered to [`super::Canvas::handle`]. Positions are in widget
/// (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vector2Int),
    PointerPressed {
        button: PointerButton,
        pos: Vector2Int,
    },
    PointerReleased {
        button: PointerButton,
        pos: Vector2Int,
    },
    /// Wheel rotation in eighths of a degree; one notch is 120.
    Wheel { delta: i32 },
    Resized(Vector2Int),
    Scrolled {
        orientation: Orientation,
        value: i32,
    },
    FocusLost,
}

/// Asks the user for a label.
pub trait LabelPrompt {
    /// `None` or an empty string cancels.
    fn prompt_label(&mut self, title: &str, initial: &str) -> Option<String>;
}

impl<F> LabelPrompt for F
where
    F: FnMut(&str, &str) -> Option<String>,
{
    fn prompt_label(&mut self, title: &str, initial: &str) -> Option<String> {
        self(title, initial)
    }
}

/// Offers "paste here" for a dragged copy.
pub trait PasteMenu {
    fn confirm_paste(&mut self, at: Vector2Int) -> bool;
}

impl<F> PasteMenu for F
where
    F: FnMut(Vector2Int) -> bool,
{
    fn confirm_paste(&mut self, at: Vector2Int) -> bool {
        self(at)
    }
}

/// Prompt that always cancels; used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl LabelPrompt for NoPrompt {
    fn prompt_label(&mut self, _title: &str, _initial: &str) -> Option<String> {
        None
    }
}

impl PasteMenu for NoPrompt {
    fn confirm_paste(&mut self, _at: Vector2Int) -> bool {
        false
    }
}
