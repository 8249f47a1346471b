//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so they can be logged or replayed.
//! Shapes are identified by the numeric id the canvas assigns on insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Shape list, selection and viewport changes
    Canvas(CanvasEvent),
    /// Image folder navigation and sidecar persistence
    Session(SessionEvent),
    /// Error and diagnostic events
    Error(ErrorEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Canvas(_) => EventCategory::Canvas,
            AppEvent::Session(_) => EventCategory::Session,
            AppEvent::Error(_) => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Canvas(e) => e.description(),
            AppEvent::Session(e) => e.description(),
            AppEvent::Error(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Canvas events.
    Canvas,
    /// Session events.
    Session,
    /// Error and diagnostic events.
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Canvas => write!(f, "Canvas"),
            EventCategory::Session => write!(f, "Session"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}

/// Canvas events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    /// A shape was appended to the shape list.
    ShapeAdded {
        /// Id of the new shape.
        id: u64,
        /// Its label.
        label: String,
    },
    /// Shapes were deleted.
    ShapesRemoved {
        /// Ids of the deleted shapes.
        ids: Vec<u64>,
    },
    /// A shape joined the selection.
    ShapeSelected {
        /// Id of the selected shape.
        id: u64,
    },
    /// A shape left the selection.
    ShapeDeselected {
        /// Id of the deselected shape.
        id: u64,
    },
    /// The whole shape list was replaced (image switch).
    ShapesReplaced {
        /// Ids of the new shapes.
        ids: Vec<u64>,
    },
    /// Selected shapes were renamed.
    LabelChanged {
        /// Ids of the renamed shapes.
        ids: Vec<u64>,
        /// The new label.
        label: String,
    },
    /// The interaction mode changed.
    ModeChanged {
        /// Name of the new mode.
        mode: String,
    },
    /// The zoom factor changed.
    ScaleChanged {
        /// The new scale.
        scale: f64,
    },
    /// The viewport settled on a new position.
    ViewportMoved {
        /// Horizontal offset from the logical center.
        x: f64,
        /// Vertical offset from the logical center.
        y: f64,
    },
}

impl CanvasEvent {
    fn description(&self) -> String {
        match self {
            CanvasEvent::ShapeAdded { id, label } => format!("Shape {} added ({})", id, label),
            CanvasEvent::ShapesRemoved { ids } => format!("{} shape(s) removed", ids.len()),
            CanvasEvent::ShapeSelected { id } => format!("Shape {} selected", id),
            CanvasEvent::ShapeDeselected { id } => format!("Shape {} deselected", id),
            CanvasEvent::ShapesReplaced { ids } => format!("Shapes replaced ({})", ids.len()),
            CanvasEvent::LabelChanged { ids, label } => {
                format!("{} shape(s) relabelled to {}", ids.len(), label)
            }
            CanvasEvent::ModeChanged { mode } => format!("Mode: {}", mode),
            CanvasEvent::ScaleChanged { scale } => format!("Scale: {:.2}", scale),
            CanvasEvent::ViewportMoved { x, y } => format!("Viewport at ({:.1}, {:.1})", x, y),
        }
    }
}

/// Session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A folder of images was opened.
    FolderOpened {
        /// The folder.
        folder: PathBuf,
        /// Number of images found.
        images: usize,
    },
    /// The current image changed.
    ImageChanged {
        /// The new image.
        path: PathBuf,
        /// Its position in the folder listing.
        index: usize,
    },
    /// Shapes were flushed to a sidecar file.
    AnnotationsSaved {
        /// The sidecar file.
        path: PathBuf,
        /// Number of boxes written.
        count: usize,
    },
}

impl SessionEvent {
    fn description(&self) -> String {
        match self {
            SessionEvent::FolderOpened { folder, images } => {
                format!("Opened {} ({} images)", folder.display(), images)
            }
            SessionEvent::ImageChanged { path, index } => {
                format!("Image {}: {}", index, path.display())
            }
            SessionEvent::AnnotationsSaved { path, count } => {
                format!("Saved {} box(es) to {}", count, path.display())
            }
        }
    }
}

/// Error and diagnostic events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorEvent {
    /// Warning (non-blocking).
    Warning {
        /// Human-readable warning message.
        message: String,
    },
    /// A dispatched action failed and was abandoned.
    ActionFailed {
        /// Name of the action.
        action: String,
        /// Error message.
        message: String,
        /// When the failure happened.
        at: DateTime<Utc>,
    },
}

impl ErrorEvent {
    fn description(&self) -> String {
        match self {
            ErrorEvent::Warning { message } => format!("Warning: {}", message),
            ErrorEvent::ActionFailed {
                action, message, ..
            } => format!("Action {} failed: {}", action, message),
        }
    }
}
