//! Ties the canvas to an image folder and its sidecar files.

use std::path::{Path, PathBuf};

use boxmark_core::{AppEvent, ErrorEvent, Error, Result, SessionError, SessionEvent};
use boxmark_settings::SessionSettings;
use chrono::Utc;

use crate::actions::{Action, ActionQueue, ActionSender};
use crate::canvas::Canvas;
use crate::session::ImageSession;
use crate::shape::Shape;
use crate::vector::Vector2Int;
use crate::voc::{AnnotationStore, BoundingBox};

impl From<&Shape> for BoundingBox {
    fn from(shape: &Shape) -> Self {
        let (min, max) = shape.bounds();
        BoundingBox::new(shape.name(), min.x, min.y, max.x, max.y)
    }
}

impl From<&BoundingBox> for Shape {
    fn from(bbox: &BoundingBox) -> Self {
        Shape::from_corners(bbox.label.clone(), bbox.min(), bbox.max())
    }
}

/// Reads an image header for its pixel size.
pub fn image_size(path: &Path) -> std::result::Result<Vector2Int, SessionError> {
    let (w, h) = image::image_dimensions(path).map_err(|e| SessionError::ImageSize {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    Ok(Vector2Int::new(clamp(w), clamp(h)))
}

/// The canvas, the image folder and the annotation store working together.
///
/// Switching images always writes the current shapes to the sidecar of the
/// image being left before the next sidecar is read.
pub struct Annotator {
    canvas: Canvas,
    store: Box<dyn AnnotationStore>,
    session: Option<ImageSession>,
    settings: SessionSettings,
    queue: ActionQueue,
}

impl Annotator {
    pub fn new(canvas: Canvas, store: impl AnnotationStore + 'static, settings: SessionSettings) -> Self {
        Self {
            canvas,
            store: Box::new(store),
            session: None,
            settings,
            queue: ActionQueue::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn session(&self) -> Option<&ImageSession> {
        self.session.as_ref()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Handle for queueing actions from other threads.
    pub fn sender(&self) -> ActionSender {
        self.queue.sender()
    }

    pub fn current_image(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.current())
    }

    /// Opens `folder` and shows its first image. Returns the image count.
    pub fn open_folder(&mut self, folder: impl AsRef<Path>) -> Result<usize> {
        let session = ImageSession::open(folder, &self.settings.image_extensions)?;
        self.flush()?;

        let count = session.len();
        self.canvas.bus().emit(AppEvent::Session(SessionEvent::FolderOpened {
            folder: session.folder().to_path_buf(),
            images: count,
        }));
        self.settings.last_folder = Some(session.folder().to_path_buf());
        self.session = Some(session);
        self.load_current()?;
        Ok(count)
    }

    /// Shows the current image with the shapes from its sidecar.
    pub fn load_current(&mut self) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(Error::other("No folder is open"));
        };
        let path = session.current().to_path_buf();
        let index = session.index();

        let size = match image_size(&path) {
            Ok(size) => size,
            Err(e) => {
                // a later flush must not write stale shapes to this sidecar
                self.canvas.replace_shapes(Vec::new());
                self.canvas.clear_image();
                tracing::warn!("Cannot show {}: {}", path.display(), e);
                return Err(e.into());
            }
        };
        self.canvas.set_image_size(size);
        let boxes = self.store.load(&path);
        let shapes = boxes.iter().map(Shape::from).collect();
        self.canvas.replace_shapes(shapes);

        tracing::info!(
            "Loaded {} ({}x{}) with {} shape(s)",
            path.display(),
            size.x,
            size.y,
            boxes.len()
        );
        self.canvas.bus().emit(AppEvent::Session(SessionEvent::ImageChanged {
            path: path.clone(),
            index,
        }));
        Ok(())
    }

    /// Writes the current shapes to the current image's sidecar.
    ///
    /// Returns the sidecar path, or `None` when no image is shown, including
    /// when the current image failed to load.
    pub fn flush(&self) -> Result<Option<PathBuf>> {
        let (Some(image), Some(size)) = (self.current_image(), self.canvas.image_size()) else {
            return Ok(None);
        };
        let boxes: Vec<BoundingBox> = self.canvas.shapes().iter().map(BoundingBox::from).collect();
        let path = self.store.save(image, size, &boxes)?;

        self.canvas.bus().emit(AppEvent::Session(SessionEvent::AnnotationsSaved {
            path: path.clone(),
            count: boxes.len(),
        }));
        Ok(Some(path))
    }

    /// Saves and moves to the next image. `false` at the last image.
    pub fn next_image(&mut self) -> Result<bool> {
        self.switch_image(|s| s.next().is_some())
    }

    /// Saves and moves to the previous image. `false` at the first image.
    pub fn prev_image(&mut self) -> Result<bool> {
        self.switch_image(|s| s.prev().is_some())
    }

    fn switch_image(&mut self, step: impl FnOnce(&mut ImageSession) -> bool) -> Result<bool> {
        if self.session.is_none() {
            return Ok(false);
        }
        self.flush()?;
        let moved = self.session.as_mut().is_some_and(step);
        if moved {
            self.load_current()?;
        }
        Ok(moved)
    }

    /// Runs one action on the canvas or the session.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        tracing::debug!("dispatch {}", action);
        match action {
            Action::NextImage => {
                self.next_image()?;
            }
            Action::PrevImage => {
                self.prev_image()?;
            }
            Action::CreateShape => self.canvas.create_mode(),
            Action::DeleteShape => {
                self.canvas.delete();
            }
            Action::MultiSelect => {
                self.canvas.multi_select_mode();
            }
            Action::Move => self.canvas.move_mode(),
            Action::EditLabel => {
                self.canvas.edit_label();
            }
        }
        Ok(())
    }

    /// Runs every queued action. A failing action is logged and reported on
    /// the bus; the rest still run. Returns how many actions ran.
    pub fn drain_actions(&mut self) -> usize {
        let actions = self.queue.drain();
        for action in &actions {
            if let Err(e) = self.dispatch(*action) {
                tracing::error!("Action {} failed: {}", action, e);
                self.canvas.bus().emit(AppEvent::Error(ErrorEvent::ActionFailed {
                    action: action.name().to_string(),
                    message: e.to_string(),
                    at: Utc::now(),
                }));
            }
        }
        actions.len()
    }
}

impl std::fmt::Debug for Annotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotator")
            .field("canvas", &self.canvas)
            .field("session", &self.session)
            .finish()
    }
}
