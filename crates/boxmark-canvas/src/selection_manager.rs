use crate::shape::{Shape, ShapeId};

/// Tracks which shapes are selected, in selection order.
///
/// The manager owns the list of ids; the `selected` flag on each [`Shape`]
/// mirrors it. Every mutating method takes the shape slice so both stay in
/// step.
///
/// # Examples
///
/// ```
/// use boxmark_canvas::selection_manager::SelectionManager;
///
/// let manager = SelectionManager::new();
/// assert!(manager.is_empty());
/// assert_eq!(manager.first(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: Vec<ShapeId>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids, oldest selection first.
    pub fn ids(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    /// The shape selected first, if any.
    pub fn first(&self) -> Option<ShapeId> {
        self.selected.first().copied()
    }

    /// Adds `id` to the selection.
    ///
    /// # Returns
    ///
    /// `false` if the shape was already selected or does not exist.
    pub fn select(&mut self, id: ShapeId, shapes: &mut [Shape]) -> bool {
        if self.contains(id) {
            return false;
        }
        match shapes.iter_mut().find(|s| s.id() == id) {
            Some(shape) => {
                shape.set_selected(true);
                self.selected.push(id);
                true
            }
            None => false,
        }
    }

    /// Removes `id` from the selection.
    ///
    /// # Returns
    ///
    /// `false` if the shape was not selected.
    pub fn deselect(&mut self, id: ShapeId, shapes: &mut [Shape]) -> bool {
        let Some(index) = self.selected.iter().position(|s| *s == id) else {
            return false;
        };
        self.selected.remove(index);
        if let Some(shape) = shapes.iter_mut().find(|s| s.id() == id) {
            shape.set_selected(false);
        }
        true
    }

    /// Clears the selection and returns the ids that were selected.
    pub fn deselect_all(&mut self, shapes: &mut [Shape]) -> Vec<ShapeId> {
        let cleared = std::mem::take(&mut self.selected);
        for shape in shapes.iter_mut().filter(|s| cleared.contains(&s.id())) {
            shape.set_selected(false);
        }
        cleared
    }

    /// Forgets the selection without touching shape flags.
    pub fn reset(&mut self) {
        self.selected.clear();
    }
}
