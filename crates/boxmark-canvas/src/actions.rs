//! Named user actions and the queue that carries them to the canvas thread.
//!
//! Key bindings, menus and scripts produce [`Action`]s from any thread
//! through an [`ActionSender`]. The thread owning the canvas drains the
//! [`ActionQueue`] and runs them one by one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One bindable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    NextImage,
    PrevImage,
    CreateShape,
    DeleteShape,
    MultiSelect,
    Move,
    EditLabel,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::NextImage,
        Action::PrevImage,
        Action::CreateShape,
        Action::DeleteShape,
        Action::MultiSelect,
        Action::Move,
        Action::EditLabel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::NextImage => "next_image",
            Action::PrevImage => "prev_image",
            Action::CreateShape => "create_shape",
            Action::DeleteShape => "delete_shape",
            Action::MultiSelect => "multi_select",
            Action::Move => "move",
            Action::EditLabel => "edit_label",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        Action::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

/// Cloneable handle for enqueueing actions.
#[derive(Debug, Clone)]
pub struct ActionSender {
    tx: mpsc::UnboundedSender<Action>,
}

impl ActionSender {
    /// Returns `false` once the queue has been dropped.
    pub fn send(&self, action: Action) -> bool {
        match self.tx.send(action) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("Action {} dropped, queue closed", action);
                false
            }
        }
    }
}

/// Receiving end, owned by the canvas thread.
#[derive(Debug)]
pub struct ActionQueue {
    rx: mpsc::UnboundedReceiver<Action>,
    tx: mpsc::UnboundedSender<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { rx, tx }
    }

    pub fn sender(&self) -> ActionSender {
        ActionSender {
            tx: self.tx.clone(),
        }
    }

    /// Next pending action without waiting.
    pub fn try_next(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }

    /// Waits for the next action. Never returns `None` while the queue
    /// itself holds a sender.
    pub async fn next(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Everything queued so far.
    pub fn drain(&mut self) -> Vec<Action> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
