//! # Boxmark Core
//!
//! Error taxonomy, observable events and shared type aliases used by the
//! Boxmark annotation crates.

pub mod error;
pub mod event_bus;
pub mod types;

pub use error::{AnnotationError, Error, GeometryError, Result, SessionError};

pub use event_bus::{
    AppEvent, CanvasEvent, ErrorEvent, EventBus, EventBusConfig, EventBusError, EventCategory,
    EventFilter, SessionEvent, SharedBus, SubscriptionId,
};

pub use types::{thread_safe, thread_safe_vec, DataCallback, ThreadSafe, ThreadSafeVec};
