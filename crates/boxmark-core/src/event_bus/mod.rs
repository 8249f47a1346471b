//! # Event Bus Module
//!
//! Publish/subscribe hub for the observable side of the annotation engine:
//! shape list and selection changes, viewport moves, image switches and
//! failed actions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boxmark_core::event_bus::{AppEvent, CanvasEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::shared();
//! let subscription = bus.subscribe(EventFilter::only(EventCategory::Canvas), |event| {
//!     if let AppEvent::Canvas(CanvasEvent::ShapeAdded { id, label }) = event {
//!         println!("added {} as {}", label, id);
//!     }
//! });
//!
//! bus.emit(AppEvent::Canvas(CanvasEvent::ShapeSelected { id: 1 }));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
