//! Type aliases for callback and sharing patterns used across crates.
//!
//! ```rust,ignore
//! use boxmark_core::types::*;
//!
//! let log: ThreadSafeVec<String> = thread_safe_vec();
//! let listener: DataCallback<f64> = Box::new(move |v| log.lock().push(v.to_string()));
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex`, so locking never returns a poison error.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// A thread-safe vector, typically used to collect notifications in tests.
pub type ThreadSafeVec<T> = Arc<Mutex<Vec<T>>>;

/// A callback that receives a single parameter.
///
/// Thread-safe, suitable for observer registration.
pub type DataCallback<T> = Box<dyn Fn(T) + Send + Sync>;

/// Create a new thread-safe value.
#[inline]
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

/// Create a new empty thread-safe vector.
#[inline]
pub fn thread_safe_vec<T>() -> ThreadSafeVec<T> {
    Arc::new(Mutex::new(Vec::new()))
}
