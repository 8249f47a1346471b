//! Type aliases shared by the Boxmark crates.

pub mod aliases;

pub use aliases::*;
