//! Error handling for Boxmark
//!
//! Provides error types for every layer of the annotation engine:
//! - Geometry errors (vectors, corner indices, point sets)
//! - Annotation errors (sidecar parsing and writing)
//! - Session errors (image folders and image metadata)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Geometry error type
///
/// Raised by the vector, rectangle and shape primitives. These indicate a
/// caller contract violation rather than a user-facing condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Corner index outside `0..=3`
    #[error("Invalid vertex index {index}, expected 0..=3")]
    InvalidVertex {
        /// The rejected corner index.
        index: usize,
    },

    /// An operand could not be combined with a vector
    #[error("Invalid argument type: expected {expected}, found {found}")]
    InvalidArgumentType {
        /// What the operation accepts.
        expected: String,
        /// What it was given.
        found: String,
    },

    /// Bounds requested for an empty point sequence
    #[error("Cannot compute bounds of an empty point set")]
    EmptyPointSet,
}

/// Annotation sidecar error type
///
/// Represents failures while reading or writing Pascal VOC files.
#[derive(Error, Debug, Clone)]
pub enum AnnotationError {
    /// The sidecar content is not a valid annotation document
    #[error("Failed to parse annotation {path}: {reason}")]
    Parse {
        /// The sidecar file, or `<memory>` for in-memory documents.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// A required element is absent
    #[error("Annotation {path} is missing <{element}>")]
    MissingElement {
        /// The sidecar file, or `<memory>` for in-memory documents.
        path: String,
        /// The missing element name.
        element: String,
    },

    /// The sidecar could not be written
    #[error("Failed to write annotation {path}: {reason}")]
    Write {
        /// The sidecar file.
        path: String,
        /// What went wrong.
        reason: String,
    },
}

/// Image session error type
#[derive(Error, Debug, Clone)]
pub enum SessionError {
    /// The folder contains no supported images
    #[error("No images found in {folder:?}")]
    NoImages {
        /// The scanned folder.
        folder: PathBuf,
    },

    /// The path given as a folder is not a directory
    #[error("Not a directory: {path:?}")]
    NotADirectory {
        /// The rejected path.
        path: PathBuf,
    },

    /// Image dimensions could not be read
    #[error("Cannot read image size of {path:?}: {reason}")]
    ImageSize {
        /// The image file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },
}

/// Main error type for Boxmark
///
/// Unified error type that can represent any error in the system.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Annotation error
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an annotation error
    pub fn is_annotation_error(&self) -> bool {
        matches!(self, Error::Annotation(_))
    }

    /// Check if this is a session error
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::Session(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
