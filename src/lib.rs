//! # Boxmark
//!
//! A bounding-box annotation engine for images:
//! - Zoomable, pannable canvas over an image with scrollbar sync
//! - Create, move, resize, copy and label rectangles
//! - Pascal VOC XML sidecar per image
//!
//! ## Architecture
//!
//! Boxmark is organized as a workspace with multiple crates:
//!
//! 1. **boxmark-core** - Error types, event bus, shared aliases
//! 2. **boxmark-settings** - Configuration file and validation
//! 3. **boxmark-canvas** - Geometry, canvas state machine, sidecars, image session
//! 4. **boxmark** - Composition root and the command line entry point

use std::path::{Path, PathBuf};

use anyhow::Context;

pub use boxmark_canvas as canvas;
pub use boxmark_settings as settings;

pub use boxmark_core::{
    AppEvent, CanvasEvent, Error, ErrorEvent, EventBus, EventFilter, Result, SessionEvent,
    SharedBus,
};

pub use boxmark_canvas::{
    Action, ActionQueue, ActionSender, AnnotationStore, Annotator, BoundingBox, Canvas, CanvasMode,
    ImageSession, InputEvent, PascalVocStore, PointerButton, Shape, Vector2, Vector2Int, Viewport,
};

pub use boxmark_settings::{CanvasSettings, Config, SessionSettings, UiSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// One image of a folder summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub path: PathBuf,
    pub boxes: usize,
}

/// Lists every image of `folder` with its annotation count, without
/// touching any sidecar.
pub fn summarize_folder(folder: &Path, settings: &SessionSettings) -> anyhow::Result<Vec<ImageSummary>> {
    let session = ImageSession::open(folder, &settings.image_extensions)
        .with_context(|| format!("Cannot open image folder {}", folder.display()))?;
    let store = PascalVocStore::new();

    let summary: Vec<ImageSummary> = session
        .images()
        .iter()
        .map(|path| ImageSummary {
            path: path.clone(),
            boxes: store.load(path).len(),
        })
        .collect();
    for entry in &summary {
        tracing::info!("{}: {} box(es)", entry.path.display(), entry.boxes);
    }
    Ok(summary)
}

/// Command line run: summarize `folder` (or the remembered one) and
/// remember it in the config at `config_path`.
pub fn run(folder: Option<PathBuf>, config_path: &Path) -> anyhow::Result<Vec<ImageSummary>> {
    let mut config = Config::load_or_default(config_path);
    let folder = folder
        .or_else(|| config.session.last_folder.clone())
        .context("No folder given and no folder remembered from a previous run")?;

    let summary = summarize_folder(&folder, &config.session)?;

    config.set_last_folder(folder.clone());
    config
        .save_to_file(config_path)
        .with_context(|| format!("Cannot save config to {}", config_path.display()))?;
    Ok(summary)
}
