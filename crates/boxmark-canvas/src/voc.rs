//! Pascal VOC annotation sidecars.
//!
//! Each image `photo.jpg` gets a `photo.xml` next to it holding one
//! `<object>` per bounding box. Coordinates are original-image pixels.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use boxmark_core::AnnotationError;
use serde::{Deserialize, Serialize};

use crate::vector::Vector2Int;

pub const XML_EXT: &str = "xml";
const IN_MEMORY: &str = "<memory>";

/// The exchange tuple between the canvas and sidecar files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub label: String,
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl BoundingBox {
    pub fn new(label: impl Into<String>, xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            label: label.into(),
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn min(&self) -> Vector2Int {
        Vector2Int::new(self.xmin, self.ymin)
    }

    pub fn max(&self) -> Vector2Int {
        Vector2Int::new(self.xmax, self.ymax)
    }

    /// Whether the box touches the image border.
    pub fn is_truncated(&self, image_size: Vector2Int) -> bool {
        self.xmin == 1
            || self.ymin == 1
            || self.xmax == image_size.x
            || self.ymax == image_size.y
    }
}

/// Renders a Pascal VOC document, tab indented.
pub fn write_annotation(
    image_path: &Path,
    image_size: Vector2Int,
    depth: u32,
    boxes: &[BoundingBox],
) -> String {
    let folder = image_path
        .parent()
        .and_then(|p| p.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let filename = image_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut out = String::from("<annotation>\n");
    push_element(&mut out, 1, "folder", &folder);
    push_element(&mut out, 1, "filename", &filename);
    push_element(&mut out, 1, "path", &image_path.to_string_lossy());
    out.push_str("\t<source>\n");
    push_element(&mut out, 2, "database", "Unknown");
    out.push_str("\t</source>\n");
    out.push_str("\t<size>\n");
    push_element(&mut out, 2, "width", &image_size.x.to_string());
    push_element(&mut out, 2, "height", &image_size.y.to_string());
    push_element(&mut out, 2, "depth", &depth.to_string());
    out.push_str("\t</size>\n");
    push_element(&mut out, 1, "segmented", "0");

    for bbox in boxes {
        let truncated = if bbox.is_truncated(image_size) { "1" } else { "0" };
        out.push_str("\t<object>\n");
        push_element(&mut out, 2, "name", &bbox.label);
        push_element(&mut out, 2, "pose", "Unspecified");
        push_element(&mut out, 2, "truncated", truncated);
        push_element(&mut out, 2, "difficult", "0");
        out.push_str("\t\t<bndbox>\n");
        push_element(&mut out, 3, "xmin", &bbox.xmin.to_string());
        push_element(&mut out, 3, "ymin", &bbox.ymin.to_string());
        push_element(&mut out, 3, "xmax", &bbox.xmax.to_string());
        push_element(&mut out, 3, "ymax", &bbox.ymax.to_string());
        out.push_str("\t\t</bndbox>\n");
        out.push_str("\t</object>\n");
    }
    out.push_str("</annotation>\n");
    out
}

fn push_element(out: &mut String, depth: usize, tag: &str, text: &str) {
    for _ in 0..depth {
        out.push('\t');
    }
    let _ = writeln!(out, "<{tag}>{}</{tag}>", escape(text));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Parses the boxes of a Pascal VOC document.
///
/// Objects without a `<bndbox>` are skipped. Coordinates may be written as
/// floats; they are truncated to whole pixels.
pub fn parse_annotation(xml: &str) -> Result<Vec<BoundingBox>, AnnotationError> {
    parse_annotation_at(xml, IN_MEMORY)
}

fn parse_annotation_at(xml: &str, path: &str) -> Result<Vec<BoundingBox>, AnnotationError> {
    let root = element_body(xml, "annotation").ok_or_else(|| AnnotationError::Parse {
        path: path.to_string(),
        reason: "no <annotation> root element".to_string(),
    })?;

    let mut boxes = Vec::new();
    let mut rest = root;
    while let Some((object, after)) = next_element(rest, "object") {
        rest = after;
        let Some(bndbox) = element_body(object, "bndbox") else {
            continue;
        };
        let label = element_body(object, "name").ok_or_else(|| AnnotationError::MissingElement {
            path: path.to_string(),
            element: "name".to_string(),
        })?;

        let coord = |tag: &str| -> Result<i32, AnnotationError> {
            let text = element_body(bndbox, tag).ok_or_else(|| AnnotationError::MissingElement {
                path: path.to_string(),
                element: tag.to_string(),
            })?;
            text.trim()
                .parse::<f64>()
                .map(|v| v.trunc() as i32)
                .map_err(|e| AnnotationError::Parse {
                    path: path.to_string(),
                    reason: format!("<{}> '{}': {}", tag, text.trim(), e),
                })
        };

        boxes.push(BoundingBox {
            label: unescape(label.trim()),
            xmin: coord("xmin")?,
            ymin: coord("ymin")?,
            xmax: coord("xmax")?,
            ymax: coord("ymax")?,
        });
    }
    Ok(boxes)
}

/// Content of the first `<tag>...</tag>` in `xml`.
fn element_body<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    next_element(xml, tag).map(|(body, _)| body)
}

/// First `<tag>` element: its content and the text after its closing tag.
/// Attributes on the opening tag are tolerated; `<tag/>` yields "".
fn next_element<'a>(xml: &'a str, tag: &str) -> Option<(&'a str, &'a str)> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let mut search = 0;
    loop {
        let start = search + xml[search..].find(&open)?;
        let after_name = start + open.len();
        let next = xml[after_name..].chars().next()?;
        if !(next == '>' || next == '/' || next.is_whitespace()) {
            // e.g. <objects> when looking for <object>
            search = after_name;
            continue;
        }
        let tag_end = after_name + xml[after_name..].find('>')?;
        if xml[..tag_end].ends_with('/') {
            return Some(("", &xml[tag_end + 1..]));
        }
        let body_start = tag_end + 1;
        let body_end = body_start + xml[body_start..].find(&close)?;
        return Some((&xml[body_start..body_end], &xml[body_end + close.len()..]));
    }
}

/// Whether any box carries `label`. `any` and `*` match any box; `none` and
/// `null` match an annotation without boxes.
pub fn find_by_label(boxes: &[BoundingBox], label: &str) -> bool {
    match label {
        "any" | "*" => !boxes.is_empty(),
        "none" | "null" => boxes.is_empty(),
        _ => boxes.iter().any(|b| b.label == label),
    }
}

/// Sidecar location for `image`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension(XML_EXT)
}

/// Reads and writes the annotations of one image.
pub trait AnnotationStore {
    /// Boxes stored for `image`; empty when there are none or they cannot
    /// be read.
    fn load(&self, image: &Path) -> Vec<BoundingBox>;

    fn save(&self, image: &Path, size: Vector2Int, boxes: &[BoundingBox]) -> Result<PathBuf, AnnotationError>;
}

/// Pascal VOC files next to each image.
#[derive(Debug, Clone)]
pub struct PascalVocStore {
    depth: u32,
}

impl PascalVocStore {
    pub fn new() -> Self {
        Self { depth: 3 }
    }

    /// Channel count written to `<depth>`.
    pub fn with_depth(depth: u32) -> Self {
        Self { depth }
    }

    /// Parses the sidecar at `path`, reporting why it failed.
    pub fn read(&self, path: &Path) -> Result<Vec<BoundingBox>, AnnotationError> {
        let display = path.display().to_string();
        let xml = fs::read_to_string(path).map_err(|e| AnnotationError::Parse {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        parse_annotation_at(&xml, &display)
    }
}

impl Default for PascalVocStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationStore for PascalVocStore {
    fn load(&self, image: &Path) -> Vec<BoundingBox> {
        let path = sidecar_path(image);
        if !path.exists() {
            return Vec::new();
        }
        match self.read(&path) {
            Ok(boxes) => boxes,
            Err(e) => {
                tracing::warn!("Ignoring unreadable annotation: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&self, image: &Path, size: Vector2Int, boxes: &[BoundingBox]) -> Result<PathBuf, AnnotationError> {
        let path = sidecar_path(image);
        let xml = write_annotation(image, size, self.depth, boxes);
        fs::write(&path, xml).map_err(|e| AnnotationError::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Wrote {} box(es) to {}", boxes.len(), path.display());
        Ok(path)
    }
}
