//! The folder of images being annotated and the cursor over it.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use boxmark_core::SessionError;

/// Images of one folder in natural order, with a current position.
#[derive(Debug, Clone)]
pub struct ImageSession {
    folder: PathBuf,
    images: Vec<PathBuf>,
    current: usize,
}

impl ImageSession {
    /// Lists the images of `folder` whose extension is in `extensions`
    /// (case-insensitive). The session starts at the first image.
    pub fn open(folder: impl AsRef<Path>, extensions: &[String]) -> Result<Self, SessionError> {
        let folder = folder.as_ref().to_path_buf();
        if !folder.is_dir() {
            return Err(SessionError::NotADirectory { path: folder });
        }

        let entries = fs::read_dir(&folder).map_err(|_| SessionError::NotADirectory {
            path: folder.clone(),
        })?;
        let mut images: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();

        if images.is_empty() {
            return Err(SessionError::NoImages { folder });
        }
        images.sort_by(|a, b| natural_cmp(&file_key(a), &file_key(b)));

        tracing::info!("Opened {} with {} image(s)", folder.display(), images.len());
        Ok(Self {
            folder,
            images,
            current: 0,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Path {
        &self.images[self.current]
    }

    /// Advances to the next image; `None` at the last one.
    pub fn next(&mut self) -> Option<&Path> {
        if self.current + 1 >= self.images.len() {
            return None;
        }
        self.current += 1;
        Some(self.current())
    }

    /// Steps back; `None` at the first image.
    pub fn prev(&mut self) -> Option<&Path> {
        if self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.current())
    }

    /// Jumps to `index` if it exists.
    pub fn go_to(&mut self, index: usize) -> Option<&Path> {
        if index >= self.images.len() {
            return None;
        }
        self.current = index;
        Some(self.current())
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Compares strings so that digit runs order by value: `img2 < img10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let order = match (is_number(x), is_number(y)) {
                    (true, true) => cmp_numbers(x, y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => x.cmp(y),
                };
                if order != Ordering::Equal {
                    return order;
                }
            }
        }
    }
}

fn is_number(chunk: &str) -> bool {
    chunk.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

// Digit runs of any length, without overflowing an integer type.
fn cmp_numbers(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Splits into alternating digit and non-digit runs.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digit)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
