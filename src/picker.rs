//! Media sources that feed the coordinator's selection

use crate::error::{Error, Result};
use crate::types::{MediaKind, PickedMediaItem};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic", "heif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm"];

/// Something the user picks media from
pub trait MediaSource {
    /// Produce the picked items, in the order the user chose them
    fn pick(&self) -> Result<Vec<PickedMediaItem>>;
}

/// Classify a file by extension (case-insensitive)
pub fn detect_kind(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// Media source backed by files on disk
#[derive(Debug, Clone)]
pub struct PathSource {
    paths: Vec<PathBuf>,
    max_items: usize,
}

impl PathSource {
    /// Create a source over `paths`, accepting at most `max_items`
    pub fn new(paths: Vec<PathBuf>, max_items: usize) -> Self {
        Self { paths, max_items }
    }
}

impl MediaSource for PathSource {
    fn pick(&self) -> Result<Vec<PickedMediaItem>> {
        if self.paths.len() > self.max_items {
            return Err(Error::TooManyItems {
                max: self.max_items,
                got: self.paths.len(),
            });
        }

        self.paths
            .iter()
            .map(|path| {
                if !path.is_file() {
                    return Err(Error::MediaNotFound(path.clone()));
                }
                let kind =
                    detect_kind(path).ok_or_else(|| Error::UnsupportedMedia(path.clone()))?;
                Ok(PickedMediaItem::new(kind, path.clone()))
            })
            .collect()
    }
}
