//! Test data factories for media-flow types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use media_flow::types::{ConnectionHandle, MediaKind, PickedMediaItem, UploadSlot};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use url::Url;

/// Create an image item at a fake path
pub fn make_image(name: &str) -> PickedMediaItem {
    PickedMediaItem::new(MediaKind::Image, format!("/media/{name}.jpg"))
}

/// Create a video item at a fake path
pub fn make_video(name: &str) -> PickedMediaItem {
    PickedMediaItem::new(MediaKind::Video, format!("/media/{name}.mp4"))
}

/// Create `n` image items named `img0..imgN`
pub fn make_images(n: usize) -> Vec<PickedMediaItem> {
    (0..n).map(|i| make_image(&format!("img{i}"))).collect()
}

/// Connection handle for the test account
pub fn test_connection() -> ConnectionHandle {
    ConnectionHandle {
        account: "tester".to_string(),
        token: "test-token".to_string(),
    }
}

/// Upload slot with predictable URLs
pub fn make_slot(index: usize) -> UploadSlot {
    UploadSlot {
        put_url: Url::parse(&format!("https://upload.test/put/{index}")).unwrap(),
        get_url: Url::parse(&format!("https://cdn.test/media/{index}")).unwrap(),
        headers: BTreeMap::new(),
    }
}

/// JSON body the HTTP service answers with for `count` slots
pub fn slots_json(count: usize) -> String {
    let slots: Vec<UploadSlot> = (0..count).map(make_slot).collect();
    serde_json::json!({ "slots": slots }).to_string()
}

/// Write empty files with the given names into `dir`
pub fn write_media_files(dir: &TempDir, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.path().join(name);
            fs::write(&path, b"not really media").unwrap();
            path
        })
        .collect()
}
