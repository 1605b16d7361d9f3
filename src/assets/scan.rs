//! Photos folder scanner
//!
//! Walks the photos root and turns every image file into an `ImageRecord`.
//! Each subdirectory becomes one shoot.

use std::path::{Component, Path, PathBuf};

use image::ImageFormat;
use tokio::task;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::state::data::ImageRecord;

/// Scan the photos root on a blocking thread
pub async fn scan_photos(root: PathBuf) -> Result<Vec<ImageRecord>> {
    task::spawn_blocking(move || scan_photos_blocking(&root)).await?
}

/// Blocking implementation of the folder scan
pub fn scan_photos_blocking(root: &Path) -> Result<Vec<ImageRecord>> {
    if !root.exists() {
        return Err(Error::PhotosRootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    info!("Scanning photos in {}", root.display());

    let mut records = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }
        if ImageFormat::from_path(entry.path()).is_err() {
            debug!("Not an image, skipping {}", entry.path().display());
            continue;
        }

        if let Some(record) = to_record(root, entry.path()) {
            records.push(record);
        }
    }

    info!("Found {} images", records.len());
    Ok(records)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Build a record for `path`, which must live under `root`
fn to_record(root: &Path, path: &Path) -> Option<ImageRecord> {
    let relative = path.strip_prefix(root).ok()?;
    let directory = relative.parent().map(slash_path).unwrap_or_default();
    let name = path.file_stem()?.to_string_lossy().to_string();
    let url = std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .to_string();

    Some(ImageRecord::new(slash_path(relative), url, name, directory))
}

/// Join the normal components of a relative path with `/`
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
