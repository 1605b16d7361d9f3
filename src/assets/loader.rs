//! Image cache warming
//!
//! Reads an image file ahead of time so the viewer can show it from memory
//! instead of waiting on the disk. Results are best-effort: a failed warm
//! only means the viewer loads the file itself when it gets there.

use iced::widget::image::Handle;

use crate::error::Result;

/// Read the image at `url` into an in-memory handle
pub async fn warm(url: String) -> Result<Handle> {
    let bytes = tokio::fs::read(&url).await?;
    Ok(Handle::from_bytes(bytes))
}
