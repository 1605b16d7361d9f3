/// Image asset module
///
/// This module handles:
/// - Discovering image files under the photos folder (scan.rs)
/// - Choosing which upcoming images to warm (prefetch.rs)
/// - Reading warmed images into memory (loader.rs)

pub mod loader;
pub mod prefetch;
pub mod scan;
