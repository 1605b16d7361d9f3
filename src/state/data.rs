//! Shared data structures for the portfolio
//!
//! These structs represent the data model that flows from the
//! asset scanner into the catalog and on to the viewer.

/// A single image asset discovered under the photos root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRecord {
    /// Path relative to the photos root, `/`-separated (e.g., "Paris_2023/01.jpg")
    pub path: String,
    /// Resolved address the image is loaded from (absolute file path)
    pub url: String,
    /// File stem (e.g., "01")
    pub name: String,
    /// Relative parent directory; names the shoot. Empty at the root.
    pub directory: String,
}

impl ImageRecord {
    pub fn new(
        path: impl Into<String>,
        url: impl Into<String>,
        name: impl Into<String>,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            name: name.into(),
            directory: directory.into(),
        }
    }
}

/// A named, ordered group of images sharing the same directory
#[derive(Debug, Clone, PartialEq)]
pub struct Shoot {
    name: String,
    images: Vec<ImageRecord>,
}

impl Shoot {
    pub(crate) fn new(name: String, images: Vec<ImageRecord>) -> Self {
        Self { name, images }
    }

    /// Shoot identifier (the directory name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as shown to visitors: underscores become spaces
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Human-readable form of a shoot name.
///
/// Images placed directly in the photos root form a shoot with an empty
/// name, which is labelled "Untitled".
pub fn display_name(name: &str) -> String {
    if name.is_empty() {
        "Untitled".to_string()
    } else {
        name.replace('_', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_replaces_underscores() {
        assert_eq!(display_name("Paris_Fashion_Week"), "Paris Fashion Week");
        assert_eq!(display_name("studio"), "studio");
    }

    #[test]
    fn test_display_name_of_root_shoot() {
        assert_eq!(display_name(""), "Untitled");
    }

    #[test]
    fn test_shoot_accessors() {
        let shoot = Shoot::new(
            "beach".to_string(),
            vec![ImageRecord::new("beach/a.jpg", "/p/beach/a.jpg", "a", "beach")],
        );
        assert_eq!(shoot.len(), 1);
        assert!(!shoot.is_empty());
        assert_eq!(shoot.get(0).map(|r| r.name.as_str()), Some("a"));
        assert!(shoot.get(1).is_none());
    }
}
