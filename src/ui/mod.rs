/// User interface module
///
/// - Widget styling for the dark theme (style.rs)
/// - Building the gallery view and keyboard navigation (gallery.rs)

pub mod gallery;
pub mod style;
