/// State management module
///
/// This module handles all portfolio state, including:
/// - Shared data structures (data.rs)
/// - Grouping images into shoots (catalog.rs)
/// - The viewer state machine driven by user input (viewer.rs)

pub mod catalog;
pub mod data;
pub mod viewer;
