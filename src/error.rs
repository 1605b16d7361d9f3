use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration or scanning the photos root.
///
/// The enum is `Clone` so it can travel inside iced messages, which is why
/// wrapped library errors are stored as their rendered text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Photos folder not found: {}", .0.display())]
    PhotosRootMissing(PathBuf),

    #[error("Not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Json(String),

    #[error("Background task failed: {0}")]
    Join(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Join(err.to_string())
    }
}
