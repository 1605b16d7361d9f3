//! Portfolio configuration
//!
//! Stored as JSON in the user's config directory:
//! - Linux: ~/.config/portfolio/config.json
//! - macOS: ~/Library/Application Support/portfolio/config.json
//! - Windows: %APPDATA%\portfolio\config.json
//!
//! Every field has a default, so a partial (or missing) file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assets::prefetch::DEFAULT_PREFETCH_DEPTH;
use crate::error::{Error, Result};

/// Site details shown in the window title
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    pub author: String,
    pub description: String,
    pub site_url: String,
    pub keywords: Vec<String>,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            description: "Photo Portfolio".to_string(),
            site_url: String::new(),
            keywords: Vec::new(),
        }
    }
}

impl SiteMetadata {
    /// "title | description", or just the title
    pub fn window_title(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.description)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteMetadata,
    /// Folder holding one subfolder per shoot
    pub photos_dir: PathBuf,
    /// Images warmed ahead of the current one
    pub prefetch_depth: usize,
    /// Width of the shoot menu panel in logical pixels
    pub menu_width: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteMetadata::default(),
            photos_dir: PathBuf::from("pics"),
            prefetch_depth: DEFAULT_PREFETCH_DEPTH,
            menu_width: 300.0,
        }
    }
}

impl Config {
    /// Where the config file lives by default
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("portfolio").join("config.json"))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the config file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read the config file, falling back to defaults when it is missing
    /// or unusable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write the config as pretty JSON, creating parent folders
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.menu_width.is_finite() || self.menu_width <= 0.0 {
            return Err(Error::Config(format!(
                "menu_width must be positive, got {}",
                self.menu_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.photos_dir, PathBuf::from("pics"));
        assert_eq!(config.prefetch_depth, 3);
        assert_eq!(config.site.window_title(), "Portfolio | Photo Portfolio");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json(
            r#"{ "site": { "title": "Jane Doe" }, "photos_dir": "/srv/photos" }"#,
        )
        .unwrap();
        assert_eq!(config.site.title, "Jane Doe");
        assert_eq!(config.site.description, "Photo Portfolio");
        assert_eq!(config.photos_dir, PathBuf::from("/srv/photos"));
        assert_eq!(config.prefetch_depth, 3);
    }

    #[test]
    fn test_window_title_without_description() {
        let site = SiteMetadata {
            description: String::new(),
            ..SiteMetadata::default()
        };
        assert_eq!(site.window_title(), "Portfolio");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Config::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_rejects_bad_menu_width() {
        assert!(matches!(
            Config::from_json(r#"{ "menu_width": 0 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("portfolio_config_{}", std::process::id()));
        let path = dir.join("nested").join("config.json");

        let mut config = Config::default();
        config.site.keywords = vec!["Fashion".to_string(), "Portrait".to_string()];
        config.prefetch_depth = 5;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        assert_eq!(Config::load_or_default(Some(path.as_path())), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let path = std::env::temp_dir().join("portfolio_config_missing/config.json");
        assert_eq!(Config::load_or_default(Some(path.as_path())), Config::default());
        assert_eq!(Config::load_or_default(None), Config::default());
    }
}
