use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "portfolio")]
#[command(author, version, about = "Browse a photo portfolio, one shoot at a time")]
pub struct Cli {
    /// Folder with one subfolder per shoot (overrides the config file)
    pub photos: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, env = "PORTFOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of upcoming images to warm
    #[arg(long)]
    pub prefetch_depth: Option<usize>,
}

impl Cli {
    /// Config file in use: `--config`, else the default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::default_path)
    }

    /// Load the config file and apply command line overrides
    pub fn resolve_config(&self) -> Config {
        let mut config = Config::load_or_default(self.config_path().as_deref());

        if let Some(photos) = &self.photos {
            config.photos_dir = photos.clone();
        }
        if let Some(depth) = self.prefetch_depth {
            config.prefetch_depth = depth;
        }
        config
    }
}
