use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use iced::widget::image::Handle;
use iced::{Element, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod assets;
mod cli;
mod config;
mod error;
mod state;
mod ui;

use assets::prefetch::Prefetcher;
use config::Config;
use error::Error;
use state::catalog::{build_catalog, Catalog};
use state::data::ImageRecord;
use state::viewer::{Position, ViewerEvent, ViewerState};
use ui::gallery::Gallery;

/// Main application state
struct Portfolio {
    config: Config,
    /// Where a chosen photos folder is remembered
    config_path: Option<PathBuf>,
    /// Shoots built from the last completed scan
    catalog: Catalog,
    viewer: ViewerState,
    prefetcher: Prefetcher,
    /// Warmed images by address
    warmed: HashMap<String, Handle>,
    /// A scan is in flight
    loading: bool,
    /// Shown on the empty screen
    notice: Option<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background scan of the photos folder finished
    CatalogLoaded(Result<Vec<ImageRecord>, Error>),
    /// Click or key press handled by the viewer
    Viewer(ViewerEvent),
    /// A prefetch finished (or failed) for the given address
    Warmed(String, Result<Handle, Error>),
    /// User clicked "Choose Folder"
    PickFolder,
}

impl Portfolio {
    /// Create the app and start scanning the configured photos folder
    fn new(config: Config, config_path: Option<PathBuf>) -> (Self, Task<Message>) {
        let prefetcher = Prefetcher::new(config.prefetch_depth);
        debug!("Warming {} images ahead", prefetcher.depth());
        let root = config.photos_dir.clone();

        let mut portfolio = Portfolio {
            config,
            config_path,
            catalog: Catalog::empty(),
            viewer: ViewerState::new(),
            prefetcher,
            warmed: HashMap::new(),
            loading: false,
            notice: None,
        };
        let task = portfolio.scan(root);

        (portfolio, task)
    }

    fn title(&self) -> String {
        self.config.site.window_title()
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(records)) => {
                self.loading = false;
                self.catalog = build_catalog(records);
                self.notice = None;

                info!(
                    "📸 {} shoots, {} images",
                    self.catalog.len(),
                    self.catalog.image_count()
                );
                debug!("Shoots: {:?}", self.catalog.names().collect::<Vec<_>>());

                self.catalog_ready()
            }
            Message::CatalogLoaded(Err(e)) => {
                warn!("Could not load photos: {}", e);
                self.loading = false;
                self.catalog = Catalog::empty();
                self.notice = Some(e.to_string());

                self.catalog_ready()
            }
            Message::Viewer(event) => self.dispatch(event),
            Message::Warmed(url, Ok(handle)) => {
                if self.in_window(&url) {
                    self.warmed.insert(url, handle);
                } else {
                    debug!("Dropping {}, viewer moved on", url);
                }
                Task::none()
            }
            Message::Warmed(url, Err(e)) => {
                debug!("Prefetch failed for {}: {}", url, e);
                Task::none()
            }
            Message::PickFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Photos")
                    .pick_folder();

                match folder {
                    Some(folder) => {
                        self.config.photos_dir = folder.clone();
                        if let Some(path) = &self.config_path {
                            if let Err(e) = self.config.save(path) {
                                warn!("Could not remember folder: {}", e);
                            }
                        }
                        self.scan(folder)
                    }
                    None => Task::none(),
                }
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        Gallery {
            catalog: &self.catalog,
            viewer: &self.viewer,
            warmed: &self.warmed,
            menu_width: self.config.menu_width,
            loading: self.loading,
            notice: self.notice.as_deref(),
        }
        .view()
    }

    /// Arrow keys are only listened to while there is something to browse
    fn subscription(&self) -> Subscription<Message> {
        if self.has_content() {
            ui::gallery::keyboard_navigation()
        } else {
            Subscription::none()
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn has_content(&self) -> bool {
        self.viewer
            .active_shoot(&self.catalog)
            .is_some_and(|shoot| !shoot.is_empty())
    }

    /// Launch a background scan of `root`
    fn scan(&mut self, root: PathBuf) -> Task<Message> {
        self.loading = true;
        Task::perform(assets::scan::scan_photos(root), Message::CatalogLoaded)
    }

    /// Run one viewer transition and notify the prefetcher if it moved
    fn dispatch(&mut self, event: ViewerEvent) -> Task<Message> {
        match self.viewer.apply(event, &self.catalog) {
            Some(position) => self.prefetch(&position),
            None => Task::none(),
        }
    }

    /// Sync the viewer with a freshly built catalog. The position may be
    /// unchanged while its addresses are new, so it is always prefetched.
    fn catalog_ready(&mut self) -> Task<Message> {
        let position = self
            .viewer
            .apply(ViewerEvent::CatalogReady, &self.catalog)
            .or_else(|| self.viewer.position());

        match position {
            Some(position) => self.prefetch(&position),
            None => {
                self.warmed.clear();
                Task::none()
            }
        }
    }

    /// Whether `url` is the current image or one of the next few
    fn in_window(&self, url: &str) -> bool {
        let Some(position) = self.viewer.position() else {
            return false;
        };
        self.catalog
            .shoot(&position.shoot)
            .is_some_and(|shoot| self.prefetcher.window(&position, shoot).contains(url))
    }

    /// Warm the images after `position` and forget those left behind;
    /// fire and forget
    fn prefetch(&mut self, position: &Position) -> Task<Message> {
        let Some(shoot) = self.catalog.shoot(&position.shoot) else {
            self.warmed.clear();
            return Task::none();
        };

        let window = self.prefetcher.window(position, shoot);
        self.warmed.retain(|url, _| window.contains(url));

        let requests = self
            .prefetcher
            .observe(position, shoot)
            .into_iter()
            .map(|url| {
                Task::perform(assets::loader::warm(url.clone()), move |result| {
                    Message::Warmed(url.clone(), result)
                })
            })
            .collect::<Vec<_>>();

        if !requests.is_empty() {
            debug!("{} images requested so far", self.prefetcher.preloaded_count());
        }
        Task::batch(requests)
    }
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = cli::Cli::parse();
    let config = cli.resolve_config();
    let config_path = cli.config_path();

    info!("🎨 Portfolio starting with photos from {}", config.photos_dir.display());

    iced::application(Portfolio::title, Portfolio::update, Portfolio::view)
        .subscription(Portfolio::subscription)
        .theme(Portfolio::theme)
        .centered()
        .run_with(move || Portfolio::new(config, config_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(shoots: &[(&str, usize)]) -> Vec<ImageRecord> {
        let mut records = Vec::new();
        for (name, count) in shoots {
            for i in 0..*count {
                let path = format!("{name}/{i}.jpg");
                records.push(ImageRecord::new(
                    path.clone(),
                    format!("/photos/{path}"),
                    i.to_string(),
                    *name,
                ));
            }
        }
        records
    }

    fn portfolio() -> Portfolio {
        let config = Config {
            photos_dir: PathBuf::from("/nonexistent/portfolio/pics"),
            ..Config::default()
        };
        let (portfolio, _task) = Portfolio::new(config, None);
        portfolio
    }

    #[test]
    fn test_starts_loading_without_content() {
        let app = portfolio();
        assert!(app.loading);
        assert!(app.catalog.is_empty());
        assert!(!app.has_content());
    }

    #[test]
    fn test_catalog_loaded_selects_first_shoot_and_prefetches() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("b", 2), ("a", 5)]))));

        assert!(!app.loading);
        assert!(app.has_content());
        assert_eq!(app.viewer.active_shoot_name(), Some("a"));
        assert_eq!(app.viewer.current_index(), 0);
        assert_eq!(app.prefetcher.preloaded_count(), 3);
        assert!(app.prefetcher.is_preloaded("/photos/a/1.jpg"));
    }

    #[test]
    fn test_navigation_extends_prefetch() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("a", 6)]))));
        let _ = app.update(Message::Viewer(ViewerEvent::Next));

        assert_eq!(app.viewer.current_index(), 1);
        assert_eq!(app.prefetcher.preloaded_count(), 4);
        assert!(app.prefetcher.is_preloaded("/photos/a/4.jpg"));
    }

    #[test]
    fn test_select_shoot_closes_menu() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("a", 3), ("b", 1)]))));
        let _ = app.update(Message::Viewer(ViewerEvent::ToggleMenu));
        assert!(app.viewer.is_menu_open());

        let _ = app.update(Message::Viewer(ViewerEvent::SelectShoot("b".into())));
        assert!(!app.viewer.is_menu_open());
        assert_eq!(app.viewer.active_shoot_name(), Some("b"));
        assert!(app.prefetcher.is_preloaded("/photos/b/0.jpg"));
    }

    #[test]
    fn test_empty_scan_has_no_content() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(Vec::new())));

        assert!(!app.has_content());
        assert!(app.viewer.active_shoot_name().is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_scan_error_is_reported() {
        let mut app = portfolio();
        let missing = PathBuf::from("/nonexistent/portfolio/pics");
        let _ = app.update(Message::CatalogLoaded(Err(Error::PhotosRootMissing(
            missing,
        ))));

        assert!(!app.loading);
        assert!(!app.has_content());
        assert!(app
            .notice
            .as_deref()
            .is_some_and(|notice| notice.contains("not found")));
    }

    #[test]
    fn test_warm_results() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("a", 6)]))));
        let _ = app.update(Message::Warmed(
            "/photos/a/1.jpg".to_string(),
            Ok(Handle::from_bytes(vec![0u8; 4])),
        ));
        let _ = app.update(Message::Warmed(
            "/photos/a/2.jpg".to_string(),
            Err(Error::Io("missing".to_string())),
        ));

        assert!(app.warmed.contains_key("/photos/a/1.jpg"));
        assert!(!app.warmed.contains_key("/photos/a/2.jpg"));
    }

    #[test]
    fn test_rescan_with_same_position_prefetches_new_addresses() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("a", 6)]))));
        assert!(app.prefetcher.is_preloaded("/photos/a/1.jpg"));

        let moved: Vec<ImageRecord> = records(&[("a", 6)])
            .into_iter()
            .map(|r| {
                let url = r.url.replace("/photos/", "/moved/");
                ImageRecord::new(r.path, url, r.name, r.directory)
            })
            .collect();
        let _ = app.update(Message::CatalogLoaded(Ok(moved)));

        assert_eq!(app.viewer.active_shoot_name(), Some("a"));
        assert_eq!(app.viewer.current_index(), 0);
        for i in 1..=3 {
            assert!(app.prefetcher.is_preloaded(&format!("/moved/a/{i}.jpg")));
        }
    }

    #[test]
    fn test_warmed_images_stay_bounded_while_browsing() {
        let mut app = portfolio();
        let _ = app.update(Message::CatalogLoaded(Ok(records(&[("a", 40)]))));
        let depth = app.prefetcher.depth();

        for _ in 0..200 {
            let index = app.viewer.current_index();
            for step in 0..=depth {
                let url = format!("/photos/a/{}.jpg", (index + step) % 40);
                let _ = app.update(Message::Warmed(url, Ok(Handle::from_bytes(vec![0u8; 4]))));
            }
            let _ = app.update(Message::Viewer(ViewerEvent::Next));
            assert!(app.warmed.len() <= depth + 1);
        }

        // A late result for an image already left behind is not kept
        let current = app.viewer.current_index();
        let behind = format!("/photos/a/{}.jpg", (current + 40 - 1) % 40);
        let _ = app.update(Message::Warmed(
            behind.clone(),
            Ok(Handle::from_bytes(vec![0u8; 4])),
        ));
        assert!(!app.warmed.contains_key(&behind));
    }
}
