//! Viewer state machine
//!
//! Tracks which shoot is on screen, which image of it is shown and whether
//! the shoot menu is open. Transitions are pure: they never load or fetch
//! anything themselves. Every transition that moves the viewer to a new
//! image publishes the new [`Position`], and whoever drives the machine
//! hands that position to its observers (the prefetcher).

use super::catalog::Catalog;
use super::data::{ImageRecord, Shoot};

/// Inputs understood by the viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// A (new) catalog finished loading
    CatalogReady,
    /// Menu entry clicked
    SelectShoot(String),
    /// Next button, right arrow, or a click on the image
    Next,
    /// Previous button or left arrow
    Previous,
    /// Menu toggle button
    ToggleMenu,
}

/// Where the viewer currently is
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub shoot: String,
    pub index: usize,
}

/// The single mutable view state of one running portfolio
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    active_shoot: Option<String>,
    current_index: usize,
    menu_open: bool,
}

impl ViewerState {
    /// Uninitialized state: no shoot selected, index 0, menu closed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_shoot_name(&self) -> Option<&str> {
        self.active_shoot.as_deref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn position(&self) -> Option<Position> {
        self.active_shoot.as_ref().map(|shoot| Position {
            shoot: shoot.clone(),
            index: self.current_index,
        })
    }

    /// The active shoot as found in `catalog`
    pub fn active_shoot<'a>(&self, catalog: &'a Catalog) -> Option<&'a Shoot> {
        self.active_shoot
            .as_deref()
            .and_then(|name| catalog.shoot(name))
    }

    /// The image currently on screen, if there is one
    pub fn current_image<'a>(&self, catalog: &'a Catalog) -> Option<&'a ImageRecord> {
        self.active_shoot(catalog)
            .and_then(|shoot| shoot.get(self.current_index))
    }

    /// Apply one event.
    ///
    /// Returns the new position when the (shoot, index) pair changed, and
    /// `None` otherwise.
    pub fn apply(&mut self, event: ViewerEvent, catalog: &Catalog) -> Option<Position> {
        let before = self.position();

        match event {
            ViewerEvent::CatalogReady => self.sync_with(catalog),
            ViewerEvent::SelectShoot(name) => {
                // The menu only lists catalog entries; anything else is ignored
                if catalog.contains(&name) {
                    self.active_shoot = Some(name);
                    self.current_index = 0;
                    self.menu_open = false;
                }
            }
            ViewerEvent::Next => {
                if let Some(len) = self.active_len(catalog) {
                    self.current_index = (self.current_index + 1) % len;
                }
            }
            ViewerEvent::Previous => {
                if let Some(len) = self.active_len(catalog) {
                    self.current_index = (self.current_index + len - 1) % len;
                }
            }
            ViewerEvent::ToggleMenu => self.menu_open = !self.menu_open,
        }

        let after = self.position();
        if after != before {
            after
        } else {
            None
        }
    }

    /// Select the first shoot when none is active, or when the active one
    /// disappeared from a rebuilt catalog.
    fn sync_with(&mut self, catalog: &Catalog) {
        let still_valid = self
            .active_shoot
            .as_deref()
            .is_some_and(|name| catalog.contains(name));

        if !still_valid {
            self.active_shoot = catalog.first().map(|shoot| shoot.name().to_string());
            self.current_index = 0;
            return;
        }

        let len = self.active_len(catalog).unwrap_or(0);
        if self.current_index >= len {
            self.current_index = 0;
        }
    }

    /// Length of the active shoot; `None` when there is nothing to page through
    fn active_len(&self, catalog: &Catalog) -> Option<usize> {
        self.active_shoot(catalog)
            .map(Shoot::len)
            .filter(|&len| len > 0)
    }
}
