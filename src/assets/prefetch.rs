//! Image prefetcher
//!
//! Observes viewer positions and decides which upcoming images should be
//! warmed into the cache. Every address is requested at most once per
//! session; the set of requested addresses only ever grows.

use std::collections::HashSet;

use tracing::debug;

use crate::state::data::Shoot;
use crate::state::viewer::Position;

/// How many images ahead of the current one are warmed
pub const DEFAULT_PREFETCH_DEPTH: usize = 3;

#[derive(Debug, Clone)]
pub struct Prefetcher {
    depth: usize,
    preloaded: HashSet<String>,
}

impl Default for Prefetcher {
    fn default() -> Self {
        Self::new(DEFAULT_PREFETCH_DEPTH)
    }
}

impl Prefetcher {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            preloaded: HashSet::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// React to a published viewer position.
    ///
    /// Returns the addresses that still need fetching, in the order they
    /// will be viewed, and records them as requested.
    pub fn observe(&mut self, position: &Position, shoot: &Shoot) -> Vec<String> {
        if shoot.name() != position.shoot {
            return Vec::new();
        }

        let mut requested = Vec::new();
        for index in upcoming_indices(position.index, shoot.len(), self.depth) {
            let Some(record) = shoot.get(index) else {
                continue;
            };
            if self.preloaded.insert(record.url.clone()) {
                requested.push(record.url.clone());
            }
        }

        if !requested.is_empty() {
            debug!(
                "Prefetching {} image(s) after {} #{}",
                requested.len(),
                position.shoot,
                position.index + 1
            );
        }
        requested
    }

    /// Addresses worth keeping in memory at `position`: the current image
    /// and the ones that would be prefetched after it
    pub fn window(&self, position: &Position, shoot: &Shoot) -> HashSet<String> {
        if shoot.name() != position.shoot {
            return HashSet::new();
        }

        std::iter::once(position.index)
            .chain(upcoming_indices(position.index, shoot.len(), self.depth))
            .filter_map(|index| shoot.get(index))
            .map(|record| record.url.clone())
            .collect()
    }

    pub fn is_preloaded(&self, url: &str) -> bool {
        self.preloaded.contains(url)
    }

    /// Number of distinct addresses requested so far
    pub fn preloaded_count(&self) -> usize {
        self.preloaded.len()
    }
}

/// Indices `current + 1 ..= current + depth`, each wrapped to the shoot length.
///
/// Empty for an empty shoot.
pub fn upcoming_indices(current: usize, len: usize, depth: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    (1..=depth).map(|step| (current + step) % len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::build_catalog;
    use crate::state::data::ImageRecord;

    fn shoot(name: &str, len: usize) -> Shoot {
        let records = (0..len).map(|i| {
            let path = format!("{name}/{i}.jpg");
            ImageRecord::new(path.clone(), format!("/photos/{path}"), i.to_string(), name)
        });
        build_catalog(records)
            .shoot(name)
            .cloned()
            .unwrap_or_else(|| Shoot::new(name.to_string(), Vec::new()))
    }

    fn at(shoot: &str, index: usize) -> Position {
        Position {
            shoot: shoot.to_string(),
            index,
        }
    }

    #[test]
    fn test_window_covers_current_and_upcoming() {
        let prefetcher = Prefetcher::new(2);
        let shoot = shoot("a", 5);

        let window = prefetcher.window(&at("a", 4), &shoot);
        assert_eq!(window.len(), 3);
        for url in ["/photos/a/4.jpg", "/photos/a/0.jpg", "/photos/a/1.jpg"] {
            assert!(window.contains(url), "{url} missing");
        }

        assert!(prefetcher.window(&at("b", 0), &shoot).is_empty());
    }

    #[test]
    fn test_upcoming_indices_wrap() {
        assert_eq!(upcoming_indices(0, 10, 3), vec![1, 2, 3]);
        assert_eq!(upcoming_indices(8, 10, 3), vec![9, 0, 1]);
        assert_eq!(upcoming_indices(1, 2, 3), vec![0, 1, 0]);
    }

    #[test]
    fn test_upcoming_indices_single_and_empty() {
        assert_eq!(upcoming_indices(0, 1, 3), vec![0, 0, 0]);
        assert!(upcoming_indices(0, 0, 3).is_empty());
    }

    #[test]
    fn test_observe_requests_next_three() {
        let s = shoot("s", 10);
        let mut prefetcher = Prefetcher::default();
        let urls = prefetcher.observe(&at("s", 0), &s);
        assert_eq!(
            urls,
            vec!["/photos/s/1.jpg", "/photos/s/2.jpg", "/photos/s/3.jpg"]
        );
        assert!(prefetcher.is_preloaded("/photos/s/2.jpg"));
        assert!(!prefetcher.is_preloaded("/photos/s/0.jpg"));
    }

    #[test]
    fn test_observe_only_requests_new_urls() {
        let s = shoot("s", 10);
        let mut prefetcher = Prefetcher::default();
        prefetcher.observe(&at("s", 0), &s);

        let urls = prefetcher.observe(&at("s", 1), &s);
        assert_eq!(urls, vec!["/photos/s/4.jpg"]);

        assert!(prefetcher.observe(&at("s", 0), &s).is_empty());
    }

    #[test]
    fn test_single_image_shoot_requests_itself_once() {
        let s = shoot("solo", 1);
        let mut prefetcher = Prefetcher::default();
        assert_eq!(prefetcher.observe(&at("solo", 0), &s), vec!["/photos/solo/0.jpg"]);
        assert!(prefetcher.observe(&at("solo", 0), &s).is_empty());
        assert_eq!(prefetcher.preloaded_count(), 1);
    }

    #[test]
    fn test_empty_shoot_requests_nothing() {
        let s = shoot("empty", 0);
        let mut prefetcher = Prefetcher::default();
        assert!(prefetcher.observe(&at("empty", 0), &s).is_empty());
    }

    #[test]
    fn test_mismatched_shoot_is_ignored() {
        let s = shoot("a", 4);
        let mut prefetcher = Prefetcher::default();
        assert!(prefetcher.observe(&at("b", 0), &s).is_empty());
        assert_eq!(prefetcher.preloaded_count(), 0);
    }

    #[test]
    fn test_never_requests_duplicates() {
        let s = shoot("s", 7);
        let mut prefetcher = Prefetcher::new(3);
        let mut all = Vec::new();

        let mut index = 0;
        for step in [1, 1, 6, 6, 1, 1, 1, 1, 1, 6, 1] {
            index = (index + step) % s.len();
            all.extend(prefetcher.observe(&at("s", index), &s));
        }

        let unique: HashSet<&String> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all.len(), prefetcher.preloaded_count());
    }
}
