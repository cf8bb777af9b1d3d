// SPDX-License-Identifier: GPL-3.0-only

//! Photo list and cursor for the gallery viewer

use crate::storage::is_photo_file_name;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Saved photos in name order with a wrapping cursor
///
/// The list is captured once when the viewer opens. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryIndex {
    photos: Vec<PathBuf>,
    cursor: usize,
}

impl GalleryIndex {
    /// Find every `photo_*.jpg` below `root`
    ///
    /// Returns `None` when there is nothing to show.
    pub fn scan(root: &Path) -> Option<Self> {
        let photos: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable gallery entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_str().is_some_and(is_photo_file_name))
            .map(|entry| entry.into_path())
            .collect();

        debug!(root = %root.display(), count = photos.len(), "Gallery scanned");
        Self::from_paths(photos)
    }

    /// Build an index from arbitrary paths, sorted ascending
    pub fn from_paths(mut photos: Vec<PathBuf>) -> Option<Self> {
        if photos.is_empty() {
            return None;
        }
        photos.sort();
        Some(Self { photos, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &Path {
        &self.photos[self.cursor]
    }

    pub fn photos(&self) -> &[PathBuf] {
        &self.photos
    }

    pub fn next(&mut self) -> &Path {
        self.cursor = (self.cursor + 1) % self.photos.len();
        self.current()
    }

    pub fn previous(&mut self) -> &Path {
        self.cursor = (self.cursor + self.photos.len() - 1) % self.photos.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(n: usize) -> GalleryIndex {
        GalleryIndex::from_paths((0..n).map(|i| PathBuf::from(format!("photo_{i}.jpg"))).collect())
            .unwrap()
    }

    #[test]
    fn test_empty_is_none() {
        assert!(GalleryIndex::from_paths(Vec::new()).is_none());
    }

    #[test]
    fn test_next_wraps_after_n_steps() {
        for n in 1..=5 {
            let mut gallery = index(n);
            for _ in 0..n {
                gallery.next();
            }
            assert_eq!(gallery.cursor(), 0);
        }
    }

    #[test]
    fn test_previous_from_start_goes_to_last() {
        let mut gallery = index(4);
        gallery.previous();
        assert_eq!(gallery.cursor(), 3);

        let mut single = index(1);
        single.previous();
        assert_eq!(single.cursor(), 0);
    }

    #[test]
    fn test_paths_are_sorted() {
        let gallery = GalleryIndex::from_paths(vec![
            PathBuf::from("b/photo_2.jpg"),
            PathBuf::from("a/photo_9.jpg"),
        ])
        .unwrap();
        assert_eq!(gallery.current(), Path::new("a/photo_9.jpg"));
    }
}
