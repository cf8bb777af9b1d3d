// SPDX-License-Identifier: GPL-3.0-only

//! Storage locator and on-disk media layout
//!
//! Media goes to a folder on the first mounted removable volume, or to a
//! folder under the working directory when nothing is mounted:
//!
//! ```text
//! <root>/YYYY-MM-DD/photo_YYYYMMDD-HHMMSS.jpg
//! <root>/YYYY-MM-DD/video_YYYYMMDD-HHMMSS.avi
//! ```

use crate::constants::storage as conventions;
use chrono::{DateTime, Local};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Check whether `path` is the root of a mounted filesystem
///
/// A directory is a mount point when it lives on a different device than its
/// parent, or when it is its own parent (`/`). Symlinks are never mount points.
pub fn is_mount_point(path: &Path) -> bool {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return false;
    };
    if meta.file_type().is_symlink() || !meta.is_dir() {
        return false;
    }
    let Ok(parent) = std::fs::metadata(path.join("..")) else {
        return false;
    };

    meta.dev() != parent.dev() || meta.ino() == parent.ino()
}

/// Pick the storage root without touching the filesystem beyond reads
///
/// Entries under `media_root` are checked in name order; the first mount point
/// wins. Falls back to `working_dir/media`.
pub fn resolve_storage_root(media_root: &Path, working_dir: &Path) -> PathBuf {
    if let Some(volume) = first_mounted_volume(media_root) {
        debug!(volume = %volume.display(), "Removable volume found");
        return volume.join(conventions::REMOVABLE_MEDIA_FOLDER);
    }

    debug!(media_root = %media_root.display(), "No removable volume mounted");
    working_dir.join(conventions::LOCAL_FALLBACK_FOLDER)
}

fn first_mounted_volume(media_root: &Path) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(media_root)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    entries.into_iter().find(|path| is_mount_point(path))
}

/// Resolve the process-wide storage root and create it
///
/// Creation errors are returned to the caller; startup does not continue
/// without a writable root.
pub fn prepare_storage_root() -> std::io::Result<PathBuf> {
    let working_dir = std::env::current_dir()?;
    prepare_storage_root_in(Path::new(conventions::REMOVABLE_MEDIA_ROOT), &working_dir)
}

/// [`resolve_storage_root`] followed by creating the chosen folder
///
/// Calling it again on an existing root is not an error.
pub fn prepare_storage_root_in(media_root: &Path, working_dir: &Path) -> std::io::Result<PathBuf> {
    let root = resolve_storage_root(media_root, working_dir);
    std::fs::create_dir_all(&root)?;
    info!(path = %root.display(), "Storage root ready");
    Ok(root)
}

/// Check whether a file name follows the `photo_*.jpg` pattern
pub fn is_photo_file_name(name: &str) -> bool {
    name.strip_prefix(conventions::PHOTO_PREFIX)
        .and_then(|rest| rest.strip_suffix(conventions::PHOTO_EXTENSION))
        .is_some_and(|rest| rest.ends_with('.'))
}

/// Naming rules for media under a storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLayout {
    root: PathBuf,
}

impl MediaLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Subdirectory holding media captured on the day of `now`
    pub fn day_dir(&self, now: &DateTime<Local>) -> PathBuf {
        self.root.join(now.format(conventions::DAY_FORMAT).to_string())
    }

    /// Create today's subdirectory if missing
    pub fn ensure_day_dir(&self, now: &DateTime<Local>) -> std::io::Result<PathBuf> {
        let dir = self.day_dir(now);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Path for a new photo taken at `now`; creates the day directory
    pub fn photo_path(&self, now: &DateTime<Local>) -> std::io::Result<PathBuf> {
        self.media_path(now, conventions::PHOTO_PREFIX, conventions::PHOTO_EXTENSION)
    }

    /// Path for a new video started at `now`; creates the day directory
    pub fn video_path(&self, now: &DateTime<Local>) -> std::io::Result<PathBuf> {
        self.media_path(now, conventions::VIDEO_PREFIX, conventions::VIDEO_EXTENSION)
    }

    fn media_path(
        &self,
        now: &DateTime<Local>,
        prefix: &str,
        extension: &str,
    ) -> std::io::Result<PathBuf> {
        let dir = self.ensure_day_dir(now)?;
        let stem = format!("{}{}", prefix, now.format(conventions::TIMESTAMP_FORMAT));
        Ok(unique_path(&dir, &stem, extension))
    }
}

/// `dir/stem.ext`, or `dir/stem_N.ext` for the first N that is free
///
/// `_` sorts after `.`, so same-second files keep capture order by name.
fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", stem, extension));
    if !candidate.exists() {
        return candidate;
    }

    (1u32..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 12, 0, 9).unwrap()
    }

    #[test]
    fn test_photo_file_name_pattern() {
        assert!(is_photo_file_name("photo_20240517-120009.jpg"));
        assert!(is_photo_file_name("photo_20240517-120009_1.jpg"));
        assert!(!is_photo_file_name("video_20240517-120009.avi"));
        assert!(!is_photo_file_name("photo_20240517-120009.jpeg"));
        assert!(!is_photo_file_name("photo_20240517-120009jpg"));
        assert!(!is_photo_file_name("Photo_20240517-120009.jpg"));
    }

    #[test]
    fn test_root_is_a_mount_point() {
        assert!(is_mount_point(Path::new("/")));
    }

    #[test]
    fn test_day_dir_name() {
        let layout = MediaLayout::new("/srv/media");
        assert_eq!(layout.day_dir(&noon()), PathBuf::from("/srv/media/2024-05-17"));
    }

    #[test]
    fn test_collision_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let layout = MediaLayout::new(dir.path());

        let first = layout.photo_path(&noon()).unwrap();
        std::fs::write(&first, b"x").unwrap();
        let second = layout.photo_path(&noon()).unwrap();

        assert_eq!(first.file_name().unwrap(), "photo_20240517-120009.jpg");
        assert_eq!(second.file_name().unwrap(), "photo_20240517-120009_1.jpg");
        assert!(first < second);
    }
}
