// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for storage discovery and media naming

use chrono::{Local, TimeZone};
use std::path::Path;
use touchcam::storage::{
    MediaLayout, is_mount_point, prepare_storage_root_in, resolve_storage_root,
};

#[test]
fn test_fallback_when_media_root_missing() {
    let work = tempfile::tempdir().unwrap();
    let root = resolve_storage_root(Path::new("/nonexistent/media/root"), work.path());
    assert_eq!(root, work.path().join("media"));
}

#[test]
fn test_plain_directories_are_not_volumes() {
    let media = tempfile::tempdir().unwrap();
    std::fs::create_dir(media.path().join("usb0")).unwrap();
    std::fs::create_dir(media.path().join("usb1")).unwrap();
    let work = tempfile::tempdir().unwrap();

    assert!(!is_mount_point(&media.path().join("usb0")));
    let root = resolve_storage_root(media.path(), work.path());
    assert_eq!(root, work.path().join("media"));
}

#[test]
fn test_fallback_folder_is_created_and_reused() {
    let work = tempfile::tempdir().unwrap();
    let media = Path::new("/nonexistent/media/root");

    let root = prepare_storage_root_in(media, work.path()).unwrap();
    assert_eq!(root, work.path().join("media"));
    assert!(root.is_dir());

    // Startup on a later run finds the folder already there
    std::fs::write(root.join("keep.txt"), b"x").unwrap();
    let again = prepare_storage_root_in(media, work.path()).unwrap();
    assert_eq!(again, root);
    assert!(again.join("keep.txt").exists());
}

#[test]
fn test_symlink_is_never_a_mount_point() {
    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("root-link");
    std::os::unix::fs::symlink("/", &link).unwrap();
    assert!(!is_mount_point(&link));
}

#[test]
fn test_media_paths_follow_layout() {
    let root = tempfile::tempdir().unwrap();
    let layout = MediaLayout::new(root.path());
    let when = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap();

    let photo = layout.photo_path(&when).unwrap();
    let video = layout.video_path(&when).unwrap();

    let day = root.path().join("2023-12-31");
    assert!(day.is_dir());
    assert_eq!(photo, day.join("photo_20231231-235958.jpg"));
    assert_eq!(video, day.join("video_20231231-235958.avi"));
}
