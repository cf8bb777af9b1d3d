// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Timing of the display loop, countdown and recordings
pub mod timing {
    /// Display loop period in milliseconds
    pub const POLL_INTERVAL_MS: u64 = 10;

    /// Countdown step in milliseconds (one transition per second)
    pub const COUNTDOWN_STEP_MS: u64 = 1000;

    /// First value shown by the photo countdown
    pub const COUNTDOWN_START: u32 = 3;

    /// Frame rate written into video files
    pub const VIDEO_FPS: u32 = 20;

    /// Log a frame summary every N polled frames
    pub const FRAME_LOG_INTERVAL: u64 = 100;
}

/// UI dimensions
pub mod ui {
    /// Height reserved below the preview for the button row
    pub const BUTTON_ROW_HEIGHT: f32 = 100.0;

    /// Icon size on the main control buttons
    pub const ICON_SIZE: u16 = 96;

    /// Font size of the countdown digits
    pub const COUNTDOWN_TEXT_SIZE: f32 = 72.0;

    /// Fixed viewport the gallery renders photos into
    pub const GALLERY_VIEWPORT_WIDTH: u32 = 800;
    pub const GALLERY_VIEWPORT_HEIGHT: u32 = 480;

    /// Height of the gallery navigation row
    pub const GALLERY_CONTROLS_HEIGHT: f32 = 64.0;

    /// Text size of the gallery navigation buttons
    pub const GALLERY_BUTTON_TEXT_SIZE: f32 = 20.0;
}

/// Storage discovery conventions
pub mod storage {
    /// Directory under which removable volumes are auto-mounted
    pub const REMOVABLE_MEDIA_ROOT: &str = "/media/pi";

    /// Folder created on the removable volume
    pub const REMOVABLE_MEDIA_FOLDER: &str = "CameraMedia";

    /// Folder created under the working directory when no volume is mounted
    pub const LOCAL_FALLBACK_FOLDER: &str = "media";

    /// Per-day subdirectory name
    pub const DAY_FORMAT: &str = "%Y-%m-%d";

    /// Timestamp embedded in media file names
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

    pub const PHOTO_PREFIX: &str = "photo_";
    pub const PHOTO_EXTENSION: &str = "jpg";
    pub const VIDEO_PREFIX: &str = "video_";
    pub const VIDEO_EXTENSION: &str = "avi";
}

/// GStreamer pipeline tuning
pub mod pipeline {
    /// Longest wait for a single frame pull before the tick is skipped
    pub const READ_TIMEOUT_MS: u64 = 5;

    /// Longest wait for the frame that proves the camera is live before recording
    pub const VALIDATION_TIMEOUT_MS: u64 = 1000;

    /// Longest wait for a still from the dedicated capture sink
    pub const STILL_TIMEOUT_MS: u64 = 1000;

    /// Camera must reach PLAYING within this time
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Bus is watched this long for startup errors
    pub const START_ERROR_WINDOW_MS: u64 = 500;

    /// Recorder waits this long for EOS to drain through the muxer
    pub const STOP_TIMEOUT_SECS: u64 = 5;

    /// Preview size requested from the camera module
    pub const MODULE_PREVIEW_WIDTH: u32 = 640;
    pub const MODULE_PREVIEW_HEIGHT: u32 = 480;

    /// Still size requested from the camera module
    pub const MODULE_STILL_WIDTH: u32 = 1920;
    pub const MODULE_STILL_HEIGHT: u32 = 1080;

    /// Synthetic source size
    pub const TEST_PATTERN_WIDTH: u32 = 640;
    pub const TEST_PATTERN_HEIGHT: u32 = 480;

    /// Video encoders in order of preference
    pub const VIDEO_ENCODERS: &[&str] = &["avenc_mpeg4", "jpegenc"];
}
