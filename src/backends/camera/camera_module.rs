// SPDX-License-Identifier: GPL-3.0-only

//! Board camera module read through libcamera
//!
//! The sensor runs at still resolution and is split in two branches:
//!
//! ```text
//! libcamerasrc → tee ─┬─ queue → scale 640x480 → RGB → appsink "preview"
//!                     └─ queue → RGB (1920x1080)   → appsink "still"
//! ```
//!
//! Both sinks keep only their newest buffer, so a still capture returns a
//! full-resolution image taken no earlier than the last preview frame.

use super::capture_pipeline::{CapturePipeline, appsink_description, pull_frame};
use super::{CameraBackendType, CameraSource, Frame, PixelFormat, StillMode};
use crate::constants::{pipeline as tuning, timing};
use crate::errors::CameraError;
use gstreamer_app::AppSink;
use std::time::Duration;
use tracing::{debug, info, warn};

const FORMAT: PixelFormat = PixelFormat::Rgb;
const PREVIEW_SINK: &str = "preview";
const STILL_SINK: &str = "still";

pub struct CameraModuleSource {
    pipeline: Option<CapturePipeline>,
    preview: Option<AppSink>,
    still: Option<AppSink>,
    frames_read: u64,
}

impl CameraModuleSource {
    pub fn new() -> Self {
        Self {
            pipeline: None,
            preview: None,
            still: None,
            frames_read: 0,
        }
    }

    fn description() -> String {
        format!(
            "libcamerasrc ! video/x-raw,width={sw},height={sh} ! tee name=split \
             split. ! queue leaky=downstream max-size-buffers=2 ! videoconvert ! videoscale \
             ! video/x-raw,width={pw},height={ph} ! {preview} \
             split. ! queue leaky=downstream max-size-buffers=1 ! videoconvert ! {still}",
            sw = tuning::MODULE_STILL_WIDTH,
            sh = tuning::MODULE_STILL_HEIGHT,
            pw = tuning::MODULE_PREVIEW_WIDTH,
            ph = tuning::MODULE_PREVIEW_HEIGHT,
            preview = appsink_description(PREVIEW_SINK, FORMAT),
            still = appsink_description(STILL_SINK, FORMAT),
        )
    }
}

impl Default for CameraModuleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for CameraModuleSource {
    fn open(&mut self) -> Result<(), CameraError> {
        if self.is_open() {
            return Ok(());
        }

        info!("Opening camera module");
        let mut pipeline = CapturePipeline::launch(&Self::description())?;
        let preview = pipeline.appsink(PREVIEW_SINK)?;
        let still = pipeline.appsink(STILL_SINK)?;
        pipeline.start()?;

        self.pipeline = Some(pipeline);
        self.preview = Some(preview);
        self.still = Some(still);
        self.frames_read = 0;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| p.is_running())
    }

    fn read_frame_timeout(&mut self, timeout: Duration) -> Option<Frame> {
        let sink = self.preview.as_ref()?;
        let frame = pull_frame(sink, timeout, FORMAT)?;

        self.frames_read += 1;
        if self.frames_read % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(frames = self.frames_read, ?frame, "Camera module streaming");
        }
        Some(frame)
    }

    fn still_mode(&self) -> StillMode {
        StillMode::NativeCapture
    }

    fn capture_still(&mut self) -> Option<Frame> {
        let sink = self.still.as_ref()?;
        let frame = pull_frame(sink, Duration::from_millis(tuning::STILL_TIMEOUT_MS), FORMAT);
        match &frame {
            Some(f) => info!(width = f.width, height = f.height, "Still captured"),
            None => warn!("Camera module returned no still"),
        }
        frame
    }

    fn supports_video(&self) -> bool {
        false
    }

    fn close(&mut self) {
        self.preview = None;
        self.still = None;
        if let Some(mut pipeline) = self.pipeline.take() {
            pipeline.stop();
            info!(frames = self.frames_read, "Camera module closed");
        }
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::CameraModule
    }
}

impl Drop for CameraModuleSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_has_both_branches() {
        let desc = CameraModuleSource::description();
        assert!(desc.starts_with("libcamerasrc"));
        assert!(desc.contains("name=preview"));
        assert!(desc.contains("name=still"));
        assert!(desc.contains("width=640,height=480"));
        assert!(desc.contains("width=1920,height=1080"));
    }

    #[test]
    fn test_closed_module_has_no_still() {
        let mut source = CameraModuleSource::new();
        assert!(source.capture_still().is_none());
    }
}
