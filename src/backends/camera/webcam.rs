// SPDX-License-Identifier: GPL-3.0-only

//! Webcam source: a V4L2 device (or a synthetic pattern) delivering BGR frames

use super::capture_pipeline::{CapturePipeline, appsink_description, pull_frame};
use super::{CameraBackendType, CameraSource, Frame, PixelFormat, StillMode};
use crate::constants::{pipeline as tuning, timing};
use crate::errors::CameraError;
use gstreamer_app::AppSink;
use std::time::Duration;
use tracing::{debug, info};

const FORMAT: PixelFormat = PixelFormat::Bgr;
const SINK_NAME: &str = "preview";

enum Input {
    Device(String),
    TestPattern,
}

/// USB camera (or test pattern) read through GStreamer
///
/// Photos reuse the live frame and the stream can be recorded.
pub struct WebcamSource {
    input: Input,
    pipeline: Option<CapturePipeline>,
    sink: Option<AppSink>,
    frames_read: u64,
}

impl WebcamSource {
    pub fn device(path: &str) -> Self {
        Self::with_input(Input::Device(path.to_string()))
    }

    pub fn test_pattern() -> Self {
        Self::with_input(Input::TestPattern)
    }

    fn with_input(input: Input) -> Self {
        Self {
            input,
            pipeline: None,
            sink: None,
            frames_read: 0,
        }
    }

    fn description(&self) -> String {
        let source = match &self.input {
            Input::Device(path) => format!("v4l2src device={} ! decodebin", path),
            Input::TestPattern => format!(
                "videotestsrc is-live=true ! video/x-raw,width={},height={},framerate={}/1",
                tuning::TEST_PATTERN_WIDTH,
                tuning::TEST_PATTERN_HEIGHT,
                timing::VIDEO_FPS
            ),
        };
        format!(
            "{} ! videoconvert ! {}",
            source,
            appsink_description(SINK_NAME, FORMAT)
        )
    }
}

impl CameraSource for WebcamSource {
    fn open(&mut self) -> Result<(), CameraError> {
        if self.is_open() {
            return Ok(());
        }

        let description = self.description();
        info!(%description, "Opening webcam");
        let mut pipeline = CapturePipeline::launch(&description)?;
        let sink = pipeline.appsink(SINK_NAME)?;
        pipeline.start()?;

        self.pipeline = Some(pipeline);
        self.sink = Some(sink);
        self.frames_read = 0;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.pipeline.as_ref().is_some_and(|p| p.is_running())
    }

    fn read_frame_timeout(&mut self, timeout: Duration) -> Option<Frame> {
        let sink = self.sink.as_ref()?;
        let frame = pull_frame(sink, timeout, FORMAT)?;

        self.frames_read += 1;
        if self.frames_read % timing::FRAME_LOG_INTERVAL == 0 {
            debug!(frames = self.frames_read, ?frame, "Webcam streaming");
        }
        Some(frame)
    }

    fn still_mode(&self) -> StillMode {
        StillMode::ReuseLiveFrame
    }

    fn supports_video(&self) -> bool {
        true
    }

    fn close(&mut self) {
        self.sink = None;
        if let Some(mut pipeline) = self.pipeline.take() {
            pipeline.stop();
            info!(frames = self.frames_read, "Webcam closed");
        }
    }

    fn backend_type(&self) -> CameraBackendType {
        match self.input {
            Input::Device(_) => CameraBackendType::Webcam,
            Input::TestPattern => CameraBackendType::TestPattern,
        }
    }
}

impl Drop for WebcamSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_description() {
        let source = WebcamSource::device("/dev/video2");
        let desc = source.description();
        assert!(desc.starts_with("v4l2src device=/dev/video2"));
        assert!(desc.contains("format=BGR"));
    }

    #[test]
    fn test_closed_source_reads_nothing() {
        let mut source = WebcamSource::test_pattern();
        assert!(source.read_frame().is_none());
        source.close();
        source.close();
        assert!(!source.is_open());
    }
}
