// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer capture pipeline shared by the camera sources
//!
//! A source is a `gst-launch` style description ending in one or more
//! `appsink` elements. Frames are pulled synchronously with a short timeout,
//! so the display loop never blocks on the camera.

use super::types::{Frame, PixelFormat};
use crate::constants::pipeline as tuning;
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// A launched, possibly running, capture pipeline
pub(crate) struct CapturePipeline {
    pipeline: gstreamer::Pipeline,
    running: bool,
}

impl CapturePipeline {
    /// Parse `description` into a pipeline (not started)
    pub fn launch(description: &str) -> Result<Self, CameraError> {
        gstreamer::init().map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

        debug!(description, "Parsing capture pipeline");
        let pipeline = gstreamer::parse::launch(description)
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?
            .downcast::<gstreamer::Pipeline>()
            .map_err(|_| {
                CameraError::DeviceUnavailable("description did not produce a pipeline".into())
            })?;

        Ok(Self {
            pipeline,
            running: false,
        })
    }

    /// Look up a named appsink in the pipeline
    pub fn appsink(&self, name: &str) -> Result<AppSink, CameraError> {
        self.pipeline
            .by_name(name)
            .ok_or_else(|| CameraError::DeviceUnavailable(format!("missing appsink '{}'", name)))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::DeviceUnavailable(format!("'{}' is not an appsink", name)))
    }

    /// Set the pipeline to PLAYING and wait for the device to come up
    ///
    /// A missing or busy device usually surfaces as a bus error shortly after
    /// the state change, so the bus is watched briefly before reporting success.
    pub fn start(&mut self) -> Result<(), CameraError> {
        self.pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| self.fail(format!("failed to start pipeline: {:?}", e)))?;

        let (result, state, _) = self
            .pipeline
            .state(gstreamer::ClockTime::from_seconds(tuning::START_TIMEOUT_SECS));
        if result.is_err() || state != gstreamer::State::Playing {
            return Err(self.fail(format!("pipeline stuck in {:?}", state)));
        }

        if let Some(bus) = self.pipeline.bus()
            && let Some(msg) = bus.timed_pop_filtered(
                gstreamer::ClockTime::from_mseconds(tuning::START_ERROR_WINDOW_MS),
                &[gstreamer::MessageType::Error],
            )
            && let gstreamer::MessageView::Error(err) = msg.view()
        {
            let reason = format!("{} ({:?})", err.error(), err.debug());
            return Err(self.fail(reason));
        }

        self.running = true;
        info!("Capture pipeline playing");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the pipeline and release the device
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            warn!(error = ?e, "Failed to stop capture pipeline");
        } else {
            debug!("Capture pipeline stopped");
        }
    }

    fn fail(&self, reason: String) -> CameraError {
        error!(%reason, "Capture pipeline failed to start");
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        CameraError::DeviceUnavailable(reason)
    }
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gstreamer::State::Null);
    }
}

/// Pull one sample from `sink` and pack it into a [`Frame`]
///
/// Returns `None` on timeout, end of stream, or a malformed sample.
pub(crate) fn pull_frame(sink: &AppSink, timeout: Duration, format: PixelFormat) -> Option<Frame> {
    let sample = sink.try_pull_sample(gstreamer::ClockTime::from_nseconds(
        timeout.as_nanos() as u64,
    ))?;

    let caps = sample.caps()?;
    let info = match VideoInfo::from_caps(caps) {
        Ok(info) => info,
        Err(e) => {
            warn!(error = %e, "Sample without video caps");
            return None;
        }
    };
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let stride = info.stride().first().copied().unwrap_or(0).max(0) as usize;
    let frame = Frame::from_strided(info.width(), info.height(), stride, map.as_slice(), format);
    if frame.is_none() {
        warn!(
            width = info.width(),
            height = info.height(),
            stride,
            bytes = map.size(),
            "Dropping malformed sample"
        );
    }
    frame
}

/// `appsink` element description that keeps only the newest frame
pub(crate) fn appsink_description(name: &str, format: PixelFormat) -> String {
    format!(
        "video/x-raw,format={} ! appsink name={} max-buffers=1 drop=true sync=false",
        format.gst_format(),
        name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appsink_description_pins_format() {
        let desc = appsink_description("preview", PixelFormat::Bgr);
        assert!(desc.starts_with("video/x-raw,format=BGR"));
        assert!(desc.contains("name=preview"));
        assert!(desc.contains("drop=true"));
    }
}
