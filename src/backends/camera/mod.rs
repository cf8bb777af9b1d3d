// SPDX-License-Identifier: GPL-3.0-only

//! Camera source abstraction
//!
//! Two physical backends share one capability interface:
//!
//! ```text
//! CameraSource (trait)
//!   ├── WebcamSource        v4l2src / videotestsrc → BGR frames, photo = live frame
//!   └── CameraModuleSource  libcamerasrc → RGB preview + dedicated still branch
//! ```
//!
//! The application only talks to [`CameraSource`]; which concrete source is
//! built is decided once at startup by [`create_source`].

mod camera_module;
mod capture_pipeline;
pub mod types;
mod webcam;

pub use camera_module::CameraModuleSource;
pub use types::*;
pub use webcam::WebcamSource;

use crate::constants::pipeline;
use crate::errors::CameraError;
use std::time::Duration;
use tracing::info;

/// Capability interface implemented by every camera backend
///
/// The application drives a source from the display loop: one
/// [`read_frame`](Self::read_frame) per tick, a photo through
/// [`still_mode`](Self::still_mode) / [`capture_still`](Self::capture_still),
/// and [`close`](Self::close) on quit.
pub trait CameraSource: Send {
    /// Open the device and start streaming
    ///
    /// # Returns
    /// * `Ok(())` - frames can be read
    /// * `Err(CameraError::DeviceUnavailable)` - the device is absent or busy
    fn open(&mut self) -> Result<(), CameraError>;

    /// Whether [`open`](Self::open) succeeded and [`close`](Self::close) has not run
    fn is_open(&self) -> bool;

    /// Read the next live frame, waiting at most `timeout`
    ///
    /// Returns `None` when no new frame arrived in time or the device
    /// reported a read error.
    fn read_frame_timeout(&mut self, timeout: Duration) -> Option<Frame>;

    /// Near non-blocking read used by the display loop
    ///
    /// Callers treat `None` as "skip this tick".
    fn read_frame(&mut self) -> Option<Frame> {
        self.read_frame_timeout(Duration::from_millis(pipeline::READ_TIMEOUT_MS))
    }

    /// How photos are produced on this source
    fn still_mode(&self) -> StillMode;

    /// Take a dedicated still image
    ///
    /// Only meaningful for [`StillMode::NativeCapture`] sources.
    fn capture_still(&mut self) -> Option<Frame> {
        None
    }

    /// Whether the frames of this source can be recorded to video
    fn supports_video(&self) -> bool;

    /// Stop streaming and release the device. Safe to call more than once.
    fn close(&mut self);

    fn backend_type(&self) -> CameraBackendType;
}

/// Build the source for the configured backend
///
/// The source is returned unopened.
pub fn create_source(backend: CameraBackendType, device_path: &str) -> Box<dyn CameraSource> {
    info!(%backend, device_path, "Creating camera source");
    match backend {
        CameraBackendType::Webcam => Box::new(WebcamSource::device(device_path)),
        CameraBackendType::TestPattern => Box::new(WebcamSource::test_pattern()),
        CameraBackendType::CameraModule => Box::new(CameraModuleSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_honours_backend() {
        for backend in CameraBackendType::ALL {
            let source = create_source(backend, "/dev/video0");
            assert_eq!(source.backend_type(), backend);
            assert!(!source.is_open());
        }
    }

    #[test]
    fn test_capabilities_per_backend() {
        let webcam = create_source(CameraBackendType::Webcam, "/dev/video0");
        assert_eq!(webcam.still_mode(), StillMode::ReuseLiveFrame);
        assert!(webcam.supports_video());

        let module = create_source(CameraBackendType::CameraModule, "");
        assert_eq!(module.still_mode(), StillMode::NativeCapture);
        assert!(!module.supports_video());
    }
}
