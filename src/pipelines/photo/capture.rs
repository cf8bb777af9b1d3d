// SPDX-License-Identifier: GPL-3.0-only

//! Choosing the frame a photo is made from

use crate::backends::camera::{CameraSource, Frame, StillMode};
use crate::errors::PhotoError;
use tracing::{debug, info, warn};

/// Pick the frame for a photo
///
/// Live-frame sources save the frame last shown in the preview. Sources with
/// a native still mode are asked for a dedicated still; if that fails the
/// live frame is used instead so the user still gets a picture.
pub fn select_still(
    source: &mut dyn CameraSource,
    live_frame: Option<&Frame>,
) -> Result<Frame, PhotoError> {
    match source.still_mode() {
        StillMode::ReuseLiveFrame => {
            debug!("Using current preview frame for photo");
        }
        StillMode::NativeCapture => {
            if let Some(still) = source.capture_still() {
                info!(width = still.width, height = still.height, "Using native still");
                return Ok(still);
            }
            warn!("Native still failed, falling back to preview frame");
        }
    }

    let frame = live_frame.cloned().ok_or(PhotoError::NoFrameAvailable)?;
    debug!(age_ms = frame.age().as_millis() as u64, "Photo from preview snapshot");
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{CameraBackendType, PixelFormat};
    use crate::errors::CameraError;

    struct StillSource {
        mode: StillMode,
        still: Option<Frame>,
    }

    impl CameraSource for StillSource {
        fn open(&mut self) -> Result<(), CameraError> {
            Ok(())
        }
        fn is_open(&self) -> bool {
            true
        }
        fn read_frame_timeout(&mut self, _timeout: std::time::Duration) -> Option<Frame> {
            None
        }
        fn still_mode(&self) -> StillMode {
            self.mode
        }
        fn capture_still(&mut self) -> Option<Frame> {
            self.still.take()
        }
        fn supports_video(&self) -> bool {
            false
        }
        fn close(&mut self) {}
        fn backend_type(&self) -> CameraBackendType {
            CameraBackendType::TestPattern
        }
    }

    fn frame(width: u32) -> Frame {
        Frame::new(width, 1, vec![0u8; width as usize * 3], PixelFormat::Rgb)
    }

    #[test]
    fn test_live_frame_mode() {
        let mut source = StillSource {
            mode: StillMode::ReuseLiveFrame,
            still: Some(frame(9)),
        };
        let chosen = select_still(&mut source, Some(&frame(2))).unwrap();
        assert_eq!(chosen.width, 2);
    }

    #[test]
    fn test_native_still_preferred() {
        let mut source = StillSource {
            mode: StillMode::NativeCapture,
            still: Some(frame(9)),
        };
        let chosen = select_still(&mut source, Some(&frame(2))).unwrap();
        assert_eq!(chosen.width, 9);
    }

    #[test]
    fn test_native_failure_falls_back() {
        let mut source = StillSource {
            mode: StillMode::NativeCapture,
            still: None,
        };
        assert_eq!(select_still(&mut source, Some(&frame(2))).unwrap().width, 2);
        assert_eq!(
            select_still(&mut source, None).unwrap_err(),
            PhotoError::NoFrameAvailable
        );
    }
}
