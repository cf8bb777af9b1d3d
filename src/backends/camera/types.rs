// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Camera backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CameraBackendType {
    /// USB webcam or any V4L2 capture device
    #[default]
    Webcam,
    /// Board camera module driven through libcamera
    CameraModule,
    /// Synthetic GStreamer test source, for running without a camera
    TestPattern,
}

impl CameraBackendType {
    pub const ALL: [CameraBackendType; 3] = [
        CameraBackendType::Webcam,
        CameraBackendType::CameraModule,
        CameraBackendType::TestPattern,
    ];
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::Webcam => write!(f, "webcam"),
            CameraBackendType::CameraModule => write!(f, "camera module"),
            CameraBackendType::TestPattern => write!(f, "test pattern"),
        }
    }
}

/// Channel order of a 24-bit frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Blue, green, red (needs a swap before display)
    Bgr,
    /// Red, green, blue
    Rgb,
}

impl PixelFormat {
    /// GStreamer video/x-raw format string
    pub fn gst_format(&self) -> &'static str {
        match self {
            PixelFormat::Bgr => "BGR",
            PixelFormat::Rgb => "RGB",
        }
    }

    /// Whether the format must be converted before display or JPEG encoding
    pub fn needs_conversion(&self) -> bool {
        matches!(self, PixelFormat::Bgr)
    }
}

/// How a backend produces the image stored by a photo capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StillMode {
    /// The last frame shown in the preview is saved
    ReuseLiveFrame,
    /// The backend takes a dedicated, higher quality still
    NativeCapture,
}

/// One captured bitmap: `height` rows of `width` pixels, 3 bytes each, no padding
#[derive(Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    pub format: PixelFormat,
    pub captured_at: Instant,
}

impl Frame {
    pub const BYTES_PER_PIXEL: usize = 3;

    pub fn new(width: u32, height: u32, data: impl Into<Arc<[u8]>>, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            data: data.into(),
            format,
            captured_at: Instant::now(),
        }
    }

    /// Build a frame from rows that may carry trailing padding
    ///
    /// GStreamer aligns RGB/BGR rows to 4 bytes; the padding is dropped here so
    /// the rest of the application can assume tightly packed rows.
    pub fn from_strided(
        width: u32,
        height: u32,
        stride: usize,
        bytes: &[u8],
        format: PixelFormat,
    ) -> Option<Self> {
        let row_len = width as usize * Self::BYTES_PER_PIXEL;
        if width == 0 || height == 0 || stride < row_len {
            return None;
        }
        if bytes.len() < stride * (height as usize - 1) + row_len {
            return None;
        }

        if stride == row_len {
            let len = row_len * height as usize;
            return Some(Self::new(width, height, &bytes[..len], format));
        }

        let mut packed = Vec::with_capacity(row_len * height as usize);
        for row in bytes.chunks(stride).take(height as usize) {
            packed.extend_from_slice(&row[..row_len]);
        }
        Some(Self::new(width, height, packed, format))
    }

    /// Whether the buffer length matches the declared dimensions
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == self.width as usize * self.height as usize * Self::BYTES_PER_PIXEL
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Time since the frame was pulled from the camera
    pub fn age(&self) -> Duration {
        self.captured_at.elapsed()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_strided_drops_padding() {
        // 2x2 BGR, rows padded from 6 to 8 bytes
        let bytes = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        let frame = Frame::from_strided(2, 2, 8, &bytes, PixelFormat::Bgr).unwrap();
        assert!(frame.is_valid());
        assert_eq!(&*frame.data, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_from_strided_accepts_unpadded_last_row() {
        let bytes = [1, 2, 3, 0, 4, 5, 6];
        let frame = Frame::from_strided(1, 2, 4, &bytes, PixelFormat::Rgb).unwrap();
        assert_eq!(&*frame.data, &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_from_strided_rejects_short_buffer() {
        assert!(Frame::from_strided(2, 2, 6, &[0; 11], PixelFormat::Rgb).is_none());
        assert!(Frame::from_strided(0, 2, 6, &[0; 12], PixelFormat::Rgb).is_none());
    }

    #[test]
    fn test_age_counts_from_capture() {
        let mut frame = Frame::new(1, 1, vec![0u8; 3], PixelFormat::Rgb);
        frame.captured_at = Instant::now() - Duration::from_millis(250);
        assert!(frame.age() >= Duration::from_millis(250));
    }

    #[test]
    fn test_only_bgr_needs_conversion() {
        assert!(PixelFormat::Bgr.needs_conversion());
        assert!(!PixelFormat::Rgb.needs_conversion());
    }
}
