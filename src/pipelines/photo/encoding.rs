// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding of captured frames

use crate::backends::camera::Frame;
use crate::errors::PhotoError;
use crate::media::to_rgb;
use std::path::Path;
use tracing::{debug, info};

/// Default JPEG quality (0-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Photo encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoEncoder {
    quality: u8,
}

impl PhotoEncoder {
    /// Create an encoder; quality is clamped to 1..=100
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode a frame as JPEG
    pub fn encode_jpeg(&self, frame: &Frame) -> Result<Vec<u8>, PhotoError> {
        let image = to_rgb(frame).ok_or_else(|| {
            PhotoError::EncodingFailed(format!("invalid frame {:?}", frame))
        })?;

        let mut buffer = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, self.quality);
        encoder.encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )?;

        debug!(size = buffer.len(), quality = self.quality, "JPEG encoded");
        Ok(buffer)
    }

    /// Encode a frame and write it to `path`
    pub fn save(&self, frame: &Frame, path: &Path) -> Result<(), PhotoError> {
        let data = self.encode_jpeg(frame)?;
        std::fs::write(path, &data)?;
        info!(path = %path.display(), bytes = data.len(), "Photo saved");
        Ok(())
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::PixelFormat;

    #[test]
    fn test_quality_clamped() {
        assert_eq!(PhotoEncoder::new(0).quality(), 1);
        assert_eq!(PhotoEncoder::new(200).quality(), 100);
    }

    #[test]
    fn test_save_writes_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo_test.jpg");
        let frame = Frame::new(16, 8, vec![128u8; 16 * 8 * 3], PixelFormat::Bgr);

        PhotoEncoder::default().save(&frame, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_invalid_frame_fails_encoding() {
        let frame = Frame::new(4, 4, vec![0u8; 3], PixelFormat::Rgb);
        assert!(matches!(
            PhotoEncoder::default().encode_jpeg(&frame),
            Err(PhotoError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("photo.jpg");
        let frame = Frame::new(2, 2, vec![0u8; 12], PixelFormat::Rgb);
        assert!(matches!(
            PhotoEncoder::default().save(&frame, &path),
            Err(PhotoError::SaveFailed(_))
        ));
    }
}
