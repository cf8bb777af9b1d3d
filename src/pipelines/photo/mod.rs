// SPDX-License-Identifier: GPL-3.0-only

//! Photo pipeline
//!
//! ```text
//! CameraSource ─ still or live frame ─▶ JPEG encoder ─▶ <day dir>/photo_*.jpg
//! ```

pub mod capture;
pub mod encoding;

pub use capture::select_still;
pub use encoding::{DEFAULT_JPEG_QUALITY, PhotoEncoder};

use crate::backends::camera::{CameraSource, Frame};
use crate::errors::PhotoError;
use std::path::Path;

/// Capture → encode → save
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    pub fn new(encoder: PhotoEncoder) -> Self {
        Self { encoder }
    }

    /// Take a photo from `source` and store it at `path`
    pub fn capture_to(
        &self,
        source: &mut dyn CameraSource,
        live_frame: Option<&Frame>,
        path: &Path,
    ) -> Result<(), PhotoError> {
        let frame = select_still(source, live_frame)?;
        self.encoder.save(&frame, path)
    }
}
