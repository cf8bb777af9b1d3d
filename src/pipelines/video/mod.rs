// SPDX-License-Identifier: GPL-3.0-only

//! Video recording
//!
//! Frames polled for the preview are handed, unscaled, to a [`VideoSink`]
//! while a recording is active. The production sink is an AVI file written by
//! GStreamer:
//!
//! ```text
//! appsrc → videoconvert → avenc_mpeg4 | jpegenc → avimux → filesink
//! ```

pub mod encoder_selection;
pub mod recorder;

pub use encoder_selection::{SelectedEncoder, select_video_encoder};
pub use recorder::{AviRecorder, AviRecorderFactory};

use crate::backends::camera::{Frame, PixelFormat};
use crate::errors::RecordingError;
use std::path::Path;
use std::path::PathBuf;

/// Fixed properties of a recording, taken from its first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSpec {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub format: PixelFormat,
}

impl VideoSpec {
    pub fn for_frame(frame: &Frame, fps: u32) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            fps,
            format: frame.format,
        }
    }

    /// Whether `frame` matches the size and format of the recording
    pub fn accepts(&self, frame: &Frame) -> bool {
        frame.width == self.width && frame.height == self.height && frame.format == self.format
    }
}

/// An open video file accepting frames
pub trait VideoSink: Send {
    /// Append one frame
    fn write_frame(&mut self, frame: &Frame) -> Result<(), RecordingError>;

    /// Flush and close the file, returning its path
    fn finish(self: Box<Self>) -> Result<PathBuf, RecordingError>;

    fn frames_written(&self) -> u64;
}

/// Creates video sinks; swapped out in tests
pub trait VideoSinkFactory: Send {
    fn create(&self, path: &Path, spec: VideoSpec) -> Result<Box<dyn VideoSink>, RecordingError>;
}
